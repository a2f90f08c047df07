pub mod event;
pub mod user;

pub use event::{CreateEventRequest, Event, EventWithCreator, UpdateEventRequest};
pub use user::{CreateUserRequest, LoginRequest, User};
