pub mod admin;
pub mod auth;
pub mod event;
pub mod user;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
    event::configure(cfg);
    user::configure(cfg);
    admin::configure(cfg);
}
