pub mod controllers;
pub mod middleware;
pub mod models;
pub mod services;

use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub use controllers::configure_routes;

pub async fn api_info() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "Eventboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Event listing service with user accounts",
        "endpoints": {
            "health": "/health",
            "api_docs": "/api",
            "auth": "/auth/*",
            "events": "/events/*",
            "users": "/users/*",
            "admin": "/admin/*"
        }
    }))
}
