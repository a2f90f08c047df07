use crate::middleware::auth::{require_admin_user, AuthenticatedUser};
use crate::models::event::Event;
use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn get_all_events_admin(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> impl Responder {
    let _admin = match require_admin_user(&pool, user.id).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match Event::find_all_with_creators(&pool).await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => {
            error!("Failed to fetch events for admin: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch events. Please try again.".to_string(),
            })
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").route("/events", web::get().to(get_all_events_admin)));
}
