use crate::middleware::auth::{check_event_mutation_access, AuthenticatedUser};
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn create_event(
    pool: web::Data<PgPool>,
    event_data: web::Json<CreateEventRequest>,
    user: AuthenticatedUser,
) -> impl Responder {
    match Event::create(&pool, user.id, event_data.into_inner()).await {
        Ok(event) => {
            info!("Event created: {} by user {}", event.id, user.id);
            HttpResponse::Created().json(event)
        }
        Err(e) => {
            let message = e.to_string();
            if message.contains("is required") {
                return HttpResponse::BadRequest().json(ErrorResponse { error: message });
            }

            error!("Failed to create event: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to create event. Please try again.".to_string(),
            })
        }
    }
}

pub async fn update_event(
    pool: web::Data<PgPool>,
    event_id: web::Path<Uuid>,
    event_data: web::Json<UpdateEventRequest>,
    user: AuthenticatedUser,
) -> impl Responder {
    let event = match check_event_mutation_access(&pool, user.id, *event_id).await {
        Ok(event) => event,
        Err(response) => return response,
    };

    match event.update(&pool, event_data.into_inner()).await {
        Ok(updated_event) => {
            info!("Event updated: {} by user {}", event.id, user.id);
            HttpResponse::Ok().json(updated_event)
        }
        Err(e) => {
            let message = e.to_string();
            if message.contains("is required") {
                return HttpResponse::BadRequest().json(ErrorResponse { error: message });
            }

            error!("Failed to update event: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update event. Please try again.".to_string(),
            })
        }
    }
}

pub async fn delete_event(
    pool: web::Data<PgPool>,
    event_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> impl Responder {
    let event = match check_event_mutation_access(&pool, user.id, *event_id).await {
        Ok(event) => event,
        Err(response) => return response,
    };

    match event.delete(&pool).await {
        Ok(_) => {
            info!("Event deleted: {} by user {}", event.id, user.id);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Event has been deleted successfully"
            }))
        }
        Err(e) => {
            error!("Failed to delete event: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete event. Please try again.".to_string(),
            })
        }
    }
}

pub async fn get_event(pool: web::Data<PgPool>, event_id: web::Path<Uuid>) -> impl Responder {
    match Event::find_by_id(&pool, *event_id).await {
        Ok(Some(event)) => HttpResponse::Ok().json(event),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Event not found".to_string(),
        }),
        Err(e) => {
            error!("Failed to fetch event: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch event. Please try again.".to_string(),
            })
        }
    }
}

pub async fn get_all_events(pool: web::Data<PgPool>) -> impl Responder {
    match Event::find_all(&pool).await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => {
            error!("Failed to fetch events: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch events. Please try again.".to_string(),
            })
        }
    }
}

pub async fn get_my_events(pool: web::Data<PgPool>, user: AuthenticatedUser) -> impl Responder {
    match Event::find_by_creator(&pool, user.id).await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => {
            error!("Failed to fetch creator events: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch events. Please try again.".to_string(),
            })
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            // Public routes
            .route("", web::get().to(get_all_events))
            // "/mine" must be registered before "/{event_id}" so it isn't
            // swallowed by the UUID path parameter
            .route("/mine", web::get().to(get_my_events))
            .route("/{event_id}", web::get().to(get_event))
            // Authenticated routes
            .route("", web::post().to(create_event))
            .route("/{event_id}", web::put().to(update_event))
            .route("/{event_id}", web::delete().to(delete_event)),
    );
}
