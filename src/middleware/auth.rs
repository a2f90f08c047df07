use crate::models::event::Event;
use crate::models::user::User;
use crate::services::auth::AuthService;
use actix_web::{
    dev::Payload, error::ErrorUnauthorized, http, Error, FromRequest, HttpRequest, HttpResponse,
};
use log::{error, warn};
use std::future::Future;
use std::pin::Pin;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>> + 'static>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
                Some(header) => header,
                None => {
                    warn!("Request without authorization header: {}", req.path());
                    return Err(ErrorUnauthorized("Authorization header required"));
                }
            };

            let auth_str = match auth_header.to_str() {
                Ok(str) => str,
                Err(_) => {
                    warn!("Invalid authorization header format");
                    return Err(ErrorUnauthorized("Invalid authorization header format"));
                }
            };

            if !auth_str.starts_with("Bearer ") {
                warn!("Authorization header without Bearer scheme");
                return Err(ErrorUnauthorized("Bearer token required"));
            }

            let token = &auth_str[7..];

            if token.trim().is_empty() {
                warn!("Empty token provided");
                return Err(ErrorUnauthorized("Token cannot be empty"));
            }

            match AuthService::verify_token(token) {
                Ok(user_id) => Ok(AuthenticatedUser { id: user_id }),
                Err(e) => {
                    warn!("Token verification failed: {}", e);
                    Err(ErrorUnauthorized("Invalid or expired token"))
                }
            }
        })
    }
}

pub async fn require_admin_user(pool: &PgPool, user_id: Uuid) -> Result<User, HttpResponse> {
    let user = match User::find_by_id(pool, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("User not found for admin check: {}", user_id);
            return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Authentication required"
            })));
        }
        Err(e) => {
            error!("Database error during admin check: {}", e);
            return Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })));
        }
    };

    if !user.is_admin() {
        warn!("Non-admin user {} attempted admin access", user_id);
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Admin access required"
        })));
    }

    Ok(user)
}

// The owner-or-admin rule: an event may only be mutated by its creator
// or by a user with the admin role.
pub async fn check_event_mutation_access(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
) -> Result<Event, HttpResponse> {
    let user = match User::find_by_id(pool, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Authentication required"
            })));
        }
        Err(e) => {
            error!("Database error fetching user for access check: {}", e);
            return Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })));
        }
    };

    let event = match Event::find_by_id(pool, event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(serde_json::json!({
                "error": "Event not found"
            })));
        }
        Err(e) => {
            error!("Database error fetching event for access check: {}", e);
            return Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })));
        }
    };

    if event.creator_id != user.id && !user.is_admin() {
        warn!(
            "User {} attempted to modify event {} they don't own",
            user_id, event_id
        );
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You don't have permission to modify this event"
        })));
    }

    Ok(event)
}
