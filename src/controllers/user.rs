use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::services::auth::AuthService;
use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    current_password: String,
    new_password: String,
}

pub async fn get_profile(pool: web::Data<PgPool>, user: AuthenticatedUser) -> impl Responder {
    match User::find_by_id(&pool, user.id).await {
        Ok(Some(user_profile)) => HttpResponse::Ok().json(user_profile),
        Ok(None) => {
            error!("User found in token but not in database: {}", user.id);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "User profile not found".to_string(),
            })
        }
        Err(e) => {
            error!("Failed to fetch user profile: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch your profile. Please try again.".to_string(),
            })
        }
    }
}

pub async fn update_password(
    pool: web::Data<PgPool>,
    password_data: web::Json<UpdatePasswordRequest>,
    user: AuthenticatedUser,
) -> impl Responder {
    let auth = AuthService::new(pool.get_ref().clone());

    match auth
        .change_password(
            user.id,
            &password_data.current_password,
            &password_data.new_password,
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Password updated successfully"
        })),
        Err(e) => {
            error!("Password update failed for user {}: {}", user.id, e);

            let message = e.to_string();
            if message.contains("at least 8 characters")
                || message.contains("Current password is incorrect")
            {
                HttpResponse::BadRequest().json(ErrorResponse { error: message })
            } else {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to update password. Please try again.".to_string(),
                })
            }
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/me", web::get().to(get_profile))
            .route("/me/password", web::put().to(update_password)),
    );
}
