use crate::models::user::{CreateUserRequest, LoginRequest};
use crate::services::auth::AuthService;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn register(
    pool: web::Data<PgPool>,
    user_data: web::Json<CreateUserRequest>,
) -> impl Responder {
    let auth = AuthService::new(pool.get_ref().clone());

    match auth.register(user_data.into_inner()).await {
        Ok(user) => {
            info!("User registered successfully: {}", user.id);
            HttpResponse::Created().json(user)
        }
        Err(e) => {
            // log the actual error but don't expose internals directly
            error!("Registration failed: {}", e);

            let message = e.to_string();
            if message.contains("already registered")
                || message.contains("already taken")
                || message.contains("is required")
            {
                HttpResponse::BadRequest().json(ErrorResponse { error: message })
            } else {
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Registration failed. Please check your information and try again."
                        .to_string(),
                })
            }
        }
    }
}

pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> impl Responder {
    let auth = AuthService::new(pool.get_ref().clone());

    match auth.login(login_data.into_inner()).await {
        Ok(token) => HttpResponse::Ok().json(serde_json::json!({
            "token": token,
            "message": "Login successful"
        })),
        Err(e) => {
            // log the error but return a generic message for security
            error!("Login failed: {}", e);

            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Invalid email or password.".to_string(),
            })
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    );
}
