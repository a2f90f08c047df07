// user registration, login, and session token handling

use crate::models::user::{CreateUserRequest, LoginRequest, User};
use anyhow::{anyhow, Result};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::info;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

const BCRYPT_COST: u32 = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // user ID
    pub exp: i64,     // expiration
    pub role: String, // "user" or "admin"
    pub iat: i64,     // issued at
}

pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, user_req: CreateUserRequest) -> Result<User> {
        if user_req.username.trim().is_empty() {
            return Err(anyhow!("Username is required"));
        }
        if user_req.email.trim().is_empty() {
            return Err(anyhow!("Email is required"));
        }
        if user_req.password.is_empty() {
            return Err(anyhow!("Password is required"));
        }

        if User::find_by_email(&self.pool, &user_req.email).await?.is_some() {
            return Err(anyhow!("Email already registered"));
        }

        if User::find_by_username(&self.pool, &user_req.username)
            .await?
            .is_some()
        {
            return Err(anyhow!("Username already taken"));
        }

        let password_hash = hash(&user_req.password, BCRYPT_COST)?;

        let user = User::create(&self.pool, user_req, password_hash).await?;

        info!("New user registered: {}", user.id);

        Ok(user)
    }

    pub async fn login(&self, login_req: LoginRequest) -> Result<String> {
        let user = User::find_by_email(&self.pool, &login_req.email)
            .await?
            .ok_or_else(|| anyhow!("Invalid email or password"))?;

        if !verify(&login_req.password, &user.password_hash)? {
            return Err(anyhow!("Invalid email or password"));
        }

        let token = Self::generate_token(user.id, user.role.clone())?;

        Ok(token)
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if new_password.len() < 8 {
            return Err(anyhow!("Password must be at least 8 characters"));
        }

        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| anyhow!("User not found"))?;

        if !verify(current_password, &user.password_hash)? {
            return Err(anyhow!("Current password is incorrect"));
        }

        let new_hash = hash(new_password, BCRYPT_COST)?;
        user.update_password(&self.pool, &new_hash).await?;

        Ok(())
    }

    pub fn verify_token(token: &str) -> Result<Uuid> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET not set"))?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        let now = Utc::now().timestamp();
        if token_data.claims.exp < now {
            return Err(anyhow!("Token expired"));
        }

        let user_id = Uuid::parse_str(&token_data.claims.sub)?;

        Ok(user_id)
    }

    pub fn generate_token(user_id: Uuid, role: String) -> Result<String> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET not set"))?;

        let now = Utc::now().timestamp();
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(24))
            .ok_or_else(|| anyhow!("Invalid timestamp calculation"))?
            .timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
            role,
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }
}
