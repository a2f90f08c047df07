use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, Arguments, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Event joined with its creator's username, for the admin listing.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EventWithCreator {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_username: String,
}

impl Event {
    pub async fn create(pool: &PgPool, creator_id: Uuid, event: CreateEventRequest) -> Result<Self> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        Self::validate_presence(&event.title, &event.description, &event.location)?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, creator_id, title, description, location, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(creator_id)
        .bind(event.title)
        .bind(event.description)
        .bind(event.location)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(event)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let events =
            sqlx::query_as::<_, Event>(r#"SELECT * FROM events ORDER BY created_at DESC"#)
                .fetch_all(pool)
                .await?;

        Ok(events)
    }

    pub async fn find_by_creator(pool: &PgPool, creator_id: Uuid) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>(
            r#"SELECT * FROM events WHERE creator_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(creator_id)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    pub async fn find_all_with_creators(pool: &PgPool) -> Result<Vec<EventWithCreator>> {
        let events = sqlx::query_as::<_, EventWithCreator>(
            r#"
            SELECT e.id, e.creator_id, e.title, e.description, e.location,
                   e.created_at, e.updated_at, u.username AS creator_username
            FROM events e
            JOIN users u ON u.id = e.creator_id
            ORDER BY e.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    pub async fn update(&self, pool: &PgPool, update: UpdateEventRequest) -> Result<Self> {
        let now = Utc::now();

        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(anyhow!("Title is required"));
            }
        }
        if let Some(description) = &update.description {
            if description.trim().is_empty() {
                return Err(anyhow!("Description is required"));
            }
        }
        if let Some(location) = &update.location {
            if location.trim().is_empty() {
                return Err(anyhow!("Location is required"));
            }
        }

        let mut query = String::from("UPDATE events SET updated_at = $1");
        let mut args = PgArguments::default();
        let _ = args.add(now);

        let mut param_index = 2;

        if let Some(title) = &update.title {
            query.push_str(&format!(", title = ${}", param_index));
            let _ = args.add(title);
            param_index += 1;
        }

        if let Some(description) = &update.description {
            query.push_str(&format!(", description = ${}", param_index));
            let _ = args.add(description);
            param_index += 1;
        }

        if let Some(location) = &update.location {
            query.push_str(&format!(", location = ${}", param_index));
            let _ = args.add(location);
            param_index += 1;
        }

        query.push_str(&format!(" WHERE id = ${} RETURNING *", param_index));
        let _ = args.add(self.id);

        let event = sqlx::query_as_with::<_, Event, _>(&query, args)
            .fetch_one(pool)
            .await?;

        Ok(event)
    }

    pub async fn delete(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(r#"DELETE FROM events WHERE id = $1"#)
            .bind(self.id)
            .execute(pool)
            .await?;

        Ok(())
    }

    fn validate_presence(title: &str, description: &str, location: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(anyhow!("Title is required"));
        }
        if description.trim().is_empty() {
            return Err(anyhow!("Description is required"));
        }
        if location.trim().is_empty() {
            return Err(anyhow!("Location is required"));
        }

        Ok(())
    }
}
