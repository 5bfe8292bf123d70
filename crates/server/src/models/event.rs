//! Event model and CRUD operations.
//!
//! Events are bilingual content records: required English fields with
//! optional Hindi mirrors (`*_hi`). Public reads filter to published rows;
//! detail-by-id does not, so a draft is reachable by whoever holds its id.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Event record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub title_hi: Option<String>,
    pub description: String,
    pub description_hi: Option<String>,
    pub category: String,
    pub date: String,
    pub location: String,
    pub location_hi: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub title_hi: Option<String>,
    pub description: String,
    pub description_hi: Option<String>,
    pub category: String,
    pub date: String,
    pub location: String,
    pub location_hi: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
    pub created_by: Option<String>,
}

/// Mutable fields for a partial event update. Absent fields keep their
/// current value; `created_by` is fixed at creation and not listed here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventChanges {
    pub title: Option<String>,
    pub title_hi: Option<String>,
    pub description: Option<String>,
    pub description_hi: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub location_hi: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

impl NewEvent {
    /// Wire-level validation, independent of the persistence schema.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("title is required");
        }
        if self.description.trim().is_empty() {
            errors.push("description is required");
        }
        if self.category.trim().is_empty() {
            errors.push("category is required");
        }
        if self.date.trim().is_empty() {
            errors.push("date is required");
        }
        if self.location.trim().is_empty() {
            errors.push("location is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

impl Event {
    /// List events, newest first. `Some(flag)` restricts to that publish
    /// status; `None` returns everything (admin usage).
    pub async fn list(pool: &PgPool, published: Option<bool>) -> Result<Vec<Self>> {
        let events = match published {
            Some(flag) => {
                sqlx::query_as::<_, Event>(
                    "SELECT * FROM events WHERE published = $1 ORDER BY created_at DESC",
                )
                .bind(flag)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY created_at DESC")
                    .fetch_all(pool)
                    .await
            }
        }
        .context("failed to list events")?;

        Ok(events)
    }

    /// Find an event by ID. Absence is a normal empty result.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch event by id")?;

        Ok(event)
    }

    /// List published events in a category, newest first.
    pub async fn list_by_category(pool: &PgPool, category: &str) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE category = $1 AND published = TRUE ORDER BY created_at DESC",
        )
        .bind(category)
        .fetch_all(pool)
        .await
        .context("failed to list events by category")?;

        Ok(events)
    }

    /// Case-insensitive substring search over published events.
    ///
    /// Matches title, description, and location in both languages. No
    /// ranking; newest first.
    pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Self>> {
        let pattern = format!("%{query}%");

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE published = TRUE
              AND (title ILIKE $1 OR title_hi ILIKE $1
                   OR description ILIKE $1 OR description_hi ILIKE $1
                   OR location ILIKE $1 OR location_hi ILIKE $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(pool)
        .await
        .context("failed to search events")?;

        Ok(events)
    }

    /// Create a new event. The server assigns the id and timestamps;
    /// `published` defaults to true.
    pub async fn create(pool: &PgPool, input: NewEvent) -> Result<Self> {
        let id = Uuid::now_v7();

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, title_hi, description, description_hi,
                                category, date, location, location_hi, image_url,
                                published, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.title_hi)
        .bind(&input.description)
        .bind(&input.description_hi)
        .bind(&input.category)
        .bind(&input.date)
        .bind(&input.location)
        .bind(&input.location_hi)
        .bind(&input.image_url)
        .bind(input.published.unwrap_or(true))
        .bind(&input.created_by)
        .fetch_one(pool)
        .await
        .context("failed to create event")?;

        Ok(event)
    }

    /// Merge only the supplied fields into an existing event and refresh
    /// `updated_at`. Returns None when the id does not exist.
    pub async fn update(pool: &PgPool, id: Uuid, changes: EventChanges) -> Result<Option<Self>> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx = 1;

        let mut claim = |column: &str| {
            sets.push(format!("{column} = ${param_idx}"));
            param_idx += 1;
        };

        if changes.title.is_some() {
            claim("title");
        }
        if changes.title_hi.is_some() {
            claim("title_hi");
        }
        if changes.description.is_some() {
            claim("description");
        }
        if changes.description_hi.is_some() {
            claim("description_hi");
        }
        if changes.category.is_some() {
            claim("category");
        }
        if changes.date.is_some() {
            claim("date");
        }
        if changes.location.is_some() {
            claim("location");
        }
        if changes.location_hi.is_some() {
            claim("location_hi");
        }
        if changes.image_url.is_some() {
            claim("image_url");
        }
        if changes.published.is_some() {
            claim("published");
        }

        if sets.is_empty() {
            // Nothing to merge; the row is untouched.
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE events SET {}, updated_at = NOW() WHERE id = ${param_idx} RETURNING *",
            sets.join(", ")
        );

        let mut query_builder = sqlx::query_as::<_, Event>(&query);

        if let Some(ref title) = changes.title {
            query_builder = query_builder.bind(title);
        }
        if let Some(ref title_hi) = changes.title_hi {
            query_builder = query_builder.bind(title_hi);
        }
        if let Some(ref description) = changes.description {
            query_builder = query_builder.bind(description);
        }
        if let Some(ref description_hi) = changes.description_hi {
            query_builder = query_builder.bind(description_hi);
        }
        if let Some(ref category) = changes.category {
            query_builder = query_builder.bind(category);
        }
        if let Some(ref date) = changes.date {
            query_builder = query_builder.bind(date);
        }
        if let Some(ref location) = changes.location {
            query_builder = query_builder.bind(location);
        }
        if let Some(ref location_hi) = changes.location_hi {
            query_builder = query_builder.bind(location_hi);
        }
        if let Some(ref image_url) = changes.image_url {
            query_builder = query_builder.bind(image_url);
        }
        if let Some(published) = changes.published {
            query_builder = query_builder.bind(published);
        }
        query_builder = query_builder.bind(id);

        let event = query_builder
            .fetch_optional(pool)
            .await
            .context("failed to update event")?;

        Ok(event)
    }

    /// Delete an event. Returns false when the id did not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete event")?;

        Ok(result.rows_affected() > 0)
    }
}
