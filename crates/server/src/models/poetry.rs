//! Poetry model and CRUD operations.
//!
//! Structurally parallel to events and blogs, minus the category field, so
//! there is no by-category read. Search additionally matches the poet's
//! name in both languages.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Poetry record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Poetry {
    pub id: Uuid,
    pub title: String,
    pub title_hi: Option<String>,
    pub content: String,
    pub content_hi: Option<String>,
    pub excerpt: String,
    pub excerpt_hi: Option<String>,
    pub author: String,
    pub author_hi: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a poem.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoetry {
    pub title: String,
    pub title_hi: Option<String>,
    pub content: String,
    pub content_hi: Option<String>,
    pub excerpt: String,
    pub excerpt_hi: Option<String>,
    pub author: String,
    pub author_hi: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
    pub created_by: Option<String>,
}

/// Mutable fields for a partial poetry update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoetryChanges {
    pub title: Option<String>,
    pub title_hi: Option<String>,
    pub content: Option<String>,
    pub content_hi: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_hi: Option<String>,
    pub author: Option<String>,
    pub author_hi: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

impl NewPoetry {
    /// Wire-level validation, independent of the persistence schema.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("title is required");
        }
        if self.content.trim().is_empty() {
            errors.push("content is required");
        }
        if self.excerpt.trim().is_empty() {
            errors.push("excerpt is required");
        }
        if self.author.trim().is_empty() {
            errors.push("author is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

impl Poetry {
    /// List poems, newest first, optionally restricted by publish status.
    pub async fn list(pool: &PgPool, published: Option<bool>) -> Result<Vec<Self>> {
        let poems = match published {
            Some(flag) => {
                sqlx::query_as::<_, Poetry>(
                    "SELECT * FROM poetry WHERE published = $1 ORDER BY created_at DESC",
                )
                .bind(flag)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Poetry>("SELECT * FROM poetry ORDER BY created_at DESC")
                    .fetch_all(pool)
                    .await
            }
        }
        .context("failed to list poetry")?;

        Ok(poems)
    }

    /// Find a poem by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let poem = sqlx::query_as::<_, Poetry>("SELECT * FROM poetry WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch poem by id")?;

        Ok(poem)
    }

    /// Case-insensitive substring search over published poems, matching
    /// title, content, and author in both languages.
    pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Self>> {
        let pattern = format!("%{query}%");

        let poems = sqlx::query_as::<_, Poetry>(
            r#"
            SELECT * FROM poetry
            WHERE published = TRUE
              AND (title ILIKE $1 OR title_hi ILIKE $1
                   OR content ILIKE $1 OR content_hi ILIKE $1
                   OR author ILIKE $1 OR author_hi ILIKE $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(pool)
        .await
        .context("failed to search poetry")?;

        Ok(poems)
    }

    /// Create a new poem.
    pub async fn create(pool: &PgPool, input: NewPoetry) -> Result<Self> {
        let id = Uuid::now_v7();

        let poem = sqlx::query_as::<_, Poetry>(
            r#"
            INSERT INTO poetry (id, title, title_hi, content, content_hi, excerpt,
                                excerpt_hi, author, author_hi, image_url, published,
                                created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.title_hi)
        .bind(&input.content)
        .bind(&input.content_hi)
        .bind(&input.excerpt)
        .bind(&input.excerpt_hi)
        .bind(&input.author)
        .bind(&input.author_hi)
        .bind(&input.image_url)
        .bind(input.published.unwrap_or(true))
        .bind(&input.created_by)
        .fetch_one(pool)
        .await
        .context("failed to create poem")?;

        Ok(poem)
    }

    /// Merge only the supplied fields and refresh `updated_at`. Returns
    /// None when the id does not exist.
    pub async fn update(pool: &PgPool, id: Uuid, changes: PoetryChanges) -> Result<Option<Self>> {
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
        if changes.content.is_some() {
            claim("content");
        }
        if changes.content_hi.is_some() {
            claim("content_hi");
        }
        if changes.excerpt.is_some() {
            claim("excerpt");
        }
        if changes.excerpt_hi.is_some() {
            claim("excerpt_hi");
        }
        if changes.author.is_some() {
            claim("author");
        }
        if changes.author_hi.is_some() {
            claim("author_hi");
        }
        if changes.image_url.is_some() {
            claim("image_url");
        }
        if changes.published.is_some() {
            claim("published");
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE poetry SET {}, updated_at = NOW() WHERE id = ${param_idx} RETURNING *",
            sets.join(", ")
        );

        let mut query_builder = sqlx::query_as::<_, Poetry>(&query);

        if let Some(ref title) = changes.title {
            query_builder = query_builder.bind(title);
        }
        if let Some(ref title_hi) = changes.title_hi {
            query_builder = query_builder.bind(title_hi);
        }
        if let Some(ref content) = changes.content {
            query_builder = query_builder.bind(content);
        }
        if let Some(ref content_hi) = changes.content_hi {
            query_builder = query_builder.bind(content_hi);
        }
        if let Some(ref excerpt) = changes.excerpt {
            query_builder = query_builder.bind(excerpt);
        }
        if let Some(ref excerpt_hi) = changes.excerpt_hi {
            query_builder = query_builder.bind(excerpt_hi);
        }
        if let Some(ref author) = changes.author {
            query_builder = query_builder.bind(author);
        }
        if let Some(ref author_hi) = changes.author_hi {
            query_builder = query_builder.bind(author_hi);
        }
        if let Some(ref image_url) = changes.image_url {
            query_builder = query_builder.bind(image_url);
        }
        if let Some(published) = changes.published {
            query_builder = query_builder.bind(published);
        }
        query_builder = query_builder.bind(id);

        let poem = query_builder
            .fetch_optional(pool)
            .await
            .context("failed to update poem")?;

        Ok(poem)
    }

    /// Delete a poem. Returns false when the id did not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM poetry WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete poem")?;

        Ok(result.rows_affected() > 0)
    }
}
