//! Blog model and CRUD operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Blog post record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub title_hi: Option<String>,
    pub content: String,
    pub content_hi: Option<String>,
    pub excerpt: String,
    pub excerpt_hi: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub author: String,
    pub published: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a blog post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub title_hi: Option<String>,
    pub content: String,
    pub content_hi: Option<String>,
    pub excerpt: String,
    pub excerpt_hi: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub author: String,
    pub published: Option<bool>,
    pub created_by: Option<String>,
}

/// Mutable fields for a partial blog update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogChanges {
    pub title: Option<String>,
    pub title_hi: Option<String>,
    pub content: Option<String>,
    pub content_hi: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_hi: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
}

impl NewBlog {
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
        if self.category.trim().is_empty() {
            errors.push("category is required");
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

impl Blog {
    /// List blog posts, newest first, optionally restricted by publish
    /// status.
    pub async fn list(pool: &PgPool, published: Option<bool>) -> Result<Vec<Self>> {
        let blogs = match published {
            Some(flag) => {
                sqlx::query_as::<_, Blog>(
                    "SELECT * FROM blogs WHERE published = $1 ORDER BY created_at DESC",
                )
                .bind(flag)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY created_at DESC")
                    .fetch_all(pool)
                    .await
            }
        }
        .context("failed to list blogs")?;

        Ok(blogs)
    }

    /// Find a blog post by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch blog by id")?;

        Ok(blog)
    }

    /// List published blog posts in a category, newest first.
    pub async fn list_by_category(pool: &PgPool, category: &str) -> Result<Vec<Self>> {
        let blogs = sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs WHERE category = $1 AND published = TRUE ORDER BY created_at DESC",
        )
        .bind(category)
        .fetch_all(pool)
        .await
        .context("failed to list blogs by category")?;

        Ok(blogs)
    }

    /// Case-insensitive substring search over published blog posts,
    /// matching title and content in both languages.
    pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Self>> {
        let pattern = format!("%{query}%");

        let blogs = sqlx::query_as::<_, Blog>(
            r#"
            SELECT * FROM blogs
            WHERE published = TRUE
              AND (title ILIKE $1 OR title_hi ILIKE $1
                   OR content ILIKE $1 OR content_hi ILIKE $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(pool)
        .await
        .context("failed to search blogs")?;

        Ok(blogs)
    }

    /// Create a new blog post.
    pub async fn create(pool: &PgPool, input: NewBlog) -> Result<Self> {
        let id = Uuid::now_v7();

        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (id, title, title_hi, content, content_hi, excerpt,
                               excerpt_hi, category, image_url, author, published,
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
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(&input.author)
        .bind(input.published.unwrap_or(true))
        .bind(&input.created_by)
        .fetch_one(pool)
        .await
        .context("failed to create blog")?;

        Ok(blog)
    }

    /// Merge only the supplied fields and refresh `updated_at`. Returns
    /// None when the id does not exist.
    pub async fn update(pool: &PgPool, id: Uuid, changes: BlogChanges) -> Result<Option<Self>> {
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
        if changes.category.is_some() {
            claim("category");
        }
        if changes.image_url.is_some() {
            claim("image_url");
        }
        if changes.author.is_some() {
            claim("author");
        }
        if changes.published.is_some() {
            claim("published");
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE blogs SET {}, updated_at = NOW() WHERE id = ${param_idx} RETURNING *",
            sets.join(", ")
        );

        let mut query_builder = sqlx::query_as::<_, Blog>(&query);

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
        if let Some(ref category) = changes.category {
            query_builder = query_builder.bind(category);
        }
        if let Some(ref image_url) = changes.image_url {
            query_builder = query_builder.bind(image_url);
        }
        if let Some(ref author) = changes.author {
            query_builder = query_builder.bind(author);
        }
        if let Some(published) = changes.published {
            query_builder = query_builder.bind(published);
        }
        query_builder = query_builder.bind(id);

        let blog = query_builder
            .fetch_optional(pool)
            .await
            .context("failed to update blog")?;

        Ok(blog)
    }

    /// Delete a blog post. Returns false when the id did not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete blog")?;

        Ok(result.rows_affected() > 0)
    }
}
