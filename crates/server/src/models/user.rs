//! User model and CRUD operations.
//!
//! Users are created or refreshed by upsert on every successful login,
//! keyed by the identity provider's subject claim. They are never deleted
//! by this system.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::permissions::Role;

/// User record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// External identity provider subject.
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    /// Role column text; see [`User::role`] for the parsed value.
    pub role: String,
    pub whatsapp_opt_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for the login upsert. Role is intentionally absent: profile fields
/// refresh on every login, the role assignment survives.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl User {
    /// Parsed role, defaulting unknown column values to `Role::User`.
    pub fn role(&self) -> Role {
        Role::from_db(&self.role)
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch user by id")?;

        Ok(user)
    }

    /// List all users, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .context("failed to list users")?;

        Ok(users)
    }

    /// Insert a user, or refresh profile fields if the id already exists.
    pub async fn upsert(pool: &PgPool, input: UpsertUser) -> Result<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                profile_image_url = EXCLUDED.profile_image_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&input.id)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.profile_image_url)
        .fetch_one(pool)
        .await
        .context("failed to upsert user")?;

        Ok(user)
    }

    /// Change a user's role.
    pub async fn update_role(pool: &PgPool, id: &str, role: Role) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update user role")?;

        Ok(user)
    }

    /// Change a user's WhatsApp opt-in preference.
    pub async fn update_whatsapp_opt_in(
        pool: &PgPool,
        id: &str,
        opt_in: bool,
    ) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET whatsapp_opt_in = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(opt_in)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update whatsapp opt-in")?;

        Ok(user)
    }
}
