//! Session management backed by PostgreSQL.
//!
//! Sessions live in a Postgres table owned by the session store, alongside
//! the content tables.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

/// Session expiry (7 days of inactivity).
pub const SESSION_EXPIRY_DAYS: i64 = 7;

/// Create the session layer, returning the store as well so the caller can
/// spawn the expired-session cleanup task.
pub async fn create_session_layer(
    pool: PgPool,
    same_site: SameSite,
) -> Result<(SessionManagerLayer<PostgresStore>, PostgresStore)> {
    let store = PostgresStore::new(pool);

    store
        .migrate()
        .await
        .context("failed to migrate session table")?;

    let session_layer = SessionManagerLayer::new(store.clone())
        .with_secure(true)
        .with_http_only(true)
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_EXPIRY_DAYS)));

    Ok((session_layer, store))
}
