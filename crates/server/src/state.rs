//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::middleware::{RateLimitConfig, RateLimiter};
use crate::services::oidc::OidcService;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Constructed once in `main`
/// and handed to routes via axum state; `close` tears down the pool on
/// shutdown.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Loaded configuration.
    config: Config,

    /// In-process rate limiter.
    rate_limiter: RateLimiter,

    /// Identity provider client (available when OIDC_* is configured).
    oidc: Option<Arc<OidcService>>,
}

impl AppState {
    /// Create new application state: open the pool and run migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        db::run_migrations(&db)
            .await
            .context("failed to run migrations")?;

        let oidc = match &config.oidc {
            Some(oidc_config) => {
                let service = OidcService::new(oidc_config)
                    .context("failed to build identity provider client")?;
                Some(Arc::new(service))
            }
            None => {
                info!("no identity provider configured, login is disabled");
                None
            }
        };

        let rate_limiter = RateLimiter::new(RateLimitConfig::default());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db,
                config: config.clone(),
                rate_limiter,
                oidc,
            }),
        })
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the rate limiter.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.inner.rate_limiter
    }

    /// Get the identity provider client, if configured.
    pub fn oidc(&self) -> Option<&Arc<OidcService>> {
        self.inner.oidc.as_ref()
    }

    /// Check PostgreSQL health.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }

    /// Close the connection pool. Called on graceful shutdown.
    pub async fn close(&self) {
        self.inner.db.close().await;
    }
}
