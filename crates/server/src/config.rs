//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Path to uploads directory (default: ./uploads).
    pub uploads_dir: PathBuf,

    /// Base URL for serving uploaded files (default: /files).
    pub files_url: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "lax").
    pub cookie_same_site: String,

    /// Seed demo content at startup when the events table is empty
    /// (default: true).
    pub seed_demo_content: bool,

    /// Identity provider settings. When None, login is disabled and the
    /// public read API still works.
    pub oidc: Option<OidcConfig>,
}

/// External identity provider (OIDC-style authorization code flow).
#[derive(Debug, Clone)]
pub struct OidcConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub redirect_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let uploads_dir = env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let files_url = env::var("FILES_URL").unwrap_or_else(|_| "/files".to_string());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "lax".to_string())
            .to_lowercase();

        let seed_demo_content = env::var("SEED_DEMO_CONTENT")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let oidc = Self::oidc_from_env()?;

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            uploads_dir,
            files_url,
            cors_allowed_origins,
            cookie_same_site,
            seed_demo_content,
            oidc,
        })
    }

    /// Load identity provider settings.
    ///
    /// OIDC_CLIENT_ID acts as the switch: when unset, login is disabled and
    /// the remaining OIDC_* variables are ignored. When set, the rest are
    /// required.
    fn oidc_from_env() -> Result<Option<OidcConfig>> {
        let Ok(client_id) = env::var("OIDC_CLIENT_ID") else {
            return Ok(None);
        };

        let client_secret =
            env::var("OIDC_CLIENT_SECRET").context("OIDC_CLIENT_SECRET is required")?;
        let auth_url = env::var("OIDC_AUTH_URL").context("OIDC_AUTH_URL is required")?;
        let token_url = env::var("OIDC_TOKEN_URL").context("OIDC_TOKEN_URL is required")?;
        let userinfo_url =
            env::var("OIDC_USERINFO_URL").context("OIDC_USERINFO_URL is required")?;
        let redirect_url =
            env::var("OIDC_REDIRECT_URL").context("OIDC_REDIRECT_URL is required")?;

        Ok(Some(OidcConfig {
            client_id,
            client_secret,
            auth_url,
            token_url,
            userinfo_url,
            redirect_url,
        }))
    }
}
