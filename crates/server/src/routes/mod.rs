//! HTTP route handlers.

pub mod admin_user;
pub mod auth;
pub mod blog;
pub mod event;
pub mod health;
pub mod helpers;
pub mod poetry;
pub mod profile;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Assemble all resource routers into one.
///
/// Session, rate-limit, CORS, and trace layers are applied by the caller
/// (`main`, or the test harness) so each can choose its own stack.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(profile::router())
        .merge(event::router())
        .merge(blog::router())
        .merge(poetry::router())
        .merge(admin_user::router())
        .merge(upload::router())
        .merge(health::router())
}
