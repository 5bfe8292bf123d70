//! Login flow against the external identity provider.
//!
//! `/api/login` redirects the browser to the provider; `/api/callback`
//! verifies the state token, exchanges the code, upserts the user keyed by
//! the subject claim, and stores the user id in the session.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::{UpsertUser, User};
use crate::routes::helpers::require_user;
use crate::state::AppState;

/// Session key for the logged-in user's id.
pub const SESSION_USER_ID: &str = "user_id";

/// Session key for the login CSRF state token.
pub const SESSION_OAUTH_STATE: &str = "oauth_state";

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", get(login))
        .route("/api/callback", get(callback))
        .route("/api/logout", get(logout))
        .route("/api/auth/user", get(current_user))
}

/// Provider callback query parameters.
#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Start the login flow: stash a state token and redirect to the provider.
async fn login(State(state): State<AppState>, session: Session) -> Response {
    let Some(oidc) = state.oidc() else {
        return login_disabled();
    };

    let (auth_url, csrf_token) = oidc.authorize_url();

    if let Err(e) = session
        .insert(SESSION_OAUTH_STATE, csrf_token.secret())
        .await
    {
        tracing::error!(error = %e, "failed to store login state in session");
        return AppError::Internal(e.into()).into_response();
    }

    Redirect::to(auth_url.as_str()).into_response()
}

/// Complete the login flow.
async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(oidc) = state.oidc() else {
        return login_disabled();
    };

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "identity provider returned an error");
        return AppError::Unauthorized.into_response();
    }

    // The state echoed by the provider must match the one this session
    // started with.
    let stored_state: Option<String> = session.remove(SESSION_OAUTH_STATE).await.ok().flatten();
    match (&stored_state, &params.state) {
        (Some(stored), Some(echoed)) if stored == echoed => {}
        _ => {
            tracing::warn!("login state mismatch");
            return AppError::Unauthorized.into_response();
        }
    }

    let Some(code) = params.code else {
        return AppError::Unauthorized.into_response();
    };

    let result = async {
        let access_token = oidc.exchange_code(code).await?;
        let claims = oidc.fetch_claims(&access_token).await?;
        User::upsert(state.db(), UpsertUser::from(claims)).await
    }
    .await;

    let user = match result {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            return AppError::Unauthorized.into_response();
        }
    };

    if let Err(e) = session.insert(SESSION_USER_ID, &user.id).await {
        tracing::error!(error = %e, "failed to store user id in session");
        return AppError::Internal(e.into()).into_response();
    }

    tracing::info!(user_id = %user.id, "user logged in");
    Redirect::to("/").into_response()
}

/// Destroy the session.
async fn logout(session: Session) -> Response {
    if let Err(e) = session.delete().await {
        tracing::error!(error = %e, "failed to delete session");
        return AppError::Internal(e.into()).into_response();
    }

    Redirect::to("/").into_response()
}

/// Return the logged-in user.
async fn current_user(State(state): State<AppState>, session: Session) -> AppResult<Json<User>> {
    let user = require_user(&state, &session).await?;
    Ok(Json(user))
}

/// 503 response used when no identity provider is configured.
fn login_disabled() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "message": "Login is not configured" })),
    )
        .into_response()
}
