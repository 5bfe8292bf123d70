//! Shared handler helpers: session lookup and access-gate checks.
//!
//! Every gate check runs before the handler touches the store, so a
//! rejected call has zero side effects.

use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::routes::auth::SESSION_USER_ID;
use crate::state::AppState;

/// Load the logged-in user from the session, or reject with 401.
pub async fn require_user(state: &AppState, session: &Session) -> AppResult<User> {
    let user_id: Option<String> = session.get(SESSION_USER_ID).await.ok().flatten();

    let Some(id) = user_id else {
        return Err(AppError::Unauthorized);
    };

    User::find_by_id(state.db(), &id)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Require a user who may manage content (admin or content manager).
pub async fn require_content_manager(state: &AppState, session: &Session) -> AppResult<User> {
    let user = require_user(state, session).await?;

    if !user.role().can_manage_content() {
        return Err(AppError::Forbidden);
    }

    Ok(user)
}

/// Require a user who may manage users (admin only). Content managers pass
/// the content gate but are excluded here.
pub async fn require_admin(state: &AppState, session: &Session) -> AppResult<User> {
    let user = require_user(state, session).await?;

    if !user.role().can_manage_users() {
        return Err(AppError::Forbidden);
    }

    Ok(user)
}
