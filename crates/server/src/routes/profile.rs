//! Profile routes for the logged-in user.

use axum::extract::State;
use axum::routing::patch;
use axum::{Json, Router};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::routes::helpers::require_user;
use crate::state::AppState;

/// Create the profile router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/user/whatsapp-opt-in", patch(update_whatsapp_opt_in))
}

/// Opt-in request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptInRequest {
    opt_in: bool,
}

/// Update the caller's own WhatsApp opt-in preference. This is the only
/// mutation an authenticated non-manager user can perform.
async fn update_whatsapp_opt_in(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<OptInRequest>,
) -> AppResult<Json<User>> {
    let user = require_user(&state, &session).await?;

    let updated = User::update_whatsapp_opt_in(state.db(), &user.id, request.opt_in)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}
