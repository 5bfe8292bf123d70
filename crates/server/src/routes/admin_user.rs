//! Admin routes for user management.
//!
//! These check specifically for the admin role: content managers pass the
//! content gate elsewhere but are excluded here.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::permissions::Role;
use crate::routes::helpers::require_admin;
use crate::state::AppState;

/// Create the user-management router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}/role", patch(update_role))
}

/// Role change request body.
#[derive(Debug, Deserialize)]
struct UpdateRoleRequest {
    role: String,
}

/// List all users.
async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<User>>> {
    require_admin(&state, &session).await?;

    let users = User::list(state.db()).await?;
    Ok(Json(users))
}

/// Change a user's role.
async fn update_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> AppResult<Json<User>> {
    require_admin(&state, &session).await?;

    let role: Role = request
        .role
        .parse()
        .map_err(|e: crate::permissions::UnknownRole| AppError::Validation(e.to_string()))?;

    let user = User::update_role(state.db(), &id, role)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user))
}
