//! Poetry route handlers. No category route: poems have no category field.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewPoetry, Poetry, PoetryChanges};
use crate::routes::helpers::require_content_manager;
use crate::state::AppState;

/// Create the poetry router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/poetry", get(list_poetry))
        .route("/api/poetry/search/{query}", get(search_poetry))
        .route("/api/poetry/{id}", get(get_poem))
        .route("/api/admin/poetry", get(list_all_poetry).post(create_poem))
        .route(
            "/api/admin/poetry/{id}",
            patch(update_poem).delete(delete_poem),
        )
}

/// Published poems, newest first.
async fn list_poetry(State(state): State<AppState>) -> AppResult<Json<Vec<Poetry>>> {
    let poems = Poetry::list(state.db(), Some(true)).await?;
    Ok(Json(poems))
}

/// Single poem by id; drafts are reachable by direct link.
async fn get_poem(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<Poetry>> {
    let poem = Poetry::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(poem))
}

/// Substring search over published poems.
async fn search_poetry(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<Poetry>>> {
    let poems = Poetry::search(state.db(), &query).await?;
    Ok(Json(poems))
}

/// All poems regardless of publish status.
async fn list_all_poetry(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<Poetry>>> {
    require_content_manager(&state, &session).await?;

    let poems = Poetry::list(state.db(), None).await?;
    Ok(Json(poems))
}

/// Create a poem, attributed to the caller.
async fn create_poem(
    State(state): State<AppState>,
    session: Session,
    Json(mut input): Json<NewPoetry>,
) -> AppResult<Json<Poetry>> {
    let user = require_content_manager(&state, &session).await?;

    input.validate().map_err(AppError::Validation)?;
    input.created_by = Some(user.id);

    let poem = Poetry::create(state.db(), input).await?;
    Ok(Json(poem))
}

/// Apply a partial update.
async fn update_poem(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(changes): Json<PoetryChanges>,
) -> AppResult<Json<Poetry>> {
    require_content_manager(&state, &session).await?;

    let poem = Poetry::update(state.db(), id, changes)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(poem))
}

/// Delete a poem.
async fn delete_poem(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    require_content_manager(&state, &session).await?;

    Poetry::delete(state.db(), id).await?;
    Ok(Json(json!({ "message": "Poetry deleted successfully" })))
}
