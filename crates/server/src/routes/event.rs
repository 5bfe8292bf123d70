//! Event route handlers: public reads plus the admin CRUD surface.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Event, EventChanges, NewEvent};
use crate::routes::helpers::require_content_manager;
use crate::state::AppState;

/// Create the event router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/category/{category}", get(list_by_category))
        .route("/api/events/search/{query}", get(search_events))
        .route("/api/events/{id}", get(get_event))
        .route("/api/admin/events", get(list_all_events).post(create_event))
        .route(
            "/api/admin/events/{id}",
            patch(update_event).delete(delete_event),
        )
}

/// Published events, newest first.
async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = Event::list(state.db(), Some(true)).await?;
    Ok(Json(events))
}

/// Single event by id. Drafts are reachable here by design: a direct link
/// works for whoever already has the id.
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = Event::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(event))
}

/// Published events in a category.
async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Event>>> {
    let events = Event::list_by_category(state.db(), &category).await?;
    Ok(Json(events))
}

/// Substring search over published events.
async fn search_events(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<Event>>> {
    let events = Event::search(state.db(), &query).await?;
    Ok(Json(events))
}

/// All events regardless of publish status.
async fn list_all_events(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<Event>>> {
    require_content_manager(&state, &session).await?;

    let events = Event::list(state.db(), None).await?;
    Ok(Json(events))
}

/// Create an event, attributed to the caller.
async fn create_event(
    State(state): State<AppState>,
    session: Session,
    Json(mut input): Json<NewEvent>,
) -> AppResult<Json<Event>> {
    let user = require_content_manager(&state, &session).await?;

    input.validate().map_err(AppError::Validation)?;
    input.created_by = Some(user.id);

    let event = Event::create(state.db(), input).await?;
    Ok(Json(event))
}

/// Apply a partial update.
async fn update_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(changes): Json<EventChanges>,
) -> AppResult<Json<Event>> {
    require_content_manager(&state, &session).await?;

    let event = Event::update(state.db(), id, changes)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(event))
}

/// Delete an event. Deleting an id that is already gone is not an error.
async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    require_content_manager(&state, &session).await?;

    Event::delete(state.db(), id).await?;
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
