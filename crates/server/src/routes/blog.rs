//! Blog route handlers: public reads plus the admin CRUD surface.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Blog, BlogChanges, NewBlog};
use crate::routes::helpers::require_content_manager;
use crate::state::AppState;

/// Create the blog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/blogs", get(list_blogs))
        .route("/api/blogs/category/{category}", get(list_by_category))
        .route("/api/blogs/search/{query}", get(search_blogs))
        .route("/api/blogs/{id}", get(get_blog))
        .route("/api/admin/blogs", get(list_all_blogs).post(create_blog))
        .route(
            "/api/admin/blogs/{id}",
            patch(update_blog).delete(delete_blog),
        )
}

/// Published blog posts, newest first.
async fn list_blogs(State(state): State<AppState>) -> AppResult<Json<Vec<Blog>>> {
    let blogs = Blog::list(state.db(), Some(true)).await?;
    Ok(Json(blogs))
}

/// Single blog post by id; drafts are reachable by direct link.
async fn get_blog(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<Blog>> {
    let blog = Blog::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(blog))
}

/// Published blog posts in a category.
async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Blog>>> {
    let blogs = Blog::list_by_category(state.db(), &category).await?;
    Ok(Json(blogs))
}

/// Substring search over published blog posts.
async fn search_blogs(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<Blog>>> {
    let blogs = Blog::search(state.db(), &query).await?;
    Ok(Json(blogs))
}

/// All blog posts regardless of publish status.
async fn list_all_blogs(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<Blog>>> {
    require_content_manager(&state, &session).await?;

    let blogs = Blog::list(state.db(), None).await?;
    Ok(Json(blogs))
}

/// Create a blog post, attributed to the caller.
async fn create_blog(
    State(state): State<AppState>,
    session: Session,
    Json(mut input): Json<NewBlog>,
) -> AppResult<Json<Blog>> {
    let user = require_content_manager(&state, &session).await?;

    input.validate().map_err(AppError::Validation)?;
    input.created_by = Some(user.id);

    let blog = Blog::create(state.db(), input).await?;
    Ok(Json(blog))
}

/// Apply a partial update.
async fn update_blog(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(changes): Json<BlogChanges>,
) -> AppResult<Json<Blog>> {
    require_content_manager(&state, &session).await?;

    let blog = Blog::update(state.db(), id, changes)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(blog))
}

/// Delete a blog post.
async fn delete_blog(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    require_content_manager(&state, &session).await?;

    Blog::delete(state.db(), id).await?;
    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}
