//! Image upload for content managers.
//!
//! Accepts a single multipart `file` field, sniffs the content type from
//! the bytes (never trusting the client's filename), writes it under the
//! uploads directory, and returns the public URL to store on a content
//! item.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::routes::helpers::require_content_manager;
use crate::state::AppState;

/// Maximum upload size (5 MB).
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Image MIME types accepted for upload.
const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Create the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Handle an image upload.
async fn upload_image(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    require_content_manager(&state, &session).await?;

    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            data = Some(bytes.to_vec());
            break;
        }
    }

    let Some(data) = data else {
        return Err(AppError::Validation("no file uploaded".to_string()));
    };

    let kind = infer::get(&data)
        .ok_or_else(|| AppError::Validation("unrecognized file type".to_string()))?;

    if !ALLOWED_IMAGE_TYPES.contains(&kind.mime_type()) {
        return Err(AppError::Validation(format!(
            "unsupported file type: {}",
            kind.mime_type()
        )));
    }

    let filename = format!("{}.{}", Uuid::now_v7().simple(), kind.extension());
    let uploads_dir = state.config().uploads_dir.clone();
    let path = uploads_dir.join(&filename);

    fs::create_dir_all(&uploads_dir)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let mut file = fs::File::create(&path)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    file.write_all(&data)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    file.flush()
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    tracing::debug!(path = ?path, size = data.len(), "image uploaded");

    let url = format!(
        "{}/{filename}",
        state.config().files_url.trim_end_matches('/')
    );
    Ok(Json(json!({ "url": url })))
}
