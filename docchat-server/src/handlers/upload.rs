use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use shared::models::{UPLOAD_FIELD, UploadResponse};
use tracing::{debug, instrument, warn};

use crate::{app_state::AppState, http::error::AppResult, services::UploadError};

/// `POST /upload`: validates and stores every `files` part in order.
///
/// Parts stored before a rejected one stay on disk.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let uploads = &state.uploads;
    uploads.ensure_directory().await?;

    let mut uploaded = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "ignoring multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);

        if let Err(err) = uploads.validate(&file_name, content_type.as_deref()) {
            metrics::counter!("uploads_total", "status" => "rejected").increment(1);
            warn!(file_name = %file_name, content_type = ?content_type, "rejected upload");
            return Err(err.into());
        }

        let path = uploads.save(&file_name, field).await?;
        metrics::counter!("uploads_total", "status" => "ok").increment(1);
        uploaded.push(path.display().to_string());
    }

    if uploaded.is_empty() {
        return Err(UploadError::MissingFiles.into());
    }

    Ok(Json(UploadResponse { uploaded }))
}
