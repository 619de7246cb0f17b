//! Upload handler: ingest a CSV/XLSX table sent from the browser.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use triage::Row;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the table.
const FILE_FIELD: &str = "file";

/// Response after a successful upload.
#[derive(Serialize)]
pub struct UploadResponse {
    pub headers: Vec<String>,
    pub total_records: usize,
    pub keep_rows: Vec<Row>,
    pub skip_rows: Vec<Row>,
}

/// POST /api/upload
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        upload = Some((name, bytes));
        break;
    }

    let (name, bytes) = upload.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    info!(file = %name, size = bytes.len(), "Received upload");

    let mut session = state.session.write().await;
    let summary = session.ingest_upload(&name, &bytes)?;
    let snapshot = session.snapshot();

    Ok(Json(UploadResponse {
        headers: summary.headers,
        total_records: summary.pending,
        keep_rows: snapshot.kept,
        skip_rows: snapshot.skipped,
    }))
}
