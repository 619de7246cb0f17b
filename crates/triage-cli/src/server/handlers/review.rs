//! Review state handlers: progress view and reset.

use axum::{extract::State, Json};
use serde::Serialize;

use triage::{Row, SourceMetadata};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for `GET /api/state`.
#[derive(Serialize)]
pub struct StateResponse {
    /// Rows not yet drawn.
    pub total: usize,
    pub kept: usize,
    pub skipped: usize,
    pub headers: Vec<String>,
    pub keep_rows: Vec<Row>,
    pub skip_rows: Vec<Row>,
    pub in_flight: bool,
    pub source: Option<SourceInfo>,
}

#[derive(Serialize)]
pub struct SourceInfo {
    pub file: String,
    pub format: String,
    pub row_count: usize,
    pub ingested_at: String,
}

impl From<SourceMetadata> for SourceInfo {
    fn from(source: SourceMetadata) -> Self {
        Self {
            file: source.file,
            format: source.format,
            row_count: source.row_count,
            ingested_at: source.ingested_at.to_rfc3339(),
        }
    }
}

/// Response for `POST /api/reset`.
#[derive(Serialize)]
pub struct ResetResponse {
    pub message: String,
}

/// GET /api/state
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let session = state.session.read().await;
    let snapshot = session.snapshot();

    Json(StateResponse {
        total: snapshot.pending,
        kept: snapshot.kept_count,
        skipped: snapshot.skipped_count,
        headers: snapshot.headers,
        keep_rows: snapshot.kept,
        skip_rows: snapshot.skipped,
        in_flight: snapshot.in_flight,
        source: snapshot.source.map(SourceInfo::from),
    })
}

/// POST /api/reset
pub async fn reset_state(State(state): State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.reset()?;

    Ok(Json(ResetResponse {
        message: "State file deleted.".to_string(),
    }))
}
