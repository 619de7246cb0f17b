//! CSV download of kept records.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Local;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/download
pub async fn download(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let session = state.session.read().await;
    let csv = session.export_csv()?;
    let file_name = session.export_file_name(Local::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    ))
}
