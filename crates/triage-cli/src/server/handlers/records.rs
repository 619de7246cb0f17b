//! Record handlers: draw the next record and file it as keep or skip.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use triage::{Decision, Lists, Record, Row};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for `GET /api/next`.
#[derive(Serialize)]
pub struct NextRecordResponse {
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Record>,
}

/// Request body for keep/skip.
#[derive(Deserialize)]
pub struct DecideRequest {
    /// Field values as edited in the form, keyed by header.
    #[serde(default)]
    pub row: Record,
    /// The row as it was before editing, when reclassifying from a list.
    #[serde(default)]
    pub original: Option<Row>,
}

/// Both decision lists, as returned after keep/skip.
#[derive(Serialize)]
pub struct ListsResponse {
    pub keep_rows: Vec<Row>,
    pub skip_rows: Vec<Row>,
}

impl From<Lists> for ListsResponse {
    fn from(lists: Lists) -> Self {
        Self {
            keep_rows: lists.kept,
            skip_rows: lists.skipped,
        }
    }
}

/// GET /api/next
pub async fn next_record(State(state): State<AppState>) -> Json<NextRecordResponse> {
    let mut session = state.session.write().await;
    let draw = session.draw_next();

    Json(NextRecordResponse {
        done: draw.is_done(),
        row: draw.into_record(),
    })
}

/// POST /api/keep
pub async fn keep_record(
    State(state): State<AppState>,
    body: Result<Json<DecideRequest>, JsonRejection>,
) -> Result<Json<ListsResponse>, ApiError> {
    let Json(req) = body?;
    Ok(decide(state, Decision::Keep, req).await)
}

/// POST /api/skip
pub async fn skip_record(
    State(state): State<AppState>,
    body: Result<Json<DecideRequest>, JsonRejection>,
) -> Result<Json<ListsResponse>, ApiError> {
    let Json(req) = body?;
    Ok(decide(state, Decision::Skip, req).await)
}

async fn decide(state: AppState, decision: Decision, req: DecideRequest) -> Json<ListsResponse> {
    let mut session = state.session.write().await;
    let lists = session.classify(decision, &req.row, req.original.as_deref());
    Json(lists.into())
}
