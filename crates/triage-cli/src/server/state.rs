//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use triage::ReviewSession;

/// Shared application state.
///
/// Every mutating handler takes the write lock for the whole
/// read-modify-save, so requests within one process never interleave.
#[derive(Clone)]
pub struct AppState {
    /// The review session (queue state + snapshot store).
    pub session: Arc<RwLock<ReviewSession>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(session: ReviewSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }
}
