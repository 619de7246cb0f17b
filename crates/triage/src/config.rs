//! Session configuration.

use std::path::PathBuf;

use crate::export::DEFAULT_EXPORT_PREFIX;
use crate::input::ParserConfig;

/// Default location of the state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "triage-state.json";

/// Configuration for a review session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where the state snapshot is persisted.
    pub state_path: PathBuf,
    /// Prefix for export file names.
    pub export_prefix: String,
    /// Parser configuration for uploads.
    pub parser: ParserConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_FILE),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            parser: ParserConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state file path.
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Set the export file name prefix.
    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }
}
