//! Snapshot stores: where the queue state is persisted between runs.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{Result, TriageError};
use crate::queue::QueueState;

/// Persistence for the full queue state.
///
/// `load` never fails: a missing or unreadable snapshot is "no state".
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved state, if any.
    fn load(&self) -> Option<QueueState>;

    /// Replace the saved state.
    fn save(&self, state: &QueueState) -> Result<()>;

    /// Remove the saved state. Succeeds when nothing is saved.
    fn delete(&self) -> Result<()>;

    /// Human-readable location for logs and status output.
    fn location(&self) -> String;
}

/// Stores the state as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a state file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> Result<QueueState> {
        let file = File::open(&self.path).map_err(|e| TriageError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let state = serde_json::from_reader(reader)?;
        Ok(state)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<QueueState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No state file, starting empty");
            return None;
        }

        match self.read() {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable state file");
                None
            }
        }
    }

    fn save(&self, state: &QueueState) -> Result<()> {
        let path = &self.path;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    TriageError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            TriageError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, state).map_err(|e| {
            TriageError::Persistence(format!("Failed to serialize state: {}", e))
        })?;

        // Small states sit in the buffer until here
        writer.flush().map_err(|e| {
            TriageError::Persistence(format!(
                "Failed to write '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), pending = state.pending.len(), "Saved state");
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TriageError::Persistence(format!(
                "Failed to delete '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the state in memory only; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<QueueState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `state`.
    pub fn with_state(state: QueueState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
        }
    }

    /// Number of rows pending in the saved state, if one is saved.
    pub fn saved_pending(&self) -> Option<usize> {
        self.load().map(|s| s.pending.len())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<QueueState> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }

    fn save(&self, state: &QueueState) -> Result<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| TriageError::Persistence("Memory store lock poisoned".to_string()))?;
        *saved = Some(state.clone());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| TriageError::Persistence("Memory store lock poisoned".to_string()))?;
        *saved = None;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
