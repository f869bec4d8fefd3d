//! File-backed [`StateStore`] — one JSON record, replaced atomically.
//!
//! The record carries the documented field names (`power`, `brightness`,
//! `warmth`) plus the time of the last save. A missing, unreadable, or
//! corrupt file is a recoverable condition: `load` falls back to the
//! default state and logs a warning. `save` writes to a temporary sibling
//! and renames it over the target so a crash mid-write never leaves a
//! half-written record.

mod error;

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lumo_app::ports::StateStore;
use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;
use lumo_domain::warmth::Warmth;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::StorageError;

/// On-disk shape of the persisted record.
#[derive(Debug, Serialize, Deserialize)]
struct StateRecord {
    power: bool,
    brightness: u8,
    warmth: Warmth,
    updated_at: DateTime<Utc>,
}

impl StateRecord {
    fn from_state(state: &LampState) -> Self {
        Self {
            power: state.power,
            brightness: state.brightness,
            warmth: state.warmth,
            updated_at: Utc::now(),
        }
    }

    /// Reject records that violate the domain invariant, so a hand-edited
    /// file cannot smuggle an out-of-range brightness into the system.
    fn into_state(self) -> Option<LampState> {
        if self.brightness > 100 {
            return None;
        }
        Some(LampState {
            power: self.power,
            brightness: self.brightness,
            warmth: self.warmth,
        })
    }
}

/// JSON-file implementation of the [`StateStore`] port.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Create a store persisting to `path`, creating the containing
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the containing directory cannot
    /// be created — the one persistence condition treated as fatal, and
    /// only at startup.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// The path of the persisted record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }

    async fn read_state(&self) -> LampState {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file yet; using default");
                return LampState::default();
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read state file; using default"
                );
                return LampState::default();
            }
        };

        match serde_json::from_str::<StateRecord>(&content) {
            Ok(record) => record.into_state().unwrap_or_else(|| {
                warn!(
                    path = %self.path.display(),
                    "state file holds an out-of-range record; using default"
                );
                LampState::default()
            }),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "state file is corrupt; using default"
                );
                LampState::default()
            }
        }
    }

    async fn write_state(&self, state: &LampState) -> Result<(), StorageError> {
        let record = StateRecord::from_state(state);
        let json = serde_json::to_string_pretty(&record)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> impl Future<Output = Result<LampState, LumoError>> + Send {
        async { Ok(self.read_state().await) }
    }

    fn save(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send {
        let state = *state;
        async move {
            self.write_state(&state).await?;
            Ok(())
        }
    }
}
