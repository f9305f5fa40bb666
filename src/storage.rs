//! Storage layer for td
//!
//! The whole task list is persisted as one JSON document at a single path,
//! by default `tasks.json` in the platform data directory. Writes use the
//! temp-file + rename pattern so a crash mid-save leaves either the previous
//! snapshot or the new one, never a torn file.
//!
//! Loading never fails to the caller: a missing file, unparseable data, or
//! an unknown schema version is logged and treated as an empty list. Saved
//! task data is not user input; refusing to start over it would strand the
//! user.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;
use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::{self, TaskSnapshot};

/// Default file name for the persisted task list
pub const TASKS_FILE: &str = "tasks.json";

/// Storage manager for the persisted task snapshot
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the task list document
    data_file: PathBuf,
}

impl Storage {
    /// Create storage writing to an explicit path
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Create storage at the platform default location
    /// (e.g. `~/.local/share/td/tasks.json` on Linux)
    pub fn default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "td")?;
        Some(Self::new(dirs.data_dir().join(TASKS_FILE)))
    }

    /// Path to the task list document
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn lock_path(&self) -> PathBuf {
        self.data_file.with_extension("lock")
    }

    /// Load the most recently saved snapshot.
    ///
    /// Never raises: missing or unreadable data yields an empty snapshot.
    pub fn load(&self) -> TaskSnapshot {
        if !self.data_file.exists() {
            return TaskSnapshot::empty();
        }

        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    path = %self.data_file.display(),
                    error = %err,
                    "failed to read saved tasks, starting empty"
                );
                return TaskSnapshot::empty();
            }
        };

        match task::parse_saved(&content) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(
                    path = %self.data_file.display(),
                    error = %err,
                    "saved tasks unreadable, starting empty"
                );
                TaskSnapshot::empty()
            }
        }
    }

    /// Persist a snapshot, replacing the previous one.
    ///
    /// Holds the file lock for the duration of the write so two td
    /// processes cannot interleave.
    pub fn save(&self, snapshot: &TaskSnapshot) -> Result<()> {
        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        self.write_atomic(json.as_bytes())
    }

    /// Write data atomically using temp file + rename
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent)?;
        }

        // Temp file in the same directory so the rename stays atomic
        let temp_path = self.data_file.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.data_file)?;

        Ok(())
    }
}
