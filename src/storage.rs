//! Local persistence for generated plans.
//!
//! Everything lives in one `SQLite` file under the storage root:
//!
//! ```text
//! <root>/
//!   plans.sqlite     # One row per saved plan; plan JSON is zstd-compressed
//! ```

mod plan;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

pub use plan::{ArchivedPlan, PlanSummary};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("plan not found: {0}")]
    PlanNotFound(Uuid),

    #[error("plan already exists: {0}")]
    PlanAlreadyExists(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt archive: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const DB_FILE: &str = "plans.sqlite";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS plan (
    id           TEXT PRIMARY KEY,
    fingerprint  TEXT NOT NULL,
    origin       TEXT NOT NULL,
    destination  TEXT NOT NULL,
    departure    TEXT NOT NULL,
    direction    TEXT NOT NULL,
    shift_hours  REAL NOT NULL,
    days         INTEGER NOT NULL,
    saved_at     TEXT NOT NULL,
    request      TEXT NOT NULL,
    body         BLOB NOT NULL
);
CREATE INDEX IF NOT EXISTS plan_fingerprint ON plan (fingerprint);
";

/// Local `SQLite` storage for saved plans.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.jetlag/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".jetlag"))
    }

    /// Opens the archive, creating the schema on first use.
    fn open_db(&self) -> Result<Connection> {
        let conn = Connection::open(self.root.join(DB_FILE))?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }
}
