//! Saved rounds, kept in a small SQLite key-value table
//!
//! The round is stored as one JSON snapshot row (see [`snapshot`]). The app
//! only talks to [`SessionStore`]; [`Storage`] is the SQLite implementation.

pub mod snapshot;

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use crate::round::GameSession;

/// On-disk layout version.
/// - v1: meta and kv tables
const SCHEMA_VERSION: u32 = 1;

/// Key the round snapshot is stored under unless configured otherwise.
pub const DEFAULT_SNAPSHOT_KEY: &str = "golfScorecard";

/// Database file name inside the data directory.
pub const DB_FILE_NAME: &str = "fairway.db";

#[derive(Debug)]
pub enum StorageError {
    Database(rusqlite::Error),
    /// No home directory to put the database in
    NoDataDirectory,
    /// Written by a newer fairway; left untouched
    FutureSchemaVersion { found: u32, supported: u32 },
    CreateDirFailed(std::io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Database(e) => write!(f, "database error: {}", e),
            StorageError::NoDataDirectory => write!(f, "no data directory for this user"),
            StorageError::FutureSchemaVersion { found, supported } => {
                write!(
                    f,
                    "saved data uses layout v{}, this build reads up to v{}",
                    found, supported
                )
            }
            StorageError::CreateDirFailed(e) => write!(f, "cannot create data directory: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e)
    }
}

/// Durable home for the in-progress round.
///
/// `load` never fails: a missing or unreadable snapshot is simply "no saved
/// session". `save` and `clear` report errors, which callers may ignore.
pub trait SessionStore {
    fn load(&self) -> Option<GameSession>;
    fn save(&self, session: &GameSession) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// SQLite-backed [`SessionStore`].
pub struct Storage {
    conn: Connection,
    key: String,
}

impl Storage {
    /// Open `fairway.db` in the per-user data directory
    /// (`~/.local/share/fairway/` on Linux).
    pub fn open() -> Result<Self, StorageError> {
        Self::open_in(&Self::data_dir()?)
    }

    /// Open or create the database inside `dir`, creating the directory if needed.
    pub fn open_in(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir).map_err(StorageError::CreateDirFailed)?;
        let conn = Connection::open(dir.join(DB_FILE_NAME))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database. Nothing survives the process.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Open the database in `dir` (or the OS data directory), falling back to
    /// an in-memory database when that fails. The round still works; it just
    /// does not outlive the process.
    pub fn open_or_in_memory(dir: Option<&Path>) -> Result<Self, StorageError> {
        let opened = match dir {
            Some(dir) => Self::open_in(dir),
            None => Self::open(),
        };
        match opened {
            Ok(storage) => {
                if let Some(dir) = dir {
                    tracing::info!(dir = %dir.display(), "storage opened");
                }
                Ok(storage)
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved rounds unavailable; this round will not be kept");
                Self::open_in_memory()
            }
        }
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let storage = Storage {
            conn,
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Use a different key for the snapshot row.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "fairway")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read a raw value from the kv table.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite a raw value.
    pub fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now_millis()],
        )?;
        Ok(())
    }

    /// Delete a value. Deleting a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema_v1()?;
        } else if current_version > SCHEMA_VERSION {
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: u32 = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        Ok(version)
    }

    fn create_schema_v1(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- One row per saved value; the round snapshot is JSON text
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, now_millis()],
        )?;

        Ok(())
    }
}

impl SessionStore for Storage {
    fn load(&self) -> Option<GameSession> {
        let json = match self.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved round");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read saved round");
                return None;
            }
        };

        match snapshot::decode(&json) {
            Ok(session) => {
                tracing::info!(
                    started = session.is_started(),
                    entries = session.scores().len(),
                    "restored saved round"
                );
                Some(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable saved round");
                None
            }
        }
    }

    fn save(&self, session: &GameSession) -> Result<(), StorageError> {
        self.put(&self.key, &snapshot::encode(session))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove(&self.key)
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
