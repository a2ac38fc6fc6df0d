//! SQLite bootstrap for the persistent key-value store.
//!
//! # Responsibility
//! - Open file or in-memory connections with `kv_entries` migrated.
//!
//! # Invariants
//! - No caller reads or writes entries before migrations succeed.
//!
//! # Errors
//! - `Sqlite`: the file cannot be opened, is not a database, or a
//!   migration statement fails. A failed migration rolls back as a whole,
//!   so the recorded `user_version` never runs ahead of the schema.
//! - `UnsupportedSchemaVersion`: the file records a `user_version` above
//!   `migrations::latest_version()`. It is left untouched.
//!
//! `SqliteKeyValueStore::try_new` adds its own `SchemaMismatch` check for
//! connections that did not come through `open_db`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Open, pragma or migration failure reported by SQLite.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build; it is never downgraded.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "kv store sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
