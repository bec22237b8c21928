//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Resolve a DSN into a SQLite target and open a configured connection.
//! - Report connection failures as a single `DbError` family.
//!
//! # Invariants
//! - Opening never creates a database; the schema must already exist.
//! - Returned connections have `foreign_keys=ON` and run in autocommit mode.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;

pub use open::{open_db, open_db_in_memory, DsnTarget};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// DSN was blank after trim.
    EmptyDsn,
    /// DSN points at a file that does not exist.
    MissingDatabase(PathBuf),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::EmptyDsn => write!(f, "dsn cannot be empty"),
            Self::MissingDatabase(path) => {
                write!(f, "database file `{}` does not exist", path.display())
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::EmptyDsn => None,
            Self::MissingDatabase(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
