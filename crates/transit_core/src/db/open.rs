//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Map a DSN string onto a file, URI or in-memory SQLite target.
//! - Configure connection pragmas required by the loader.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - File targets are opened read-write without `SQLITE_OPEN_CREATE`.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Instant;

const SQLITE_SCHEME_PREFIXES: &[&str] = &["sqlite://", "sqlite:"];

/// Resolved location of a SQLite database named by a DSN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsnTarget<'a> {
    /// Private in-memory database (`:memory:`).
    Memory,
    /// SQLite URI passed through untouched (`file:...`).
    Uri(&'a str),
    /// Plain filesystem path, with any `sqlite:` scheme stripped.
    File(&'a str),
}

impl<'a> DsnTarget<'a> {
    /// Parses a DSN string.
    ///
    /// # Errors
    /// - Returns `DbError::EmptyDsn` when the DSN (or the path after the
    ///   scheme) is blank.
    pub fn parse(dsn: &'a str) -> DbResult<Self> {
        let trimmed = dsn.trim();
        if trimmed.is_empty() {
            return Err(DbError::EmptyDsn);
        }
        if trimmed == ":memory:" {
            return Ok(Self::Memory);
        }
        if trimmed.starts_with("file:") {
            return Ok(Self::Uri(trimmed));
        }

        let path = SQLITE_SCHEME_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);
        match path {
            "" => Err(DbError::EmptyDsn),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::File(path)),
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Uri(_) => "uri",
            Self::File(_) => "file",
        }
    }
}

/// Opens the database named by `dsn`.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - Returns `DbError::EmptyDsn` for a blank DSN.
/// - Returns `DbError::MissingDatabase` when a file target does not exist.
/// - Returns `DbError::Sqlite` when SQLite refuses the open or pragma setup.
pub fn open_db(dsn: &str) -> DbResult<Connection> {
    let started_at = Instant::now();
    let target = match DsnTarget::parse(dsn) {
        Ok(target) => target,
        Err(err) => {
            error!("event=db_open module=db status=error error_code=dsn_invalid error={err}");
            return Err(err);
        }
    };
    let mode = target.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match target {
        DsnTarget::Memory => Connection::open_in_memory().map_err(DbError::from),
        DsnTarget::Uri(uri) => open_existing(uri),
        DsnTarget::File(path) => {
            if Path::new(path).exists() {
                open_existing(path)
            } else {
                Err(DbError::MissingDatabase(path.into()))
            }
        }
    };

    match opened.and_then(|conn| bootstrap_connection(&conn).map(|()| conn)) {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an empty in-memory database with loader pragmas applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db(":memory:")
}

fn open_existing(target: &str) -> DbResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Ok(Connection::open_with_flags(target, flags)?)
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}
