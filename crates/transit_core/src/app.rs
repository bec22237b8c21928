//! Mode selection and single-invocation dispatch.
//!
//! # Responsibility
//! - Map the `--mode` flag onto exactly one operating flow.
//! - Run that flow against an already opened connection.
//! - Collect every failure kind into `AppError`.
//!
//! # Invariants
//! - Any mode string other than `listLines`/`listStations` selects
//!   `Mode::LoadAndWrite`, including the empty string.
//! - Exactly one flow runs per invocation.

use crate::db::DbError;
use crate::reader::{load_from_json, ReadError};
use crate::repo::network_repo::SqliteNetworkRepository;
use crate::service::load_service::{write_network, WriteError};
use crate::service::query_service::{QueryError, QueryService};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

/// Operating flow for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Print the lines serving a station.
    ListLines,
    /// Print the stations on a line.
    ListStations,
    /// Read the dataset file and insert it. Fallback for unrecognized modes.
    #[default]
    LoadAndWrite,
}

impl Mode {
    pub fn from_flag(value: &str) -> Self {
        match value {
            "listLines" => Self::ListLines,
            "listStations" => Self::ListStations,
            _ => Self::LoadAndWrite,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListLines => "list_lines",
            Self::ListStations => "list_stations",
            Self::LoadAndWrite => "load_and_write",
        }
    }
}

/// Parameters of one invocation. Unused fields for the chosen mode are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub station: String,
    pub line: String,
    pub data_path: PathBuf,
}

/// Process-level failure. Every variant is fatal to the invocation.
#[derive(Debug)]
pub enum AppError {
    Connect(DbError),
    Read(ReadError),
    Write(WriteError),
    Query(QueryError),
}

impl AppError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect_error",
            Self::Read(err) => err.code(),
            Self::Write(_) => "write_error",
            Self::Query(_) => "query_error",
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "failed to connect to database: {err}"),
            Self::Read(err) => write!(f, "load from json: {err}"),
            Self::Write(err) => write!(f, "write to database: {err}"),
            Self::Query(err) => write!(f, "lookup failed: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) => Some(err),
            Self::Read(err) => Some(err),
            Self::Write(err) => Some(err),
            Self::Query(err) => Some(err),
        }
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Connect(value)
    }
}

impl From<ReadError> for AppError {
    fn from(value: ReadError) -> Self {
        Self::Read(value)
    }
}

impl From<WriteError> for AppError {
    fn from(value: WriteError) -> Self {
        Self::Write(value)
    }
}

impl From<QueryError> for AppError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

/// Runs the flow selected by `invocation.mode`, printing lookups to `out`.
pub fn run<W: Write>(
    conn: &Connection,
    invocation: &Invocation,
    out: &mut W,
) -> AppResult<()> {
    info!(
        "event=dispatch module=app status=start mode={}",
        invocation.mode.as_str()
    );
    let repo = SqliteNetworkRepository::new(conn);

    match invocation.mode {
        Mode::ListLines => {
            QueryService::new(repo).print_lines_for_station(&invocation.station, out)?;
        }
        Mode::ListStations => {
            QueryService::new(repo).print_stations_for_line(&invocation.line, out)?;
        }
        Mode::LoadAndWrite => {
            let data = load_from_json(&invocation.data_path)?;
            write_network(&repo, &data)?;
        }
    }

    info!(
        "event=dispatch module=app status=ok mode={}",
        invocation.mode.as_str()
    );
    Ok(())
}
