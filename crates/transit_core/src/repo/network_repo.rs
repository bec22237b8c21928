//! Network repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert station rows and `(line, station)` membership rows.
//! - Stream lookup results one row at a time.
//!
//! # Invariants
//! - Inserts run in autocommit mode; a failed insert leaves earlier rows.
//! - Lookup statements are scoped to the call and released on every exit path.
//! - SQL `NULL` in a joined column means "no match" and is not visited.

use crate::db::DbError;
use crate::model::network::Station;
use log::debug;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INSERT_STATION_SQL: &str =
    "INSERT INTO stations (id, name, longitude, latitude) VALUES (?1, ?2, ?3, ?4);";

const INSERT_MEMBERSHIP_SQL: &str =
    "INSERT INTO line_has_stations (line_name, station_id) VALUES (?1, ?2);";

const LINES_FOR_STATION_SQL: &str = "SELECT lhs.line_name
FROM stations
LEFT JOIN line_has_stations lhs ON stations.id = lhs.station_id
WHERE stations.name = ?1";

const STATIONS_FOR_LINE_SQL: &str = "SELECT s.name
FROM line_has_stations
LEFT JOIN stations s ON line_has_stations.station_id = s.id
WHERE line_has_stations.line_name = ?1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for network persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for network writes and membership lookups.
///
/// Visitors receive one decoded name per row. A visitor error stops the scan
/// and is returned unchanged; repository errors are converted into `E`.
pub trait NetworkRepository {
    fn insert_station(&self, station: &Station) -> RepoResult<()>;
    fn insert_membership(&self, line_name: &str, station_id: &str) -> RepoResult<()>;
    fn visit_lines_for_station<E, F>(&self, station_name: &str, visit: F) -> Result<(), E>
    where
        E: From<RepoError>,
        F: FnMut(String) -> Result<(), E>;
    fn visit_stations_for_line<E, F>(&self, line_name: &str, visit: F) -> Result<(), E>
    where
        E: From<RepoError>,
        F: FnMut(String) -> Result<(), E>;
}

/// SQLite-backed network repository.
pub struct SqliteNetworkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNetworkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn visit_names<E, F>(&self, sql: &str, key: &str, mut visit: F) -> Result<(), E>
    where
        E: From<RepoError>,
        F: FnMut(String) -> Result<(), E>,
    {
        let mut stmt = self.conn.prepare(sql).map_err(RepoError::from)?;
        let mut rows = stmt.query([key]).map_err(RepoError::from)?;

        while let Some(row) = rows.next().map_err(RepoError::from)? {
            match row.get::<_, Option<String>>(0).map_err(RepoError::from)? {
                Some(name) => visit(name)?,
                None => debug!("event=lookup_row module=repo status=skipped reason=null_join"),
            }
        }

        Ok(())
    }
}

impl NetworkRepository for SqliteNetworkRepository<'_> {
    fn insert_station(&self, station: &Station) -> RepoResult<()> {
        self.conn.execute(
            INSERT_STATION_SQL,
            params![
                station.id.as_str(),
                station.name.as_str(),
                station.longitude,
                station.latitude,
            ],
        )?;
        Ok(())
    }

    fn insert_membership(&self, line_name: &str, station_id: &str) -> RepoResult<()> {
        self.conn
            .execute(INSERT_MEMBERSHIP_SQL, params![line_name, station_id])?;
        Ok(())
    }

    fn visit_lines_for_station<E, F>(&self, station_name: &str, visit: F) -> Result<(), E>
    where
        E: From<RepoError>,
        F: FnMut(String) -> Result<(), E>,
    {
        self.visit_names(LINES_FOR_STATION_SQL, station_name, visit)
    }

    fn visit_stations_for_line<E, F>(&self, line_name: &str, visit: F) -> Result<(), E>
    where
        E: From<RepoError>,
        F: FnMut(String) -> Result<(), E>,
    {
        self.visit_names(STATIONS_FOR_LINE_SQL, line_name, visit)
    }
}
