//! Membership lookup service.
//!
//! # Responsibility
//! - Run one lookup and print a header followed by one `- name` per row.
//!
//! # Invariants
//! - The header is always printed first, even when nothing matches.
//! - No match is an empty result, never an error.
//! - Rows are written as they are read; the result set is not collected.

use crate::repo::network_repo::{NetworkRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::time::Instant;

const LINES_HEADER: &str = "Lines:";
const STATIONS_HEADER: &str = "Stations:";

pub type QueryResult<T> = Result<T, QueryError>;

/// Lookup failure: store rejected the query, a row failed to decode, or the
/// output sink refused a write.
#[derive(Debug)]
pub enum QueryError {
    Repo(RepoError),
    Output(std::io::Error),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "query: {err}"),
            Self::Output(err) => write!(f, "write output: {err}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<RepoError> for QueryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<std::io::Error> for QueryError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

/// Use-case service for the two membership lookups.
pub struct QueryService<R: NetworkRepository> {
    repo: R,
}

impl<R: NetworkRepository> QueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Prints the names of all lines serving stations named `station_name`.
    ///
    /// Returns the number of line names printed.
    pub fn print_lines_for_station<W: Write>(
        &self,
        station_name: &str,
        out: &mut W,
    ) -> QueryResult<usize> {
        self.print_lookup("lines_for_station", LINES_HEADER, out, |visit| {
            self.repo.visit_lines_for_station(station_name, visit)
        })
    }

    /// Prints the names of all stations visited by lines named `line_name`.
    ///
    /// Returns the number of station names printed.
    pub fn print_stations_for_line<W: Write>(
        &self,
        line_name: &str,
        out: &mut W,
    ) -> QueryResult<usize> {
        self.print_lookup("stations_for_line", STATIONS_HEADER, out, |visit| {
            self.repo.visit_stations_for_line(line_name, visit)
        })
    }

    fn print_lookup<W, L>(
        &self,
        lookup: &str,
        header: &str,
        out: &mut W,
        run: L,
    ) -> QueryResult<usize>
    where
        W: Write,
        L: FnOnce(&mut dyn FnMut(String) -> QueryResult<()>) -> QueryResult<()>,
    {
        let started_at = Instant::now();
        info!("event=lookup module=service status=start lookup={lookup}");

        let mut printed = 0usize;
        let result = writeln!(out, "{header}")
            .map_err(QueryError::from)
            .and_then(|()| {
                run(&mut |name: String| -> QueryResult<()> {
                    writeln!(out, "- {name}")?;
                    printed += 1;
                    Ok(())
                })
            })
            .and_then(|()| out.flush().map_err(QueryError::from));

        match result {
            Ok(()) => {
                info!(
                    "event=lookup module=service status=ok lookup={lookup} rows={printed} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(printed)
            }
            Err(err) => {
                error!(
                    "event=lookup module=service status=error lookup={lookup} rows={printed} error={err}"
                );
                Err(err)
            }
        }
    }
}
