//! Two-phase dataset writer.
//!
//! # Responsibility
//! - Insert every station, then every `(line, station)` membership pair.
//! - Tag failures with the phase that produced them.
//!
//! # Invariants
//! - The stations phase finishes before the membership phase begins.
//! - The first failed insert aborts the write; nothing is retried or rolled back.

use crate::model::network::NetworkData;
use crate::repo::network_repo::{NetworkRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type WriteResult<T> = Result<T, WriteError>;

/// Write phase, named after the table it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    Stations,
    LineHasStations,
}

impl WritePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stations => "stations",
            Self::LineHasStations => "line_has_stations",
        }
    }
}

impl Display for WritePhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert failure tagged with its phase.
#[derive(Debug)]
pub struct WriteError {
    pub phase: WritePhase,
    pub source: RepoError,
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "write to {}: {}", self.phase, self.source)
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Row counts produced by a successful write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub stations_written: usize,
    pub memberships_written: usize,
}

/// Writes `data` through `repo` in two sequential phases.
///
/// # Errors
/// - `WriteError` with `WritePhase::Stations` when a station insert fails.
/// - `WriteError` with `WritePhase::LineHasStations` when a membership insert
///   fails. All stations are already persisted at that point.
pub fn write_network<R: NetworkRepository>(
    repo: &R,
    data: &NetworkData,
) -> WriteResult<WriteSummary> {
    let started_at = Instant::now();
    info!(
        "event=network_write module=service status=start stations={} memberships={}",
        data.stations.len(),
        data.membership_count()
    );

    let mut summary = WriteSummary::default();

    for station in &data.stations {
        if let Err(source) = repo.insert_station(station) {
            error!(
                "event=network_write module=service status=error phase={} station={:?} written={} error={}",
                WritePhase::Stations,
                station,
                summary.stations_written,
                source
            );
            return Err(WriteError {
                phase: WritePhase::Stations,
                source,
            });
        }
        summary.stations_written += 1;
    }

    for pair in data.membership_pairs() {
        if let Err(source) = repo.insert_membership(pair.line_name, pair.station_id) {
            error!(
                "event=network_write module=service status=error phase={} line={:?} station_id={:?} written={} error={}",
                WritePhase::LineHasStations,
                pair.line_name,
                pair.station_id,
                summary.memberships_written,
                source
            );
            return Err(WriteError {
                phase: WritePhase::LineHasStations,
                source,
            });
        }
        summary.memberships_written += 1;
    }

    info!(
        "event=network_write module=service status=ok stations={} memberships={} duration_ms={}",
        summary.stations_written,
        summary.memberships_written,
        started_at.elapsed().as_millis()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{write_network, WritePhase};
    use crate::db::DbError;
    use crate::model::network::{Line, NetworkData, Station};
    use crate::repo::network_repo::{NetworkRepository, RepoError, RepoResult};
    use std::cell::RefCell;

    /// Records calls and fails the n-th insert of the chosen kind.
    #[derive(Default)]
    struct RecordingRepo {
        calls: RefCell<Vec<String>>,
        fail_station_at: Option<usize>,
        fail_membership_at: Option<usize>,
    }

    impl RecordingRepo {
        fn fail() -> RepoError {
            RepoError::Db(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|call| call.starts_with(prefix))
                .count()
        }
    }

    impl NetworkRepository for RecordingRepo {
        fn insert_station(&self, station: &Station) -> RepoResult<()> {
            if self.fail_station_at == Some(self.count("station:")) {
                return Err(Self::fail());
            }
            self.calls.borrow_mut().push(format!("station:{}", station.id));
            Ok(())
        }

        fn insert_membership(&self, line_name: &str, station_id: &str) -> RepoResult<()> {
            if self.fail_membership_at == Some(self.count("member:")) {
                return Err(Self::fail());
            }
            self.calls
                .borrow_mut()
                .push(format!("member:{line_name}/{station_id}"));
            Ok(())
        }

        fn visit_lines_for_station<E, F>(&self, _: &str, _: F) -> Result<(), E>
        where
            E: From<RepoError>,
            F: FnMut(String) -> Result<(), E>,
        {
            Ok(())
        }

        fn visit_stations_for_line<E, F>(&self, _: &str, _: F) -> Result<(), E>
        where
            E: From<RepoError>,
            F: FnMut(String) -> Result<(), E>,
        {
            Ok(())
        }
    }

    fn sample() -> NetworkData {
        NetworkData {
            stations: vec![
                Station::new("s1", "Bank", -0.0886, 51.5133),
                Station::new("s2", "Liverpool Street", -0.0823, 51.5178),
            ],
            lines: vec![Line::new("Central", ["s1", "s2"])],
        }
    }

    #[test]
    fn stations_phase_runs_before_memberships() {
        let repo = RecordingRepo::default();
        let summary = write_network(&repo, &sample()).unwrap();

        assert_eq!(summary.stations_written, 2);
        assert_eq!(summary.memberships_written, 2);
        assert_eq!(
            *repo.calls.borrow(),
            vec![
                "station:s1",
                "station:s2",
                "member:Central/s1",
                "member:Central/s2"
            ]
        );
    }

    #[test]
    fn station_failure_aborts_before_memberships() {
        let repo = RecordingRepo {
            fail_station_at: Some(1),
            ..RecordingRepo::default()
        };
        let err = write_network(&repo, &sample()).unwrap_err();

        assert_eq!(err.phase, WritePhase::Stations);
        assert!(err.to_string().starts_with("write to stations:"));
        assert_eq!(*repo.calls.borrow(), vec!["station:s1"]);
    }

    #[test]
    fn membership_failure_is_tagged_and_stops() {
        let repo = RecordingRepo {
            fail_membership_at: Some(0),
            ..RecordingRepo::default()
        };
        let err = write_network(&repo, &sample()).unwrap_err();

        assert_eq!(err.phase, WritePhase::LineHasStations);
        assert!(err.to_string().starts_with("write to line_has_stations:"));
        assert_eq!(repo.count("member:"), 0);
        assert_eq!(repo.count("station:"), 2);
    }
}
