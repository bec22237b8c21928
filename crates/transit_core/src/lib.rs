//! Core logic for the transit network loader.
//! Loads stations and lines from JSON into SQL storage and answers the two
//! membership lookups (lines at a station, stations on a line).

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod reader;
pub mod repo;
pub mod service;

pub use app::{run, AppError, AppResult, Invocation, Mode};
pub use logging::{default_log_level, init_logging};
pub use model::network::{Line, MembershipPair, NetworkData, Station};
pub use reader::{load_from_json, parse_network, ReadError, ReadResult};
pub use repo::network_repo::{NetworkRepository, RepoError, RepoResult, SqliteNetworkRepository};
pub use service::load_service::{write_network, WriteError, WritePhase, WriteResult, WriteSummary};
pub use service::query_service::{QueryError, QueryResult, QueryService};

