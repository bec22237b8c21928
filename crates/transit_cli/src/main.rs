//! Command-line entry point for the transit network loader.
//!
//! # Responsibility
//! - Parse flags, initialize logging and open the store connection.
//! - Dispatch exactly one mode and map any failure to exit status 1.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use transit_core::db::open_db;
use transit_core::{default_log_level, init_logging, run, AppError, Invocation, Mode};

/// Loads a transit network dataset into SQL storage, or queries it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Running mode: `listLines`, `listStations`, anything else loads data.
    #[arg(long, default_value = "")]
    mode: String,

    /// The name of the station (for `listLines`).
    #[arg(long, default_value = "")]
    station: String,

    /// The name of the line (for `listStations`).
    #[arg(long, default_value = "")]
    line: String,

    /// The DSN of the SQLite database, e.g. `sqlite://tube.db`.
    #[arg(long, env = "TRANSIT_DSN", default_value = "")]
    dsn: String,

    /// The path of the data JSON file (for load mode).
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files, in addition to stderr.
    #[arg(long)]
    log_dir: Option<String>,
}

impl Args {
    fn invocation(&self) -> Invocation {
        Invocation {
            mode: Mode::from_flag(&self.mode),
            station: self.station.clone(),
            line: self.line.clone(),
            data_path: self.data_path.clone().unwrap_or_default(),
        }
    }
}

const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, args.log_dir.as_deref()) {
        eprintln!("transit-loader: {err}");
        return ExitCode::from(EXIT_FAILURE);
    }

    ExitCode::from(exit_status(&execute(&args)))
}

/// Reports a failed invocation and maps it to the process exit status.
fn exit_status(result: &Result<(), AppError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!(
                "event=app_exit module=cli status=error error_code={} error={}",
                err.code(),
                err
            );
            eprintln!("transit-loader: {err}");
            EXIT_FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), AppError> {
    let conn = open_db(&args.dsn)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&conn, &args.invocation(), &mut out)
}
