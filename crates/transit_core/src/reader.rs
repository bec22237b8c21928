//! JSON data reader for network datasets.
//!
//! # Responsibility
//! - Read one dataset file and parse it into `NetworkData`.
//! - Distinguish unreadable files from malformed content.
//!
//! # Invariants
//! - Only structural JSON parsing is performed; no field validation.
//! - The document and every station/line record must be JSON objects;
//!   array-shaped records are rejected rather than read by position.
//! - A `null` document parses into an empty dataset.

use crate::model::network::NetworkData;
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type ReadResult<T> = Result<T, ReadError>;

/// Data reader failure.
#[derive(Debug)]
pub enum ReadError {
    /// Path is missing or unreadable.
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Content is not JSON of the expected shape.
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

impl ReadError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::File { .. } => "file_error",
            Self::Parse { .. } => "parse_error",
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path, source } => {
                write!(f, "open data file `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => write!(f, "unmarshal json from `{}`: {source}", path.display()),
            Self::Parse { path: None, source } => write!(f, "unmarshal json: {source}"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::File { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Reads and parses the dataset at `path`.
///
/// # Errors
/// - `ReadError::File` when the file cannot be read.
/// - `ReadError::Parse` when the content is not a well-formed dataset.
pub fn load_from_json(path: impl AsRef<Path>) -> ReadResult<NetworkData> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=data_load module=reader status=start path={}",
        path.display()
    );

    let content = std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=data_load module=reader status=error error_code=file_error path={} error={}",
            path.display(),
            source
        );
        ReadError::File {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let data = parse_network(&content).map_err(|err| {
        error!(
            "event=data_load module=reader status=error error_code=parse_error path={} error={}",
            path.display(),
            err
        );
        match err {
            ReadError::Parse { source, .. } => ReadError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    })?;

    info!(
        "event=data_load module=reader status=ok stations={} lines={} duration_ms={}",
        data.stations.len(),
        data.lines.len(),
        started_at.elapsed().as_millis()
    );
    Ok(data)
}

/// Parses dataset content already held in memory.
pub fn parse_network(content: &str) -> ReadResult<NetworkData> {
    let document: Value = serde_json::from_str(content).map_err(parse_error)?;
    match &document {
        Value::Null => return Ok(NetworkData::default()),
        Value::Object(fields) => {
            require_object_records(fields.get("stations"), "stations")?;
            require_object_records(fields.get("lines"), "lines")?;
        }
        other => {
            return Err(shape_error(format!(
                "expected a JSON object document, found {}",
                value_kind(other)
            )));
        }
    }
    serde_json::from_value(document).map_err(parse_error)
}

// Derived struct impls also accept sequences; only maps are valid records here.
fn require_object_records(records: Option<&Value>, key: &str) -> ReadResult<()> {
    let Some(Value::Array(items)) = records else {
        return Ok(());
    };
    match items.iter().position(|item| !item.is_object()) {
        Some(index) => Err(shape_error(format!(
            "expected `{key}[{index}]` to be a JSON object, found {}",
            value_kind(&items[index])
        ))),
        None => Ok(()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_error(source: serde_json::Error) -> ReadError {
    ReadError::Parse { path: None, source }
}

fn shape_error(message: String) -> ReadError {
    parse_error(<serde_json::Error as serde::de::Error>::custom(message))
}

#[cfg(test)]
mod tests {
    use super::{parse_network, ReadError};
    use crate::model::network::{Line, Station};

    #[test]
    fn parses_stations_and_lines() {
        let data = parse_network(
            r#"{"stations":[{"id":"s1","name":"Bank","longitude":-0.0886,"latitude":51.5133}],
               "lines":[{"name":"Central","stations":["s1"]}]}"#,
        )
        .unwrap();

        assert_eq!(
            data.stations,
            vec![Station::new("s1", "Bank", -0.0886, 51.5133)]
        );
        assert_eq!(data.lines, vec![Line::new("Central", ["s1"])]);
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let data = parse_network(r#"{"stations":[{"id":"s9"}],"lines":[{}]}"#).unwrap();

        assert_eq!(data.stations, vec![Station::new("s9", "", 0.0, 0.0)]);
        assert_eq!(data.lines, vec![Line::default()]);
    }

    #[test]
    fn null_and_empty_object_parse_to_empty_dataset() {
        assert!(parse_network("null").unwrap().stations.is_empty());
        let data = parse_network("{}").unwrap();
        assert!(data.stations.is_empty());
        assert!(data.lines.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let data = parse_network(r#"{"stations":[],"lines":[],"zones":[1,2]}"#).unwrap();
        assert!(data.stations.is_empty());
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let err = parse_network(r#"{"stations": [}"#).unwrap_err();
        assert!(matches!(err, ReadError::Parse { path: None, .. }));
        assert_eq!(err.code(), "parse_error");

        let wrong_shape = parse_network(r#"{"stations": "Bank"}"#).unwrap_err();
        assert!(matches!(wrong_shape, ReadError::Parse { .. }));
    }

    #[test]
    fn array_shaped_documents_are_parse_errors() {
        for content in ["[]", r#"[[{"id":"s1","name":"Bank"}],[]]"#, "42", r#""stations""#] {
            let err = parse_network(content).unwrap_err();
            assert!(matches!(err, ReadError::Parse { .. }), "content {content}");
            assert!(err.to_string().contains("JSON object document"));
        }
    }

    #[test]
    fn array_shaped_records_are_parse_errors() {
        let station = parse_network(r#"{"stations":[["s1","Bank",1.0,2.0]]}"#).unwrap_err();
        assert!(matches!(station, ReadError::Parse { .. }));
        assert!(station.to_string().contains("`stations[0]`"));

        let line = parse_network(
            r#"{"stations":[{"id":"s1"}],"lines":[{"name":"Central","stations":["s1"]},["Northern",["s1"]]]}"#,
        )
        .unwrap_err();
        assert!(matches!(line, ReadError::Parse { .. }));
        assert!(line.to_string().contains("`lines[1]`"));
    }
}
