#![allow(dead_code)]

use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const SCHEMA_SQL: &str = "
CREATE TABLE stations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    longitude REAL NOT NULL,
    latitude REAL NOT NULL
);
CREATE TABLE line_has_stations (
    line_name TEXT NOT NULL,
    station_id TEXT NOT NULL REFERENCES stations (id)
);
";

pub const BANK_CENTRAL_JSON: &str = r#"{"stations":[{"id":"s1","name":"Bank","longitude":-0.0886,"latitude":51.5133}],"lines":[{"name":"Central","stations":["s1"]}]}"#;

/// Creates a schema-only database file and returns its path.
pub fn create_store(dir: &Path) -> PathBuf {
    let path = dir.join("network.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    path
}

pub fn write_data_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub fn station_rows(conn: &Connection) -> Vec<(String, String, f64, f64)> {
    let mut stmt = conn
        .prepare("SELECT id, name, longitude, latitude FROM stations ORDER BY id;")
        .unwrap();
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .unwrap();
    rows.collect::<Result<Vec<_>, _>>().unwrap()
}

pub fn membership_rows(conn: &Connection) -> Vec<(String, String)> {
    let mut stmt = conn
        .prepare("SELECT line_name, station_id FROM line_has_stations ORDER BY line_name, station_id;")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap();
    rows.collect::<Result<Vec<_>, _>>().unwrap()
}
