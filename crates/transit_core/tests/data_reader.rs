mod common;

use transit_core::{load_from_json, Line, NetworkData, ReadError, Station};

#[test]
fn load_from_json_reads_stations_and_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_data_file(dir.path(), "network.json", common::BANK_CENTRAL_JSON);

    let data = load_from_json(&path).unwrap();
    assert_eq!(
        data.stations,
        vec![Station::new("s1", "Bank", -0.0886, 51.5133)]
    );
    assert_eq!(data.lines, vec![Line::new("Central", ["s1"])]);
}

#[test]
fn missing_file_is_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_from_json(&path).unwrap_err();
    match err {
        ReadError::File { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_path_is_file_error() {
    let err = load_from_json("").unwrap_err();
    assert!(matches!(err, ReadError::File { .. }));
    assert_eq!(err.code(), "file_error");
}

#[test]
fn malformed_file_is_parse_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_data_file(dir.path(), "broken.json", "{\"stations\": [");

    let err = load_from_json(&path).unwrap_err();
    match &err {
        ReadError::Parse {
            path: Some(reported),
            ..
        } => assert_eq!(reported, &path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn parsed_records_survive_reserialization() {
    let original = NetworkData {
        stations: vec![
            Station::new("940GZZLUBNK", "Bank", -0.0886, 51.5133),
            Station::new("940GZZLULVT", "Liverpool Street", -0.0823, 51.5178),
            Station::new("940GZZLUODS", "", 0.0, 0.0),
        ],
        lines: vec![
            Line::new("Central", ["940GZZLUBNK", "940GZZLULVT"]),
            Line::new("Waterloo & City", ["940GZZLUBNK"]),
            Line::new("Empty", Vec::<String>::new()),
        ],
    };

    let dir = tempfile::tempdir().unwrap();
    let json = serde_json::to_string_pretty(&original).unwrap();
    let path = common::write_data_file(dir.path(), "roundtrip.json", &json);

    let loaded = load_from_json(&path).unwrap();
    assert_eq!(loaded, original);
    assert!(json.contains("\"stations\": ["));
}

#[test]
fn array_shaped_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_data_file(dir.path(), "array.json", "[]");

    let err = load_from_json(&path).unwrap_err();
    assert!(matches!(err, ReadError::Parse { path: Some(_), .. }));
    assert_eq!(err.code(), "parse_error");
}
