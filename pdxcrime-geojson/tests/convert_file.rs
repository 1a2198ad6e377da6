//! Tests d'intégration de la conversion de fichiers
//!
//! Chaque test travaille dans son propre répertoire temporaire.

use std::path::{Path, PathBuf};

use pdxcrime_geojson::cli::{cmd_convert, ConvertArgs};
use pdxcrime_geojson::ConversionStatus;

const HEADER: &str = "Record ID,Report Date,Report Time,Major Offense Type,Address,Neighborhood,Police Precinct,Police District,X Coordinate,Y Coordinate";

const WEIDLER: &str = r#"13807517,12/01/2011,01:00:00,Liquor Laws,"NE WEIDLER ST and NE 1ST AVE, PORTLAND, OR 97232",LLOYD,PORTLAND PREC NO,690,7647471.01608,688344.45013"#;

const SCHUYLER: &str = r#"13716403,07/07/2011,18:30:00,Liquor Laws,"NE SCHUYLER ST and NE 1ST AVE, PORTLAND, OR 97212",ELIOT,PORTLAND PREC NO,590,7647488.15584,688869.34843"#;

const BAD_TIME: &str = r#"13716404,07/07/2011,Bad Time,Liquor Laws,"NE SCHUYLER ST and NE 1ST AVE, PORTLAND, OR 97212",ELIOT,PORTLAND PREC NO,590,7647488.15584,688869.34843"#;

/// Crée un répertoire de test vide
fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pdxcrime_geojson_{}", name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn args(input: &Path) -> ConvertArgs {
    ConvertArgs {
        input: input.to_path_buf(),
        output: None,
        config: "default".to_string(),
        skip_rows: None,
        parallel: false,
        report: None,
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_convert_file_default_output() {
    let dir = test_dir("default_output");
    let input = dir.join("crimes.csv");
    std::fs::write(&input, format!("{}\n{}\n{}\n", HEADER, WEIDLER, SCHUYLER)).unwrap();

    let report = cmd_convert(&args(&input)).unwrap();

    assert_eq!(report.status, ConversionStatus::Success);
    assert_eq!(report.total, 2);
    assert_eq!(report.converted, 2);
    assert_eq!(report.skipped, 0);

    let json = read_json(&dir.join("crimes.json"));
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"].as_array().unwrap().len(), 2);
    assert_eq!(json["features"][0]["id"], 13807517);
    assert_eq!(json["features"][1]["properties"]["neighborhood"], "ELIOT");

    let lon = json["features"][0]["geometry"]["coordinates"][0].as_f64().unwrap();
    assert!((lon - -122.66469510763777).abs() < 1e-9, "lon={}", lon);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_convert_file_skips_bad_rows() {
    let dir = test_dir("skips_bad");
    let input = dir.join("crimes.csv");
    let output = dir.join("out.geojson");
    let report_path = dir.join("report.json");
    std::fs::write(&input, format!("{}\n{}\n{}\n", HEADER, WEIDLER, BAD_TIME)).unwrap();

    let mut args = args(&input);
    args.output = Some(output.clone());
    args.report = Some(report_path.clone());
    args.parallel = true;

    let report = cmd_convert(&args).unwrap();
    assert_eq!(report.status, ConversionStatus::PartialSuccess);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].record.contains("Bad Time"));

    let json = read_json(&output);
    assert_eq!(json["features"].as_array().unwrap().len(), 1);
    assert_eq!(json["features"][0]["id"], 13807517);

    let saved = read_json(&report_path);
    assert_eq!(saved["status"], "PartialSuccess");
    assert_eq!(saved["total"], 2);
    assert_eq!(saved["skipped"], 1);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_convert_file_no_valid_data() {
    let dir = test_dir("no_valid");
    let input = dir.join("crimes.csv");
    std::fs::write(&input, format!("{}\n{}\n", HEADER, BAD_TIME)).unwrap();

    let report = cmd_convert(&args(&input)).unwrap();

    assert_eq!(report.status, ConversionStatus::Failed);
    assert_eq!(report.total, 1);
    assert_eq!(report.converted, 0);
    assert!(report.output.is_none());
    assert!(!dir.join("crimes.json").exists());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_convert_file_custom_columns() {
    let dir = test_dir("custom_columns");
    let config = dir.join("columns.json");
    std::fs::write(
        &config,
        r#"{"headers": ["Record ID", "Report Date", "Report Time", "Major Offense Type",
            "Address", "Neighborhood", "Police Precinct", "Police District",
            "Y Coordinate", "X Coordinate"], "skip_rows": 0, "delimiter": ";"}"#,
    )
    .unwrap();

    let input = dir.join("crimes.csv");
    std::fs::write(
        &input,
        "13807517;12/01/2011;01:00:00;Liquor Laws;NE WEIDLER ST;LLOYD;PORTLAND PREC NO;690;688344.45013;7647471.01608\n",
    )
    .unwrap();

    let mut args = args(&input);
    args.config = config.display().to_string();

    let report = cmd_convert(&args).unwrap();
    assert_eq!(report.status, ConversionStatus::Success);

    let json = read_json(&dir.join("crimes.json"));
    let lat = json["features"][0]["geometry"]["coordinates"][1].as_f64().unwrap();
    assert!((lat - 45.53435699129174).abs() < 1e-9, "lat={}", lat);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_convert_file_windows_1252() {
    let dir = test_dir("windows_1252");
    let input = dir.join("crimes.csv");

    let mut bytes = format!("{}\n", HEADER).into_bytes();
    bytes.extend_from_slice(
        b"13807517,12/01/2011,01:00:00,Liquor Laws,NE WEIDLER ST,CAF\xc9,PORTLAND PREC NO,690,7647471.01608,688344.45013\n",
    );
    std::fs::write(&input, bytes).unwrap();

    cmd_convert(&args(&input)).unwrap();

    let json = read_json(&dir.join("crimes.json"));
    assert_eq!(json["features"][0]["properties"]["neighborhood"], "CAF\u{c9}");

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_input_file() {
    let dir = test_dir("missing_input");
    assert!(cmd_convert(&args(&dir.join("nope.csv"))).is_err());
    std::fs::remove_dir_all(dir).ok();
}
