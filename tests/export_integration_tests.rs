//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - Format table CSV contents
//! - One CSV per extracted message type
//! - Output directory creation and defaulting to the input's parent
//! - Disabled exports writing nothing
//! - JSON summary (json feature)

#![cfg(feature = "csv")]

use ardupilot_log_parser::export::*;
use ardupilot_log_parser::{parse_log, FormatRecord, FrameHeader, MessageInstance, ParseResult};
use std::fs;
use tempfile::TempDir;

fn format(type_id: u8, record_length: u8, name: &str) -> FormatRecord {
    FormatRecord {
        type_id,
        record_length,
        name: name.to_string(),
        format_codes: "BB".to_string(),
        field_labels: "A,B".to_string(),
    }
}

fn sample_result() -> ParseResult {
    ParseResult {
        header: FrameHeader::ARDUPILOT,
        fmt_record_length: 89,
        formats: vec![format(10, 5, "ATT"), format(11, 5, "GPS"), format(12, 5, "ATT")],
        instances_by_format: vec![
            vec![MessageInstance {
                byte_offset: 1,
                payload: vec![0x01, 0xA3],
            }],
            vec![],
            vec![
                MessageInstance {
                    byte_offset: 6,
                    payload: vec![0x02, 0x03],
                },
                MessageInstance {
                    byte_offset: 11,
                    payload: vec![0xFF, 0x00],
                },
            ],
        ],
        total_message_count: 3,
        warnings: Vec::new(),
    }
}

#[test]
fn test_export_csv_writes_format_table_and_messages() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("flight.bin");

    let export_opts = ExportOptions {
        csv: true,
        json: false,
        output_dir: None,
    };

    let report = export_to_csv(&sample_result(), &log_path, &export_opts)
        .expect("CSV export should succeed");

    let fmt_path = temp_dir.path().join("flight.fmt.csv");
    assert_eq!(report.format_csv_path.as_deref(), Some(fmt_path.as_path()));
    let content = fs::read_to_string(&fmt_path).expect("Failed to read format table");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "type,length,name,format,labels,count");
    assert_eq!(lines[1], "10,5,ATT,BB,\"A,B\",1");
    assert_eq!(lines.len(), 4);

    // GPS has no instances; ATT is declared twice
    assert_eq!(report.message_csv_paths.len(), 2);
    let first = fs::read_to_string(temp_dir.path().join("flight.ATT.csv")).unwrap();
    assert_eq!(first, "offset,payload\n1,01a3\n");
    let second = fs::read_to_string(temp_dir.path().join("flight.ATT.2.csv")).unwrap();
    assert_eq!(second, "offset,payload\n6,0203\n11,ff00\n");
    assert!(!temp_dir.path().join("flight.GPS.csv").exists());
    assert_eq!(report.files_written(), 3);
}

#[test]
fn test_export_csv_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");
    let log_path = temp_dir.path().join("00000042.BIN");

    let export_opts = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(nonexistent_dir.to_str().unwrap().to_string()),
    };

    let report = export_to_csv(&sample_result(), &log_path, &export_opts);
    assert!(report.is_ok(), "CSV export should succeed and create directories");
    assert!(nonexistent_dir.exists(), "Output directory should be created");
    assert!(nonexistent_dir.join("00000042.fmt.csv").exists());
}

#[test]
fn test_export_csv_disabled_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("flight.bin");

    let report = export_to_csv(&sample_result(), &log_path, &ExportOptions::default()).unwrap();
    assert_eq!(report.files_written(), 0);
    assert!(!temp_dir.path().join("flight.fmt.csv").exists());
}

#[test]
fn test_export_parsed_log_round_trip() {
    let mut log = vec![0xA3, 0x95, 128, 7, 6];
    for (text, size) in [("CUST", 4), ("BBB", 16), ("A,B,C", 64)] {
        let mut field = text.as_bytes().to_vec();
        field.resize(size, 0);
        log.extend(field);
    }
    log.extend_from_slice(&[0xA3, 0x95, 7, 0xA3, 0x95, 0x01]);

    let result = parse_log(&log).expect("parse should succeed");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("custom.bin");
    let export_opts = ExportOptions {
        csv: true,
        ..ExportOptions::default()
    };

    export_to_csv(&result, &log_path, &export_opts).unwrap();
    let content = fs::read_to_string(temp_dir.path().join("custom.CUST.csv")).unwrap();
    assert_eq!(content, "offset,payload\n90,a39501\n");
}

#[cfg(feature = "json")]
#[test]
fn test_export_json_summary() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("flight.bin");
    let export_opts = ExportOptions {
        csv: false,
        json: true,
        output_dir: None,
    };

    let path = export_to_json(&sample_result(), &log_path, &export_opts)
        .unwrap()
        .expect("JSON path should be returned");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(value["total_messages"], 3);
    assert_eq!(value["fmt_length"], 89);
    assert_eq!(value["message_names"][1], "GPS");
    assert_eq!(value["message_counts"], serde_json::json!([1, 0, 2]));
    assert_eq!(value["message_indices"][2], serde_json::json!([6, 11]));
    assert_eq!(value["fmt_messages"][0]["labels"], "A,B");
}
