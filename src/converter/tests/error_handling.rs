//! Error handling tests

use super::{converter_for, create_source, run_captured};
use crate::config::ConverterConfig;
use crate::converter::Converter;
use crate::error::{ConvertError, ErrorKind};
use crate::models::{ConversionOutcome, ConversionStage};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_source_prints_only_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("nonexistent.csv");
    let destination_path = temp_dir.path().join("output.xlsx");
    let converter = converter_for(source_path.clone(), destination_path.clone());

    let (outcome, output) = run_captured(&converter);

    match &outcome {
        ConversionOutcome::SourceMissing { path } => assert_eq!(path, &source_path),
        other => panic!("Expected SourceMissing, got {:?}", other),
    }
    assert_eq!(outcome.stage(), ConversionStage::Failed);
    assert_eq!(
        output,
        format!("CSV file not found at {}\n", source_path.display())
    );
    assert!(!destination_path.exists());
}

#[test]
fn test_convert_reports_missing_source_as_error() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("nonexistent.csv");
    let converter = converter_for(source_path.clone(), temp_dir.path().join("out.xlsx"));

    let err = converter.convert().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingSource);
    match err {
        ConvertError::SourceNotFound { path } => assert_eq!(path, source_path),
        other => panic!("Expected SourceNotFound, got {:?}", other),
    }
}

#[test]
fn test_ragged_rows_print_error() {
    let temp_dir = TempDir::new().unwrap();
    let (source_path, destination_path) = create_source(&temp_dir, "c1,c2\n1,2\n3,4,5,6\n");
    let converter = converter_for(source_path.clone(), destination_path.clone());

    let (outcome, output) = run_captured(&converter);

    match &outcome {
        ConversionOutcome::Failed { stage, error } => {
            assert_eq!(*stage, ConversionStage::Checked);
            assert_eq!(error.kind(), ErrorKind::Parse);
        }
        other => panic!("Expected Failed, got {:?}", other),
    }

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        format!("CSV file found at {}", source_path.display())
    );
    assert!(lines[1].starts_with("Error: "));
    assert!(!destination_path.exists());
}

#[test]
fn test_empty_source_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let (source_path, destination_path) = create_source(&temp_dir, "");
    let converter = converter_for(source_path, destination_path.clone());

    let (outcome, output) = run_captured(&converter);

    assert_eq!(outcome.error().map(|e| e.kind()), Some(ErrorKind::Parse));
    assert!(output.contains("Error: "));
    assert!(!destination_path.exists());
}

#[test]
fn test_unwritable_destination_prints_error() {
    let temp_dir = TempDir::new().unwrap();
    let (source_path, _) = create_source(&temp_dir, "c1,c2\n1,2\n");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "plain file").unwrap();
    let converter = converter_for(source_path, blocker.join("output.xlsx"));

    let (outcome, output) = run_captured(&converter);

    match &outcome {
        ConversionOutcome::Failed { stage, error } => {
            assert_eq!(*stage, ConversionStage::Parsed);
            assert_eq!(error.kind(), ErrorKind::Write);
        }
        other => panic!("Expected Failed, got {:?}", other),
    }
    assert!(output.contains("Successfully read CSV with 1 rows and 2 columns"));
    assert!(output.lines().last().unwrap().starts_with("Error: "));
    assert!(!output.contains("Successfully converted"));
}

#[test]
fn test_failed_parse_keeps_previous_destination() {
    let temp_dir = TempDir::new().unwrap();
    let (source_path, destination_path) = create_source(&temp_dir, "c1,c2\n1,2\n");
    let converter = converter_for(source_path.clone(), destination_path.clone());

    assert!(run_captured(&converter).0.is_converted());
    let previous = fs::read(&destination_path).unwrap();

    fs::write(&source_path, "c1,c2\n1,2,3\n").unwrap();
    let (outcome, _) = run_captured(&converter);

    assert_eq!(outcome.error().map(|e| e.kind()), Some(ErrorKind::Parse));
    assert_eq!(fs::read(&destination_path).unwrap(), previous);
}

#[test]
fn test_invalid_configuration_fails_before_io() {
    let temp_dir = TempDir::new().unwrap();
    let (source_path, destination_path) = create_source(&temp_dir, "c1\n1\n");
    let converter = Converter::new(
        ConverterConfig::default()
            .with_source_path(source_path)
            .with_destination_path(destination_path.clone())
            .with_sheet_name("bad/name"),
    );

    let (outcome, output) = run_captured(&converter);

    match &outcome {
        ConversionOutcome::Failed { stage, error } => {
            assert_eq!(*stage, ConversionStage::Start);
            assert_eq!(error.kind(), ErrorKind::Configuration);
        }
        other => panic!("Expected Failed, got {:?}", other),
    }
    assert!(output.starts_with("Error: Configuration error"));
    assert!(!destination_path.exists());
}

#[test]
fn test_directory_source_is_found_then_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("input.csv");
    fs::create_dir(&source_path).unwrap();
    let destination_path = temp_dir.path().join("output.xlsx");
    let converter = converter_for(source_path.clone(), destination_path.clone());

    let (outcome, output) = run_captured(&converter);

    match &outcome {
        ConversionOutcome::Failed { stage, error } => {
            assert_eq!(*stage, ConversionStage::Checked);
            assert_eq!(error.kind(), ErrorKind::Parse);
        }
        other => panic!("Expected Failed, got {:?}", other),
    }
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines[0],
        format!("CSV file found at {}", source_path.display())
    );
    assert!(lines[1].starts_with("Error: Failed to read CSV file"));
    assert!(!destination_path.exists());
}
