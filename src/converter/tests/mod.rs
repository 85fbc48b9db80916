//! Integration tests for the converter module
//!
//! Runs the full pipeline against CSV fixtures in temporary directories.

pub mod error_handling;

use crate::config::ConverterConfig;
use crate::converter::Converter;
use crate::models::ConversionOutcome;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` as the source CSV and return (source, destination) paths
pub fn create_source(temp_dir: &TempDir, content: &str) -> (PathBuf, PathBuf) {
    let source_path = temp_dir.path().join("example_data").join("input.csv");
    fs::create_dir_all(source_path.parent().unwrap()).unwrap();
    fs::write(&source_path, content).unwrap();

    let destination_path = temp_dir.path().join("example_data").join("output.xlsx");
    (source_path, destination_path)
}

pub fn converter_for(source_path: PathBuf, destination_path: PathBuf) -> Converter {
    Converter::new(
        ConverterConfig::default()
            .with_source_path(source_path)
            .with_destination_path(destination_path),
    )
}

/// Run the converter and capture its status output without colours
pub fn run_captured(converter: &Converter) -> (ConversionOutcome, String) {
    colored::control::set_override(false);
    let mut buffer = Vec::new();
    let outcome = converter.run_with_output(&mut buffer);
    (outcome, String::from_utf8(buffer).unwrap())
}
