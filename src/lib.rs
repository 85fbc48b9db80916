//! CSV to Excel converter library
//!
//! Reads a CSV file, infers column names from its header row and column
//! types from its data, and writes the same table to a single-sheet `.xlsx`
//! workbook.
//!
//! ```rust,no_run
//! use csv2xlsx::{Converter, ConverterConfig};
//!
//! let converter = Converter::new(
//!     ConverterConfig::default()
//!         .with_source_path("data/export.csv")
//!         .with_destination_path("data/export.xlsx"),
//! );
//! let outcome = converter.run();
//! assert!(outcome.is_converted());
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod models;

pub use config::ConverterConfig;
pub use converter::Converter;
pub use error::{ConvertError, ErrorKind, Result};
pub use models::{CellValue, ConversionOutcome, ConversionStage, ConversionSummary, Table};
