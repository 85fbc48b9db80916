//! Error handling for CSV to Excel conversion.
//!
//! One error type covers the whole pipeline. The console never shows which
//! category an error belongs to, but [`ConvertError::kind`] lets callers and
//! tests tell them apart.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV file not found at {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read CSV file {path}: {source}")]
    SourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("Column '{column}' cannot be written to a worksheet: {source}")]
    UnsupportedColumn {
        column: String,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("Failed to write Excel file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Failed to save Excel file {path}: {source}")]
    DestinationIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Sheet is too large: {rows} rows x {columns} columns exceeds the limit of {max_rows} x {max_columns}"
    )]
    SheetTooLarge {
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Broad error categories of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingSource,
    Parse,
    Write,
    Configuration,
}

impl ConvertError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::SourceNotFound { .. } => ErrorKind::MissingSource,
            ConvertError::SourceIo { .. } | ConvertError::Parse { .. } => ErrorKind::Parse,
            ConvertError::Io(_)
            | ConvertError::UnsupportedColumn { .. }
            | ConvertError::Write { .. }
            | ConvertError::DestinationIo { .. }
            | ConvertError::SheetTooLarge { .. } => ErrorKind::Write,
            ConvertError::Configuration { .. } => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
