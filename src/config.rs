//! Conversion configuration and validation.
//!
//! The binary always runs with [`ConverterConfig::default`], which points at
//! the fixed source and destination paths. The builder methods exist so the
//! library (and its tests) can aim the same pipeline somewhere else.

use crate::constants::{
    CSV_QUOTE_CHAR, CSV_SEPARATOR, DEFAULT_NULL_MARKERS, DEFAULT_SHEET_NAME,
    DESTINATION_XLSX_PATH, SOURCE_CSV_PATH, XLSX_INVALID_SHEET_CHARS, XLSX_MAX_SHEET_NAME_LEN,
};
use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one CSV to Excel conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// CSV file to read
    pub source_path: PathBuf,

    /// Workbook file to produce
    pub destination_path: PathBuf,

    /// Name of the single worksheet
    pub sheet_name: String,

    /// Field separator byte
    pub separator: u8,

    /// Quote character byte
    pub quote_char: u8,

    /// Field texts treated as missing values
    pub null_markers: Vec<String>,

    /// Apply bold/bordered styling to the header row
    pub style_header: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(SOURCE_CSV_PATH),
            destination_path: PathBuf::from(DESTINATION_XLSX_PATH),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            separator: CSV_SEPARATOR,
            quote_char: CSV_QUOTE_CHAR,
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect(),
            style_header: true,
        }
    }
}

impl ConverterConfig {
    /// Read from a different CSV file
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Write to a different workbook file
    pub fn with_destination_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination_path = path.into();
        self
    }

    /// Rename the output worksheet
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Replace the missing-value markers
    pub fn with_null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Write the header row without styling
    pub fn without_header_style(mut self) -> Self {
        self.style_header = false;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// Check the settings before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(ConvertError::configuration("source path is empty"));
        }
        if self.destination_path.as_os_str().is_empty() {
            return Err(ConvertError::configuration("destination path is empty"));
        }
        if self.separator == self.quote_char {
            return Err(ConvertError::configuration(format!(
                "separator and quote character are both '{}'",
                self.separator as char
            )));
        }
        validate_sheet_name(&self.sheet_name)?;

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

/// Apply Excel's worksheet naming rules
fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConvertError::configuration("sheet name is empty"));
    }
    if name.chars().count() > XLSX_MAX_SHEET_NAME_LEN {
        return Err(ConvertError::configuration(format!(
            "sheet name '{}' is longer than {} characters",
            name, XLSX_MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(bad) = name.chars().find(|c| XLSX_INVALID_SHEET_CHARS.contains(c)) {
        return Err(ConvertError::configuration(format!(
            "sheet name '{}' contains invalid character '{}'",
            name, bad
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ConvertError::configuration(format!(
            "sheet name '{}' cannot start or end with an apostrophe",
            name
        )));
    }
    Ok(())
}
