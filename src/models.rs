//! Core data structures for conversion.
//!
//! Defines the in-memory table, the spreadsheet-facing cell view, the
//! conversion stages and the outcome reported by a run.

use crate::error::{ConvertError, Result};
use polars::prelude::{DataFrame, DataType};
use std::path::PathBuf;

/// One worksheet cell as it will be written
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Parsed CSV contents: ordered columns with one value per row
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

impl Table {
    pub fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of data rows (header excluded)
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Column names in source order
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Cells of one column, top to bottom
    ///
    /// Integer and float columns become numbers, boolean columns become
    /// booleans, nulls become [`CellValue::Empty`] and everything else is
    /// rendered as text.
    pub fn column_cells(&self, index: usize) -> Result<Vec<CellValue>> {
        let column = self.frame.get_columns().get(index).ok_or_else(|| {
            ConvertError::configuration(format!(
                "column index {} out of range for {} columns",
                index,
                self.width()
            ))
        })?;
        let series = column.as_materialized_series();
        let unsupported = |source| ConvertError::UnsupportedColumn {
            column: series.name().to_string(),
            source,
        };

        let cells = match series.dtype() {
            DataType::Boolean => series
                .bool()
                .map_err(unsupported)?
                .into_iter()
                .map(|value| value.map_or(CellValue::Empty, CellValue::Bool))
                .collect(),
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => {
                let numbers = series.cast(&DataType::Float64).map_err(unsupported)?;
                numbers
                    .f64()
                    .map_err(unsupported)?
                    .into_iter()
                    .map(|value| value.map_or(CellValue::Empty, CellValue::Number))
                    .collect()
            }
            DataType::String => text_cells(series.str().map_err(unsupported)?),
            _ => {
                let text = series.cast(&DataType::String).map_err(unsupported)?;
                text_cells(text.str().map_err(unsupported)?)
            }
        };

        Ok(cells)
    }

    /// Row-major copy of every cell, header excluded
    pub fn rows(&self) -> Result<Vec<Vec<CellValue>>> {
        let mut rows = vec![Vec::with_capacity(self.width()); self.height()];
        for index in 0..self.width() {
            for (row, cell) in rows.iter_mut().zip(self.column_cells(index)?) {
                row.push(cell);
            }
        }
        Ok(rows)
    }
}

fn text_cells(values: &polars::prelude::StringChunked) -> Vec<CellValue> {
    values
        .into_iter()
        .map(|value| value.map_or(CellValue::Empty, |text| CellValue::Text(text.to_string())))
        .collect()
}

/// Position of a run in the conversion state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Start,
    Checked,
    Parsed,
    Written,
    Done,
    Failed,
}

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub processing_time_ms: u128,
}

/// What a top-level run ended with
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted(ConversionSummary),
    SourceMissing {
        path: PathBuf,
    },
    Failed {
        /// Last stage reached before the failure
        stage: ConversionStage,
        error: ConvertError,
    },
}

impl ConversionOutcome {
    /// Terminal stage of the run
    pub fn stage(&self) -> ConversionStage {
        match self {
            ConversionOutcome::Converted(_) => ConversionStage::Done,
            ConversionOutcome::SourceMissing { .. } | ConversionOutcome::Failed { .. } => {
                ConversionStage::Failed
            }
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted(_))
    }

    pub fn summary(&self) -> Option<&ConversionSummary> {
        match self {
            ConversionOutcome::Converted(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ConvertError> {
        match self {
            ConversionOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
