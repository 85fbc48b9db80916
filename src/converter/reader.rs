//! CSV reading for the converter
//!
//! Decodes the source file into a [`Table`] with polars. Blank lines are
//! skipped, header names are made unique the way pandas does it, and every
//! column is read as text first and then narrowed to integer, unsigned
//! integer, float or boolean when all of its values allow it.

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::models::Table;

use polars::prelude::{
    Column, CsvParseOptions, CsvReadOptions, DataFrame, DataType, NamedFrom, NullValues,
    PlSmallStr, PolarsResult, SerReader, StringChunked,
};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Whether the source path is present on disk
pub fn source_exists(path: &Path) -> bool {
    path.exists()
}

/// CSV reader configured from [`ConverterConfig`]
#[derive(Debug, Clone)]
pub struct CsvTableReader {
    separator: u8,
    quote_char: u8,
    null_markers: Vec<String>,
}

impl CsvTableReader {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            separator: config.separator,
            quote_char: config.quote_char,
            null_markers: config.null_markers.clone(),
        }
    }

    /// Read and decode a whole CSV file
    pub fn read(&self, path: &Path) -> Result<Table> {
        debug!("Reading CSV from {}", path.display());

        let raw = fs::read(path).map_err(|source| ConvertError::SourceIo {
            path: path.to_path_buf(),
            source,
        })?;
        let bytes = strip_blank_lines(&raw, self.quote_char);
        debug!(
            "Dropped {} bytes of blank lines from {}",
            raw.len() - bytes.len(),
            path.display()
        );

        self.decode(bytes).map_err(|source| ConvertError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decode CSV bytes that are already free of blank lines
    pub fn decode(&self, bytes: Vec<u8>) -> PolarsResult<Table> {
        let header = self.read_header(&bytes)?;

        let frame = self
            .read_options()
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let columns = frame
            .get_columns()
            .iter()
            .map(infer_column)
            .collect::<PolarsResult<Vec<_>>>()?;
        let mut frame = DataFrame::new(columns)?;
        frame.set_column_names(mangle_column_names(&header))?;

        debug!(
            "Decoded {} rows x {} columns with schema {:?}",
            frame.height(),
            frame.width(),
            frame.schema()
        );

        Ok(Table::from_frame(frame))
    }

    /// Header fields exactly as written, empty fields as ""
    fn read_header(&self, bytes: &[u8]) -> PolarsResult<Vec<String>> {
        let header_frame = CsvReadOptions::default()
            .with_has_header(false)
            .with_n_rows(Some(1))
            .with_infer_schema_length(Some(0))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(self.separator)
                    .with_quote_char(Some(self.quote_char))
                    .with_missing_is_null(false),
            )
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        header_frame
            .get_columns()
            .iter()
            .map(|column| {
                let values = column.as_materialized_series().str()?;
                Ok(values.get(0).unwrap_or_default().to_string())
            })
            .collect()
    }

    fn read_options(&self) -> CsvReadOptions {
        let null_values = (!self.null_markers.is_empty()).then(|| {
            NullValues::AllColumns(
                self.null_markers
                    .iter()
                    .map(|marker| PlSmallStr::from(marker.as_str()))
                    .collect(),
            )
        });

        // Every column starts as text; `infer_column` picks the final type
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(self.separator)
                    .with_quote_char(Some(self.quote_char))
                    .with_null_values(null_values)
                    .with_missing_is_null(true)
                    .with_truncate_ragged_lines(false)
                    .with_try_parse_dates(false),
            )
    }
}

/// Remove lines that are empty outside quoted fields
fn strip_blank_lines(bytes: &[u8], quote_char: u8) -> Vec<u8> {
    let mut kept = Vec::with_capacity(bytes.len());
    let mut in_quotes = false;

    for line in bytes.split_inclusive(|&b| b == b'\n') {
        let content = line.strip_suffix(b"\n").unwrap_or(line);
        let content = content.strip_suffix(b"\r").unwrap_or(content);
        if !in_quotes && content.is_empty() {
            continue;
        }
        for &b in line {
            if b == quote_char {
                in_quotes = !in_quotes;
            }
        }
        kept.extend_from_slice(line);
    }

    kept
}

/// Unique column names: `Unnamed: {i}` for empty fields, `name.N` for repeats
fn mangle_column_names(header: &[String]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let mut name = if name.is_empty() {
                format!("Unnamed: {}", index)
            } else {
                name.clone()
            };

            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{}.{}", name, count);
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), count + 1);
            name
        })
        .collect()
}

/// Narrow a text column to the most specific type all of its values fit
fn infer_column(column: &Column) -> PolarsResult<Column> {
    let series = column.as_materialized_series();
    let values = series.str()?;
    if values.null_count() == values.len() {
        return Ok(column.clone());
    }

    for dtype in [DataType::Int64, DataType::UInt64] {
        if let Ok(integers) = series.strict_cast(&dtype) {
            return Ok(Column::from(integers));
        }
    }

    // Integers too wide for 64 bits stay text rather than losing digits
    if !values.into_iter().flatten().any(is_overflowing_integer) {
        if let Ok(floats) = series.strict_cast(&DataType::Float64) {
            return Ok(Column::from(floats));
        }
    }

    if let Some(flags) = parse_booleans(values) {
        return Ok(Column::new(series.name().clone(), flags));
    }

    Ok(column.clone())
}

fn is_overflowing_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && text.parse::<i64>().is_err()
        && text.parse::<u64>().is_err()
}

fn parse_booleans(values: &StringChunked) -> Option<Vec<Option<bool>>> {
    values
        .into_iter()
        .map(|value| match value {
            None => Some(None),
            Some("True" | "TRUE" | "true") => Some(Some(true)),
            Some("False" | "FALSE" | "false") => Some(Some(false)),
            Some(_) => None,
        })
        .collect()
}
