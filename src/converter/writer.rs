//! Excel writing module for converted tables
//!
//! Renders a [`Table`] into a single-sheet xlsx workbook in memory, then
//! replaces the destination file atomically so a failed write never leaves a
//! half-written workbook behind.

use crate::config::ConverterConfig;
use crate::constants::{INFINITY_TEXT, NEG_INFINITY_TEXT, XLSX_MAX_COLUMNS, XLSX_MAX_ROWS};
use crate::error::{ConvertError, Result};
use crate::models::{CellValue, Table};

use rust_xlsxwriter::{
    ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet, XlsxError,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Excel writer for one destination file
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    output_path: PathBuf,
    sheet_name: String,
    style_header: bool,
}

impl XlsxWriter {
    pub fn new(output_path: PathBuf, config: &ConverterConfig) -> Self {
        Self {
            output_path,
            sheet_name: config.sheet_name.clone(),
            style_header: config.style_header,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the table: header row first, then one row per data row
    pub fn write_table(&self, table: &Table) -> Result<()> {
        check_dimensions(table)?;

        let buffer = self.render(table)?;
        debug!(
            "Rendered workbook of {} bytes for {}",
            buffer.len(),
            self.output_path.display()
        );

        self.persist(&buffer)
    }

    /// Build the workbook bytes without touching the filesystem
    pub fn render(&self, table: &Table) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(|e| self.write_error(e))?;

        let header_format = self.header_format();
        for (index, name) in table.column_names().iter().enumerate() {
            let col = column_number(index)?;
            worksheet
                .write_string_with_format(0, col, name, &header_format)
                .map_err(|e| self.write_error(e))?;
        }

        for index in 0..table.width() {
            let col = column_number(index)?;
            for (offset, cell) in table.column_cells(index)?.iter().enumerate() {
                let row = row_number(offset + 1)?;
                self.write_cell(worksheet, row, col, cell)?;
            }
        }

        workbook.save_to_buffer().map_err(|e| self.write_error(e))
    }

    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: RowNum,
        col: ColNum,
        cell: &CellValue,
    ) -> Result<()> {
        let written = match cell {
            CellValue::Empty => return Ok(()),
            CellValue::Bool(value) => worksheet.write_boolean(row, col, *value),
            CellValue::Number(value) if value.is_nan() => return Ok(()),
            CellValue::Number(value) if value.is_infinite() => {
                let text = if value.is_sign_positive() {
                    INFINITY_TEXT
                } else {
                    NEG_INFINITY_TEXT
                };
                worksheet.write_string(row, col, text)
            }
            CellValue::Number(value) => worksheet.write_number(row, col, *value),
            CellValue::Text(value) => worksheet.write_string(row, col, value),
        };

        written.map(|_| ()).map_err(|e| self.write_error(e))
    }

    fn header_format(&self) -> Format {
        if self.style_header {
            Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Top)
        } else {
            Format::new()
        }
    }

    /// Replace the destination with the rendered bytes via a sibling temp file
    fn persist(&self, buffer: &[u8]) -> Result<()> {
        let parent = match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        temp_file.write_all(buffer).map_err(|e| self.io_error(e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| self.io_error(e))?;

        temp_file.persist(&self.output_path).map_err(|e| {
            warn!(
                "Could not move workbook into place at {}: {}",
                self.output_path.display(),
                e.error
            );
            self.io_error(e.error)
        })?;

        Ok(())
    }

    fn write_error(&self, source: XlsxError) -> ConvertError {
        ConvertError::Write {
            path: self.output_path.clone(),
            source,
        }
    }

    fn io_error(&self, source: std::io::Error) -> ConvertError {
        ConvertError::DestinationIo {
            path: self.output_path.clone(),
            source,
        }
    }
}

/// Reject tables that cannot fit on one worksheet
fn check_dimensions(table: &Table) -> Result<()> {
    let rows = table.height() + 1;
    let columns = table.width();
    if rows > XLSX_MAX_ROWS || columns > XLSX_MAX_COLUMNS {
        return Err(ConvertError::SheetTooLarge {
            rows,
            columns,
            max_rows: XLSX_MAX_ROWS,
            max_columns: XLSX_MAX_COLUMNS,
        });
    }
    Ok(())
}

fn row_number(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| ConvertError::SheetTooLarge {
        rows: index + 1,
        columns: 0,
        max_rows: XLSX_MAX_ROWS,
        max_columns: XLSX_MAX_COLUMNS,
    })
}

fn column_number(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| ConvertError::SheetTooLarge {
        rows: 0,
        columns: index + 1,
        max_rows: XLSX_MAX_ROWS,
        max_columns: XLSX_MAX_COLUMNS,
    })
}
