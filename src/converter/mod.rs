//! Conversion engine.
//!
//! Orchestrates the whole CSV to Excel run: existence check, parsing,
//! writing and status reporting. [`Converter::run`] is the single top-level
//! error boundary; every failure below it is turned into a printed message
//! and a [`ConversionOutcome`].

pub mod reader;
pub mod report;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{reader::CsvTableReader, report::StatusReporter, writer::XlsxWriter};

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::models::{ConversionOutcome, ConversionStage, ConversionSummary, Table};

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, info, warn};

/// CSV to Excel converter
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    reader: CsvTableReader,
    writer: XlsxWriter,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            reader: CsvTableReader::new(&config),
            writer: XlsxWriter::new(config.destination_path.clone(), &config),
            config,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Whether the source CSV is present
    pub fn source_exists(&self) -> bool {
        reader::source_exists(self.config.source_path())
    }

    /// Decode the source CSV into a table
    pub fn parse(&self) -> Result<Table> {
        let spinner = spinner("Reading CSV...");
        let result = self.reader.read(self.config.source_path());
        spinner.finish_and_clear();
        result
    }

    /// Write a table to the destination workbook
    pub fn serialize(&self, table: &Table) -> Result<()> {
        let spinner = spinner("Writing workbook...");
        let result = self.writer.write_table(table);
        spinner.finish_and_clear();
        result
    }

    /// Run the pipeline, propagating the first failure
    pub fn convert(&self) -> Result<ConversionSummary> {
        let start_time = Instant::now();
        self.config.validate()?;

        if !self.source_exists() {
            return Err(ConvertError::SourceNotFound {
                path: self.config.source_path.clone(),
            });
        }

        let table = self.parse()?;
        self.serialize(&table)?;

        Ok(self.summary(&table, start_time))
    }

    /// Run the pipeline with status lines on stdout
    pub fn run(&self) -> ConversionOutcome {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run_with_output(&mut handle)
    }

    /// Run the pipeline with status lines on `out`
    ///
    /// Never fails: a missing source and every parse or write error end the
    /// run with a printed message.
    pub fn run_with_output<W: Write>(&self, out: &mut W) -> ConversionOutcome {
        let start_time = Instant::now();
        let mut status = StatusReporter::new(out);
        let mut stage = ConversionStage::Start;
        let source_path = self.config.source_path();
        let destination_path = self.config.destination_path();

        info!(
            "Converting {} -> {}",
            source_path.display(),
            destination_path.display()
        );

        if let Err(error) = self.config.validate() {
            return failed(stage, error, &mut status);
        }

        let found = self.source_exists();
        stage = advance(stage, ConversionStage::Checked);
        if !found {
            status.source_missing(source_path);
            info!("Source missing, skipping conversion");
            return ConversionOutcome::SourceMissing {
                path: source_path.to_path_buf(),
            };
        }
        status.source_found(source_path);

        let table = match self.parse() {
            Ok(table) => table,
            Err(error) => return failed(stage, error, &mut status),
        };
        stage = advance(stage, ConversionStage::Parsed);
        status.parsed(table.height(), table.width());

        if let Err(error) = self.serialize(&table) {
            return failed(stage, error, &mut status);
        }
        stage = advance(stage, ConversionStage::Written);
        status.written(destination_path);

        advance(stage, ConversionStage::Done);
        ConversionOutcome::Converted(self.summary(&table, start_time))
    }

    fn summary(&self, table: &Table, start_time: Instant) -> ConversionSummary {
        ConversionSummary {
            source_path: self.config.source_path.clone(),
            destination_path: self.config.destination_path.clone(),
            rows: table.height(),
            columns: table.width(),
            processing_time_ms: start_time.elapsed().as_millis(),
        }
    }
}

fn failed<W: Write>(
    stage: ConversionStage,
    error: ConvertError,
    status: &mut StatusReporter<'_, W>,
) -> ConversionOutcome {
    warn!("Conversion failed after {:?}: {}", stage, error);
    status.error(&error);
    ConversionOutcome::Failed { stage, error }
}

fn advance(from: ConversionStage, to: ConversionStage) -> ConversionStage {
    debug!("Stage {:?} -> {:?}", from, to);
    to
}

/// Stderr spinner, hidden automatically when stderr is not a terminal
fn spinner(message: &'static str) -> ProgressBar {
    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        progress_bar.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    progress_bar.set_message(message);
    progress_bar.tick();
    progress_bar
}

/// Convenience wrapper used by the binary
pub fn convert_fixed_paths() -> ConversionOutcome {
    Converter::default().run()
}
