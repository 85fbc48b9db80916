//! Application constants for the CSV to Excel converter
//!
//! Fixed input/output locations, parser defaults and the hard limits of the
//! xlsx format.

// =============================================================================
// Fixed Paths
// =============================================================================

/// Source CSV file, relative to the working directory
pub const SOURCE_CSV_PATH: &str = "public/example_data/qnb_new.csv";

/// Destination workbook, relative to the working directory
pub const DESTINATION_XLSX_PATH: &str = "public/example_data/qnb.xlsx";

// =============================================================================
// Parsing Defaults
// =============================================================================

/// Field separator
pub const CSV_SEPARATOR: u8 = b',';

/// Quote character
pub const CSV_QUOTE_CHAR: u8 = b'"';

/// Field texts read as missing values in every column
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

// =============================================================================
// Workbook Format
// =============================================================================

/// Name of the single worksheet
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Maximum rows per worksheet, header row included
pub const XLSX_MAX_ROWS: usize = 1_048_576;

/// Maximum columns per worksheet
pub const XLSX_MAX_COLUMNS: usize = 16_384;

/// Maximum characters in a worksheet name
pub const XLSX_MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel rejects in worksheet names
pub const XLSX_INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Text written for positive and negative infinity
pub const INFINITY_TEXT: &str = "inf";
pub const NEG_INFINITY_TEXT: &str = "-inf";

// =============================================================================
// Logging
// =============================================================================

/// Tracing target used for the default filter directive
pub const LOG_TARGET: &str = "csv2xlsx";

/// Default log level when no `-v` flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
