//! Water point data ingestion.
//!
//! Loads a raw survey export into schema-bound [`RawRecord`](wp_model::RawRecord)s
//! and reads companion data dictionaries.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wp_ingest::read_raw_table;
//!
//! let table = read_raw_table(Path::new("data-raw/waterpoints.csv"))?;
//! println!("{} rows x {} columns", table.row_count(), table.column_count());
//! ```

mod csv;
mod dictionary;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    HeaderBinding, MAX_CSV_FILE_SIZE, MISSING_MARKERS, RawTable, check_file_size,
    check_file_size_with_limit, is_missing, normalize_header, parse_numeric, read_raw_table,
};

// === Data Dictionary ===
pub use dictionary::{DICTIONARY_COLUMNS, read_dictionary};
