//! CSV reading utilities.

mod header;
mod reader;

pub use header::{HeaderBinding, MISSING_MARKERS, is_missing, normalize_header, parse_numeric};
pub use reader::{
    MAX_CSV_FILE_SIZE, RawTable, check_file_size, check_file_size_with_limit, read_raw_table,
};
