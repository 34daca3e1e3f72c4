//! Export and verification of the cleaned water point table.
//!
//! [`write_exports`] writes `<name>.arrow` (Arrow IPC, zstd), `<name>.csv`
//! and `<name>.xlsx`; [`verify_exports`] reads them back and compares them
//! with the records they were written from.

mod dictionary;
mod display;
mod frame;
mod types;
mod verify;
mod writers;

pub use dictionary::{write_dictionary, write_dictionary_csv};
pub use display::{
    any_to_string, data_to_string, format_numeric, render_cell, render_row, unescape_xlsx,
};
pub use frame::{build_frame, column_dtype, export_schema};
pub use types::{ArtifactCheck, ExportFormat, ExportPaths};
pub use verify::{RenderedTable, read_back, verify_exports};
pub use writers::{
    XLSX_MAX_STRING_LEN, check_xlsx_limits, sheet_name, write_csv, write_exports, write_ipc,
    write_xlsx,
};
