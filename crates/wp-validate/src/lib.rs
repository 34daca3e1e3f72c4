//! Advisory validation for cleaned water point records.
//!
//! Validation never alters or drops records. It produces:
//!
//! - a [`ValidationReport`] with observed pH/temperature ranges and range flags
//! - a [`DatasetSummary`] of the cleaned table
//! - [`DictionaryIssue`]s when a data dictionary disagrees with the export schema

pub mod dictionary;
pub mod issue;
pub mod ranges;
pub mod summary;

pub use dictionary::check_dictionary;
pub use issue::{DictionaryIssue, FlagKind, RangeFlag};
pub use ranges::{ObservedRange, ValidationReport, observed_range, validate_ranges};
pub use summary::{DatasetSummary, summarize};
