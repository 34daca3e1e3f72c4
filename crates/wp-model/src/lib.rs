//! Data model for water point monitoring records.
//!
//! - [`Column`]: the fixed, ordered schema of the cleaned table
//! - [`WaterPointRecord`]: one survey visit, generic over its text representation
//! - [`CleaningOptions`]: fixed pipeline policy (pH denylist, thresholds, encoding)
//! - [`DataDictionary`]: companion description of the exported columns

pub mod dictionary;
pub mod options;
pub mod record;
pub mod schema;

pub use dictionary::{DataDictionary, DictionaryEntry, EXPORT_DIRECTORY};
pub use options::{
    CleaningOptions, DEFAULT_DATASET_NAME, DEFAULT_LEGACY_ENCODING, DEFAULT_PH_DENYLIST,
    RangeThresholds,
};
pub use record::{CellRef, RawRecord, WaterPointRecord};
pub use schema::{Column, ColumnKind, column_names};
