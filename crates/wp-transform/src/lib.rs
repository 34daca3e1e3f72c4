//! Cleaning transforms for water point records.
//!
//! Each transform is a plain function over an owned or borrowed record
//! slice, returning a small outcome struct that the pipeline reports:
//!
//! - [`filter_missing_coordinates`]: drop records without latitude/longitude
//! - [`null_denylisted_ph`]: null confirmed pH artifacts
//! - [`normalize_encoding`]: decode raw text to UTF-8, re-decoding legacy exports
//! - [`fix_conductivity_unit`]: repair the mangled micro-sign unit label
//! - [`normalize_dates`]: rewrite date columns as ISO 8601 calendar dates
//!
//! Transforms never reject a record except for the geo-filter.

mod corrections;
mod dates;
mod encoding;
mod error;
mod geo;

pub use corrections::{CORRUPTED_MICRO_UNIT, MICRO_UNIT, fix_conductivity_unit, null_denylisted_ph};
pub use dates::{DATE_FORMAT, DateOutcome, normalize_date_text, normalize_dates};
pub use encoding::{
    EncodingOutcome, decode_legacy, invalid_text_fields, normalize_encoding, resolve_encoding,
};
pub use error::{Result, TransformError};
pub use geo::{GeoFilterOutcome, filter_missing_coordinates};

pub use encoding_rs::Encoding;
