//! Text encoding normalization.
//!
//! Raw text fields are checked for UTF-8 validity. A single invalid field
//! means the export was written in a legacy single-byte encoding, so every
//! text field is then re-decoded from that encoding. Characters the legacy
//! encoding cannot map are dropped.

use encoding_rs::Encoding;
use tracing::{debug, warn};
use wp_model::{RawRecord, WaterPointRecord};

use crate::error::{Result, TransformError};

/// Outcome of [`normalize_encoding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingOutcome {
    /// Text fields that were not valid UTF-8.
    pub invalid_fields: usize,
    /// Whether the legacy re-decode ran.
    pub reencoded: bool,
    /// Encoding used for the re-decode.
    pub encoding: &'static str,
    /// Characters dropped because they could not be mapped.
    pub dropped_chars: usize,
}

/// Resolve a WHATWG encoding label such as `windows-1252` or `latin1`.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| TransformError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Number of present text fields that are not valid UTF-8.
pub fn invalid_text_fields(record: &RawRecord) -> usize {
    record
        .text_values()
        .filter(|bytes| std::str::from_utf8(bytes).is_err())
        .count()
}

/// Decode every record's text fields to UTF-8.
///
/// Valid UTF-8 payloads pass through untouched. Fields that end up empty
/// become missing.
pub fn normalize_encoding(
    records: Vec<RawRecord>,
    legacy: &'static Encoding,
) -> (Vec<WaterPointRecord>, EncodingOutcome) {
    let invalid_fields: usize = records.iter().map(invalid_text_fields).sum();
    let reencoded = invalid_fields > 0;
    let mut dropped_chars = 0usize;

    let decoded = if reencoded {
        warn!(
            invalid_fields,
            encoding = legacy.name(),
            "text is not valid UTF-8; re-decoding all text fields"
        );
        records
            .into_iter()
            .map(|record| {
                record.map_text(|bytes| {
                    let (text, dropped) = decode_legacy(&bytes, legacy);
                    dropped_chars += dropped;
                    non_empty(text)
                })
            })
            .collect()
    } else {
        debug!("all text fields are valid UTF-8");
        records
            .into_iter()
            .map(|record| record.map_text(|bytes| non_empty(utf8_string(bytes))))
            .collect()
    };

    let outcome = EncodingOutcome {
        invalid_fields,
        reencoded,
        encoding: legacy.name(),
        dropped_chars,
    };
    (decoded, outcome)
}

/// Decode bytes from `encoding`, dropping unmappable characters.
///
/// Returns the text and the number of characters dropped.
pub fn decode_legacy(bytes: &[u8], encoding: &'static Encoding) -> (String, usize) {
    let (decoded, _had_errors) = encoding.decode_without_bom_handling(bytes);
    let dropped = decoded.chars().filter(|ch| *ch == char::REPLACEMENT_CHARACTER).count();
    if dropped == 0 {
        return (decoded.into_owned(), 0);
    }
    let text = decoded
        .chars()
        .filter(|ch| *ch != char::REPLACEMENT_CHARACTER)
        .collect();
    (text, dropped)
}

fn utf8_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    fn raw(name: &[u8], unit: &[u8]) -> RawRecord {
        let mut record = RawRecord::for_row(1);
        record.water_point_name = Some(name.to_vec());
        record.conductivity_unit = Some(unit.to_vec());
        record
    }

    #[test]
    fn resolves_common_labels() {
        assert_eq!(resolve_encoding("latin1").unwrap(), WINDOWS_1252);
        assert_eq!(resolve_encoding(" windows-1252 ").unwrap(), WINDOWS_1252);
        assert!(matches!(
            resolve_encoding("klingon"),
            Err(TransformError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn valid_utf8_passes_through() {
        let records = vec![raw("Balaka Tap".as_bytes(), "µS / cm".as_bytes())];
        let (decoded, outcome) = normalize_encoding(records, WINDOWS_1252);

        assert!(!outcome.reencoded);
        assert_eq!(outcome.invalid_fields, 0);
        assert_eq!(decoded[0].name(), Some("Balaka Tap"));
        assert_eq!(decoded[0].conductivity_unit.as_deref(), Some("µS / cm"));
    }

    #[test]
    fn one_invalid_field_redecodes_everything() {
        let records = vec![
            raw(b"Mang\xe1nje", b"\xb5S / cm"),
            raw(b"Phalombe", b"mS / cm"),
        ];
        let (decoded, outcome) = normalize_encoding(records, WINDOWS_1252);

        assert!(outcome.reencoded);
        assert_eq!(outcome.invalid_fields, 2);
        assert_eq!(outcome.encoding, "windows-1252");
        assert_eq!(decoded[0].name(), Some("Mangánje"));
        assert_eq!(decoded[0].conductivity_unit.as_deref(), Some("µS / cm"));
        assert_eq!(decoded[1].name(), Some("Phalombe"));
    }

    #[test]
    fn unmappable_characters_are_dropped() {
        let (text, dropped) = decode_legacy(b"ab\xffcd", UTF_8);
        assert_eq!(text, "abcd");
        assert_eq!(dropped, 1);
    }

    #[test]
    fn empty_text_becomes_missing() {
        let mut record = RawRecord::for_row(1);
        record.pump_feel = Some(Vec::new());
        let (decoded, _) = normalize_encoding(vec![record], WINDOWS_1252);
        assert_eq!(decoded[0].pump_feel, None);
    }

    #[test]
    fn counts_invalid_fields_per_record() {
        assert_eq!(invalid_text_fields(&raw(b"ok", b"ok")), 0);
        assert_eq!(invalid_text_fields(&raw(b"ok", b"\xb5")), 1);
        assert_eq!(invalid_text_fields(&raw(b"\xe9", b"\xb5")), 2);
    }
}
