//! Binding raw CSV headers to the declared column schema.

use wp_model::{Column, ColumnKind, RawRecord};

/// Cell values treated as missing, compared after trimming.
pub const MISSING_MARKERS: [&[u8]; 2] = [b"", b"NA"];

/// Mapping from raw header positions to schema columns.
#[derive(Debug, Clone)]
pub struct HeaderBinding {
    /// (raw position, column) for every bound schema column.
    positions: Vec<(usize, Column)>,
    /// Header names with no schema counterpart, or repeated names.
    pub ignored: Vec<String>,
}

impl HeaderBinding {
    /// Bind normalized header names to the schema.
    ///
    /// Returns the names of every schema column absent from `headers`.
    pub fn bind(headers: &[String]) -> Result<Self, Vec<String>> {
        let mut positions: Vec<(usize, Column)> = Vec::with_capacity(Column::ALL.len());
        let mut ignored = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            match Column::from_name(name) {
                Some(column) if !positions.iter().any(|(_, bound)| *bound == column) => {
                    positions.push((idx, column));
                }
                _ => ignored.push(name.clone()),
            }
        }
        let missing: Vec<String> = Column::ALL
            .iter()
            .filter(|column| !positions.iter().any(|(_, bound)| bound == *column))
            .map(|column| column.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Self { positions, ignored })
    }

    /// Build a typed record from one raw CSV row.
    ///
    /// Short rows leave trailing columns missing.
    pub fn build_record(&self, row: &csv::ByteRecord, source_row: usize) -> RawRecord {
        let mut record = RawRecord::for_row(source_row);
        for &(idx, column) in &self.positions {
            let Some(value) = row.get(idx).map(<[u8]>::trim_ascii) else {
                continue;
            };
            if is_missing(value) {
                continue;
            }
            match column.kind() {
                ColumnKind::Text => {
                    if let Some(slot) = record.text_slot_mut(column) {
                        *slot = Some(value.to_vec());
                    }
                }
                ColumnKind::Numeric => {
                    if let Some(slot) = record.numeric_slot_mut(column) {
                        *slot = parse_numeric(value);
                    }
                }
            }
        }
        record
    }
}

/// Normalizes a header value: strips a UTF-8 BOM and surrounding whitespace.
pub fn normalize_header(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim()
        .trim_matches('\u{feff}')
        .trim()
        .to_string()
}

/// True for empty cells and explicit `NA` markers.
pub fn is_missing(value: &[u8]) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Parses a numeric cell; anything that is not a finite float is missing.
pub fn parse_numeric(value: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(value).ok()?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
