//! Display-string rendering shared by the writers and the read-back check.

use calamine::Data;
use polars::prelude::AnyValue;
use wp_model::{CellRef, Column, WaterPointRecord};

/// Formats a float without trailing zeros after the decimal point.
///
/// Integer-valued floats render without a fraction (`40.0` becomes `"40"`).
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Renders a Polars value; null is the empty string.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Renders a spreadsheet cell; blank cells are the empty string.
pub fn data_to_string(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::Float(v) => format_numeric(*v),
        Data::Int(v) => v.to_string(),
        Data::String(s) => unescape_xlsx(s),
        other => other.to_string(),
    }
}

/// Reverses the `_xHHHH_` escapes a workbook uses for control characters
/// and for a literal `_x` (written as `_x005F_x`).
///
/// Input is scanned once, so decoded text is never decoded again.
pub fn unescape_xlsx(text: &str) -> String {
    if !text.contains("_x") {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find("_x") {
        out.push_str(&rest[..idx]);
        let candidate = &rest[idx..];
        match decode_escape(candidate) {
            Some(ch) => {
                out.push(ch);
                rest = &candidate[7..];
            }
            None => {
                out.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes a leading `_xHHHH_`.
fn decode_escape(candidate: &str) -> Option<char> {
    let bytes = candidate.as_bytes();
    if bytes.len() < 7 || bytes[6] != b'_' {
        return None;
    }
    let hex = candidate.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Renders one cell of a record.
pub fn render_cell(record: &WaterPointRecord, column: Column) -> String {
    match record.cell(column) {
        CellRef::Text(value) => value.cloned().unwrap_or_default(),
        CellRef::Numeric(value) => value.map(format_numeric).unwrap_or_default(),
    }
}

/// Renders a record in schema order.
pub fn render_row(record: &WaterPointRecord) -> Vec<String> {
    Column::ALL
        .iter()
        .map(|column| render_cell(record, *column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(40.0), "40");
        assert_eq!(format_numeric(-16.925), "-16.925");
    }

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Float64(7.0)), "7");
        assert_eq!(any_to_string(AnyValue::String("µS / cm")), "µS / cm");
    }

    #[test]
    fn test_data_to_string() {
        assert_eq!(data_to_string(&Data::Empty), "");
        assert_eq!(data_to_string(&Data::Float(46.0)), "46");
        assert_eq!(data_to_string(&Data::Int(3)), "3");
        assert_eq!(data_to_string(&Data::String("High".into())), "High");
        assert_eq!(data_to_string(&Data::String("Well_x000D_A".into())), "Well\rA");
    }

    #[test]
    fn test_unescape_xlsx() {
        assert_eq!(unescape_xlsx("Well_x000D_A"), "Well\rA");
        assert_eq!(unescape_xlsx("Caf\u{e9}_x001F_"), "Caf\u{e9}\u{1f}");
        assert_eq!(unescape_xlsx("pump _x005F_x0041_ tag"), "pump _x0041_ tag");
        assert_eq!(unescape_xlsx("my_x_file _xZZZZ_ _x12"), "my_x_file _xZZZZ_ _x12");
        assert_eq!(unescape_xlsx("\u{b5}S / cm"), "\u{b5}S / cm");
    }

    #[test]
    fn test_render_row_blanks_missing_values() {
        let mut record = WaterPointRecord::for_row(1);
        record.water_point_name = Some("Chikwawa 2".to_string());
        record.ph = Some(6.80);
        let row = render_row(&record);
        assert_eq!(row.len(), Column::ALL.len());
        assert_eq!(row[Column::WaterPointName.position()], "Chikwawa 2");
        assert_eq!(row[Column::Ph.position()], "6.8");
        assert_eq!(row[Column::Latitude.position()], "");
    }
}
