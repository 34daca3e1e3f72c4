//! Known-value corrections.
//!
//! Both corrections are exact-match denylists of confirmed artifacts, not
//! general outlier filters.

use tracing::debug;
use wp_model::WaterPointRecord;

/// Unit label as mangled by the survey export.
pub const CORRUPTED_MICRO_UNIT: &str = "?S / cm";

/// Correct conductivity unit label.
pub const MICRO_UNIT: &str = "µS / cm";

/// Null out pH readings that exactly equal a denylisted value.
///
/// Returns the number of readings nulled.
pub fn null_denylisted_ph<T>(records: &mut [WaterPointRecord<T>], denylist: &[f64]) -> usize {
    let mut nulled = 0;
    for record in records.iter_mut() {
        let Some(ph) = record.ph else {
            continue;
        };
        if denylist.iter().any(|denied| *denied == ph) {
            debug!(row = record.source_row, ph, "nulling denylisted pH");
            record.ph = None;
            nulled += 1;
        }
    }
    nulled
}

/// Replace the corrupted micro-sign placeholder in `conductivity_unit`.
///
/// Returns the number of labels rewritten.
pub fn fix_conductivity_unit(records: &mut [WaterPointRecord]) -> usize {
    let mut fixed = 0;
    for record in records.iter_mut() {
        let Some(unit) = record.conductivity_unit.as_mut() else {
            continue;
        };
        if unit.contains(CORRUPTED_MICRO_UNIT) {
            *unit = unit.replace(CORRUPTED_MICRO_UNIT, MICRO_UNIT);
            fixed += 1;
        }
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ph(ph: Option<f64>) -> WaterPointRecord {
        let mut record = WaterPointRecord::for_row(1);
        record.ph = ph;
        record
    }

    fn with_unit(unit: &str) -> WaterPointRecord {
        let mut record = WaterPointRecord::for_row(1);
        record.conductivity_unit = Some(unit.to_string());
        record
    }

    #[test]
    fn nulls_only_exact_denylist_matches() {
        let mut records = vec![
            with_ph(Some(0.68)),
            with_ph(Some(0.73)),
            with_ph(Some(0.7)),
            with_ph(Some(7.3)),
            with_ph(None),
        ];
        let nulled = null_denylisted_ph(&mut records, &[0.68, 0.73]);

        assert_eq!(nulled, 2);
        let values: Vec<Option<f64>> = records.iter().map(|r| r.ph).collect();
        assert_eq!(values, vec![None, None, Some(0.7), Some(7.3), None]);
    }

    #[test]
    fn empty_denylist_is_a_no_op() {
        let mut records = vec![with_ph(Some(0.68))];
        assert_eq!(null_denylisted_ph(&mut records, &[]), 0);
        assert_eq!(records[0].ph, Some(0.68));
    }

    #[test]
    fn fixes_micro_sign_placeholder() {
        let mut records = vec![
            with_unit("?S / cm"),
            with_unit("µS / cm"),
            with_unit("mS / cm"),
            with_unit("?s / cm"),
        ];
        let fixed = fix_conductivity_unit(&mut records);

        assert_eq!(fixed, 1);
        let units: Vec<&str> = records
            .iter()
            .filter_map(|r| r.conductivity_unit.as_deref())
            .collect();
        assert_eq!(units, vec!["µS / cm", "µS / cm", "mS / cm", "?s / cm"]);
    }
}
