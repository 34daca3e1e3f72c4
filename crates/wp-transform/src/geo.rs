//! Geo-filter: drop records that cannot be placed on a map.

use tracing::debug;
use wp_model::WaterPointRecord;

/// Outcome of [`filter_missing_coordinates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoFilterOutcome {
    /// Raw data rows that were dropped, in input order.
    pub removed_rows: Vec<usize>,
}

impl GeoFilterOutcome {
    pub fn removed(&self) -> usize {
        self.removed_rows.len()
    }
}

/// Keep only records with both latitude and longitude present.
///
/// Coordinate ranges are not checked here; out-of-range values survive and
/// are reported by validation.
pub fn filter_missing_coordinates<T>(
    records: Vec<WaterPointRecord<T>>,
) -> (Vec<WaterPointRecord<T>>, GeoFilterOutcome) {
    let mut outcome = GeoFilterOutcome::default();
    let kept = records
        .into_iter()
        .filter(|record| {
            if record.has_coordinates() {
                return true;
            }
            debug!(row = record.source_row, "dropping record without coordinates");
            outcome.removed_rows.push(record.source_row);
            false
        })
        .collect();
    (kept, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, latitude: Option<f64>, longitude: Option<f64>) -> WaterPointRecord {
        let mut record = WaterPointRecord::for_row(row);
        record.latitude = latitude;
        record.longitude = longitude;
        record
    }

    #[test]
    fn drops_rows_missing_either_coordinate() {
        let records = vec![
            record(1, Some(-15.8), Some(35.0)),
            record(2, None, Some(35.0)),
            record(3, Some(-15.8), None),
            record(4, Some(120.0), Some(35.0)),
        ];
        let (kept, outcome) = filter_missing_coordinates(records);

        let rows: Vec<usize> = kept.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![1, 4]);
        assert_eq!(outcome.removed_rows, vec![2, 3]);
        assert_eq!(outcome.removed(), 2);
    }
}
