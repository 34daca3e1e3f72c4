//! Range validation (diagnostic only, never mutates records).

use serde::{Deserialize, Serialize};
use tracing::warn;
use wp_model::{Column, RangeThresholds, WaterPointRecord};

use crate::issue::{FlagKind, RangeFlag};

/// Observed min/max over the present values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedRange {
    pub min: f64,
    pub max: f64,
    /// Number of present values.
    pub count: usize,
}

/// Result of [`validate_ranges`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ph: Option<ObservedRange>,
    pub temperature: Option<ObservedRange>,
    pub flags: Vec<RangeFlag>,
}

impl ValidationReport {
    /// Flags of one kind, in row order.
    pub fn flags_of(&self, kind: FlagKind) -> impl Iterator<Item = &RangeFlag> {
        self.flags.iter().filter(move |flag| flag.kind == kind)
    }

    pub fn flag_count(&self, kind: FlagKind) -> usize {
        self.flags_of(kind).count()
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }
}

/// Observed range of a numeric column, `None` when no value is present.
pub fn observed_range(records: &[WaterPointRecord], column: Column) -> Option<ObservedRange> {
    records
        .iter()
        .filter_map(|record| record.numeric(column))
        .fold(None, |acc: Option<ObservedRange>, value| {
            Some(match acc {
                None => ObservedRange {
                    min: value,
                    max: value,
                    count: 1,
                },
                Some(range) => ObservedRange {
                    min: range.min.min(value),
                    max: range.max.max(value),
                    count: range.count + 1,
                },
            })
        })
}

/// Compute observed ranges and flag values outside the advisory thresholds.
pub fn validate_ranges(
    records: &[WaterPointRecord],
    thresholds: &RangeThresholds,
) -> ValidationReport {
    let mut flags = Vec::new();
    for record in records {
        for kind in FlagKind::ALL {
            let Some(value) = record.numeric(kind.column()) else {
                continue;
            };
            if !is_flagged(kind, value, thresholds) {
                continue;
            }
            warn!(
                row = record.source_row,
                water_point = record.name().unwrap_or(""),
                column = %kind.column(),
                value,
                "{}",
                kind.label()
            );
            flags.push(RangeFlag {
                source_row: record.source_row,
                water_point: record.water_point_name.clone(),
                kind,
                value,
            });
        }
    }
    ValidationReport {
        ph: observed_range(records, Column::Ph),
        temperature: observed_range(records, Column::TemperatureC),
        flags,
    }
}

fn is_flagged(kind: FlagKind, value: f64, thresholds: &RangeThresholds) -> bool {
    match kind {
        FlagKind::PhOutOfRange => value < thresholds.ph_min || value > thresholds.ph_max,
        FlagKind::TemperatureOutOfRange => {
            value < thresholds.temperature_min_c || value > thresholds.temperature_max_c
        }
        FlagKind::NegativeEcoli => value < thresholds.ecoli_min,
        FlagKind::LatitudeOutOfRange => value.abs() > thresholds.latitude_abs_max,
        FlagKind::LongitudeOutOfRange => value.abs() > thresholds.longitude_abs_max,
    }
}
