//! Property tests for the record-level transforms.

use encoding_rs::WINDOWS_1252;
use proptest::prelude::*;

use wp_model::{RawRecord, WaterPointRecord};
use wp_transform::{
    filter_missing_coordinates, normalize_date_text, normalize_encoding, null_denylisted_ph,
};

fn coordinate() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-180.0f64..180.0)
}

fn ph_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(Some(0.68)),
        Just(Some(0.73)),
        Just(None),
        (0.0f64..14.0).prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn geo_filter_keeps_exactly_rows_with_both_coordinates(
        coords in prop::collection::vec((coordinate(), coordinate()), 0..40)
    ) {
        let records: Vec<WaterPointRecord> = coords
            .iter()
            .enumerate()
            .map(|(idx, (lat, lon))| {
                let mut record = WaterPointRecord::for_row(idx + 1);
                record.latitude = *lat;
                record.longitude = *lon;
                record
            })
            .collect();
        let expected: Vec<usize> = coords
            .iter()
            .enumerate()
            .filter(|(_, (lat, lon))| lat.is_some() && lon.is_some())
            .map(|(idx, _)| idx + 1)
            .collect();

        let (kept, outcome) = filter_missing_coordinates(records);

        let rows: Vec<usize> = kept.iter().map(|r| r.source_row).collect();
        prop_assert_eq!(rows, expected);
        prop_assert_eq!(kept.len() + outcome.removed(), coords.len());
    }

    #[test]
    fn ph_denylist_nulls_matches_and_keeps_everything_else(
        values in prop::collection::vec(ph_value(), 0..40)
    ) {
        let mut records: Vec<WaterPointRecord> = values
            .iter()
            .map(|ph| {
                let mut record = WaterPointRecord::for_row(1);
                record.ph = *ph;
                record
            })
            .collect();

        null_denylisted_ph(&mut records, &[0.68, 0.73]);

        for (record, original) in records.iter().zip(&values) {
            match original {
                Some(v) if *v == 0.68 || *v == 0.73 => {
                    prop_assert_eq!(record.ph, None);
                }
                other => {
                    prop_assert_eq!(record.ph, *other);
                }
            }
        }
    }

    #[test]
    fn encoding_normalization_is_a_no_op_on_valid_utf8(
        names in prop::collection::vec("[a-zA-Z0-9 µéàü,/-]{1,20}", 1..20)
    ) {
        let records: Vec<RawRecord> = names
            .iter()
            .map(|name| {
                let mut record = RawRecord::for_row(1);
                record.water_point_name = Some(name.as_bytes().to_vec());
                record
            })
            .collect();

        let (decoded, outcome) = normalize_encoding(records, WINDOWS_1252);

        prop_assert!(!outcome.reencoded);
        for (record, name) in decoded.iter().zip(&names) {
            prop_assert_eq!(record.name(), Some(name.as_str()));
        }
    }

    #[test]
    fn date_normalization_is_idempotent(
        year in 2000i32..2030, month in 1u32..=12, day in 1u32..=28
    ) {
        let input = format!("{day:02}/{month:02}/{year}");
        let once = normalize_date_text(&input).expect("valid date");
        let twice = normalize_date_text(&once).expect("normalized date");
        prop_assert_eq!(once, twice);
    }
}
