// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for row normalization and width fractions.

use pollbar_rows::{BarDatum, FractionScale, RawRow, RawValue, width_fractions};
use proptest::prelude::*;

fn raw_value() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        any::<f64>().prop_map(RawValue::Number),
        "(-|N/A|n/a|[0-9]{1,3}(\\.[0-9])?%?|[a-z]{0,5})".prop_map(RawValue::Text),
    ]
}

proptest! {
    #[test]
    fn fractions_always_within_bounds(
        values in prop::collection::vec(raw_value(), 0..12),
        total in any::<bool>(),
    ) {
        let data: Vec<BarDatum> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| BarDatum::from_row(&RawRow::new(format!("c{i}"), v)))
            .collect();
        let scale = if total { FractionScale::Total } else { FractionScale::MaxValue };
        let fractions = width_fractions(&data, scale);
        prop_assert_eq!(fractions.len(), data.len());
        for (f, d) in fractions.iter().zip(&data) {
            prop_assert!((0.0..=100.0).contains(f), "fraction {} out of range", f);
            if !d.has_data {
                prop_assert_eq!(*f, 0.0);
            }
        }
    }

    #[test]
    fn normalized_rows_always_have_a_display_value(
        value in raw_value(),
        count in prop::option::of(0u64..500),
    ) {
        let mut row = RawRow::new("Category", value);
        row.count = count;
        let d = BarDatum::from_row(&row);
        prop_assert!(!d.display_value.is_empty());
        if !d.has_data {
            prop_assert_eq!(d.value, 0.0);
            prop_assert_eq!(d.display_value.as_str(), "-");
        }
    }
}
