// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar width fractions.

use alloc::vec::Vec;

use crate::row::BarDatum;

/// How values map onto the `[0, 100]` width axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FractionScale {
    /// The largest value among bars with data spans the full width.
    #[default]
    MaxValue,
    /// Values are shares of a 100% total and are used as-is (stacked charts).
    Total,
}

/// Clamps a width fraction into `[0, 100]`; `NaN` becomes `0`.
#[must_use]
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 100.0)
    }
}

/// Computes one width fraction per bar.
///
/// Bars without data always get `0`; the renderer draws them at a fixed pixel floor
/// instead. With [`FractionScale::MaxValue`], a non-positive maximum yields all zeros.
#[must_use]
pub fn width_fractions(data: &[BarDatum], scale: FractionScale) -> Vec<f64> {
    let max = data
        .iter()
        .filter(|d| d.has_data)
        .map(|d| d.value)
        .fold(0.0_f64, f64::max);

    data.iter()
        .map(|d| {
            if !d.has_data {
                return 0.0;
            }
            let raw = match scale {
                FractionScale::MaxValue if max > 0.0 => d.value / max * 100.0,
                FractionScale::MaxValue => 0.0,
                FractionScale::Total => d.value,
            };
            clamp_fraction(raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn max_value_scale_normalizes_to_largest_bar() {
        let data = vec![
            BarDatum::new("a", 20.0, None),
            BarDatum::new("b", 40.0, None),
            BarDatum::no_data("c", None),
        ];
        assert_eq!(
            width_fractions(&data, FractionScale::MaxValue),
            vec![50.0, 100.0, 0.0]
        );
    }

    #[test]
    fn total_scale_clamps_out_of_range_values() {
        let data = vec![
            BarDatum::new("a", -5.0, None),
            BarDatum::new("b", 130.0, None),
            BarDatum::new("c", 30.0, None),
        ];
        assert_eq!(
            width_fractions(&data, FractionScale::Total),
            vec![0.0, 100.0, 30.0]
        );
    }

    #[test]
    fn all_zero_values_stay_zero() {
        let data = vec![BarDatum::new("a", 0.0, None), BarDatum::new("b", 0.0, None)];
        assert_eq!(
            width_fractions(&data, FractionScale::MaxValue),
            vec![0.0, 0.0]
        );
    }

    #[test]
    fn huge_values_keep_their_ratio() {
        let data = vec![
            BarDatum::new("a", f64::MAX / 2.0, None),
            BarDatum::new("b", f64::MAX, None),
        ];
        assert_eq!(
            width_fractions(&data, FractionScale::MaxValue),
            vec![50.0, 100.0]
        );
    }

    #[test]
    fn nan_clamps_to_zero() {
        assert_eq!(clamp_fraction(f64::NAN), 0.0);
        assert_eq!(clamp_fraction(250.0), 100.0);
    }
}
