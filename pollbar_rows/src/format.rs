// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percentage and respondent-count display strings.

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// The label shown for bars without data.
pub const NO_DATA_LABEL: &str = "-";

/// Formats a rounded percentage for display.
///
/// - a known count of zero renders as `"-"`,
/// - a non-zero share that rounds to `0` renders as `"<1%"`,
/// - everything else renders as `"{round(percentage)}%"`.
///
/// When `count` is unknown the share is considered non-zero if `percentage > 0`.
/// Non-finite percentages render as `"-"`.
#[must_use]
pub fn format_percentage(percentage: f64, count: Option<u64>) -> String {
    if count == Some(0) || !percentage.is_finite() {
        return String::from(NO_DATA_LABEL);
    }
    let rounded = percentage.round();
    let non_zero = match count {
        Some(n) => n > 0,
        None => percentage > 0.0,
    };
    if rounded == 0.0 && non_zero {
        return String::from("<1%");
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "rounded and finite; percentages are far inside i64"
    )]
    let whole = rounded as i64;
    format!("{whole}%")
}

/// Formats a respondent count, e.g. `"1 respondent"` or `"12 respondents"`.
#[must_use]
pub fn respondents_label(count: u64) -> String {
    if count == 1 {
        String::from("1 respondent")
    } else {
        format!("{count} respondents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_a_dash() {
        assert_eq!(format_percentage(0.0, Some(0)), "-");
        assert_eq!(format_percentage(12.0, Some(0)), "-");
    }

    #[test]
    fn tiny_non_zero_share_is_less_than_one() {
        assert_eq!(format_percentage(0.4, Some(3)), "<1%");
        assert_eq!(format_percentage(0.2, None), "<1%");
        assert_eq!(format_percentage(0.0, None), "0%");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_percentage(41.5, Some(10)), "42%");
        assert_eq!(format_percentage(41.49, None), "41%");
        assert_eq!(format_percentage(100.0, Some(200)), "100%");
    }

    #[test]
    fn non_finite_is_a_dash() {
        assert_eq!(format_percentage(f64::NAN, None), "-");
    }

    #[test]
    fn respondents_pluralize() {
        assert_eq!(respondents_label(1), "1 respondent");
        assert_eq!(respondents_label(0), "0 respondents");
        assert_eq!(respondents_label(57), "57 respondents");
    }
}
