// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalization of raw survey rows.

use alloc::string::String;

use crate::format::{NO_DATA_LABEL, format_percentage};

/// A value cell as returned by the data-fetch layer.
///
/// Values arrive either as bare numbers or as text such as `"42%"`, `"-"` or `"N/A"`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum RawValue {
    /// A numeric cell.
    Number(f64),
    /// A text cell.
    Text(String),
}

impl RawValue {
    /// Parses the cell into a percentage, or `None` when it carries no data.
    ///
    /// Text is trimmed; `""`, `"-"` and `"N/A"` (any case) mean no data. A trailing `%`
    /// is ignored. Anything that fails to parse, and any non-finite number, is no data.
    pub fn parse(&self) -> Option<f64> {
        let v = match self {
            Self::Number(v) => *v,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s == NO_DATA_LABEL || s.eq_ignore_ascii_case("n/a") {
                    return None;
                }
                let s = s.strip_suffix('%').unwrap_or(s).trim_end();
                s.parse::<f64>().ok()?
            }
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

/// One row from the data-fetch layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawRow {
    /// Category label.
    pub label: String,
    /// Value cell.
    pub value: RawValue,
    /// Optional respondent count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: Option<u64>,
}

impl RawRow {
    /// Creates a row without a respondent count.
    pub fn new(label: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            count: None,
        }
    }

    /// Sets the respondent count.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

/// A normalized bar.
///
/// `display_value` is never empty: bars without data show `"-"`.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    /// Category label.
    pub category: String,
    /// Percentage value (`0` when `has_data` is false).
    pub value: f64,
    /// The value as displayed.
    pub display_value: String,
    /// Whether the source row carried a usable value.
    pub has_data: bool,
    /// Optional respondent count.
    pub count: Option<u64>,
}

impl BarDatum {
    /// Creates a bar with data, formatting its display value.
    pub fn new(category: impl Into<String>, value: f64, count: Option<u64>) -> Self {
        Self {
            category: category.into(),
            value,
            display_value: format_percentage(value, count),
            has_data: true,
            count,
        }
    }

    /// Creates a bar without data.
    pub fn no_data(category: impl Into<String>, count: Option<u64>) -> Self {
        Self {
            category: category.into(),
            value: 0.0,
            display_value: String::from(NO_DATA_LABEL),
            has_data: false,
            count,
        }
    }

    /// Normalizes a raw row.
    pub fn from_row(row: &RawRow) -> Self {
        match row.value.parse() {
            Some(v) => Self::new(row.label.clone(), v, row.count),
            None => {
                tracing::trace!(label = %row.label, "row has no usable value");
                Self::no_data(row.label.clone(), row.count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_strings_parse() {
        let d = BarDatum::from_row(&RawRow::new("Forum", "42%").with_count(21));
        assert!(d.has_data);
        assert_eq!(d.value, 42.0);
        assert_eq!(d.display_value, "42%");
        assert_eq!(d.count, Some(21));

        assert_eq!(RawValue::from(" 12.5 % ").parse(), Some(12.5));
        assert_eq!(RawValue::from(7.0).parse(), Some(7.0));
    }

    #[test]
    fn sentinels_are_no_data() {
        for s in ["-", "N/A", "n/a", "", "  ", "abc", "%"] {
            let d = BarDatum::from_row(&RawRow::new("X", s));
            assert!(!d.has_data, "{s:?} should be no data");
            assert_eq!(d.value, 0.0);
            assert_eq!(d.display_value, "-");
        }
    }

    #[test]
    fn non_finite_numbers_are_no_data() {
        let d = BarDatum::from_row(&RawRow::new("X", f64::INFINITY));
        assert!(!d.has_data);
    }

    #[test]
    fn display_value_is_never_empty() {
        let rows = [
            RawRow::new("a", 0.0),
            RawRow::new("b", 0.3).with_count(1),
            RawRow::new("c", "N/A"),
            RawRow::new("d", 0.0).with_count(0),
        ];
        for r in &rows {
            assert!(!BarDatum::from_row(r).display_value.is_empty());
        }
    }
}
