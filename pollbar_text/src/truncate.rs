// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ellipsis truncation with a meaningful-remainder floor.
//!
//! Truncation is refused rather than degraded: when cutting a label down to the
//! available width would keep fewer than [`MIN_MEANINGFUL_CHARS`] characters (or
//! less than half of the label), the original text is returned and flagged with
//! [`Truncation::too_short_to_truncate`]. Callers are expected to move such a
//! label outside the bar instead of showing a fragment.

use alloc::string::String;

use crate::char_count;

/// The suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Lower bound on the characters kept before the ellipsis.
pub const MIN_MEANINGFUL_CHARS: usize = 10;

const ELLIPSIS_CHARS: usize = 3;

/// The outcome of [`truncate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Truncation {
    /// The text to display: either the original or a truncated prefix plus [`ELLIPSIS`].
    pub text: String,
    /// Whether `text` was shortened.
    pub truncated: bool,
    /// Set when the text does not fit and shortening it would leave too little.
    ///
    /// `text` is the untouched original in that case.
    pub too_short_to_truncate: bool,
}

impl Truncation {
    fn unchanged(text: &str) -> Self {
        Self {
            text: String::from(text),
            truncated: false,
            too_short_to_truncate: false,
        }
    }

    fn refused(text: &str) -> Self {
        Self {
            text: String::from(text),
            truncated: false,
            too_short_to_truncate: true,
        }
    }
}

/// Fits `text` into `available_width_px`, given an average `char_width_px`.
///
/// `maxChars = floor(available / char_width)`. Text that already fits is returned
/// unchanged. Otherwise three characters are reserved for the ellipsis and the
/// remaining prefix must keep at least `max(10, ceil(len / 2))` characters.
///
/// A non-positive or non-finite `char_width_px` imposes no limit.
#[must_use]
pub fn truncate(text: &str, available_width_px: f64, char_width_px: f64) -> Truncation {
    if !(char_width_px.is_finite() && char_width_px > 0.0) {
        return Truncation::unchanged(text);
    }

    let len = char_count(text);
    let max_chars = max_chars(available_width_px, char_width_px);
    if len <= max_chars {
        return Truncation::unchanged(text);
    }

    let min_meaningful = len.div_ceil(2).max(MIN_MEANINGFUL_CHARS);
    match max_chars.checked_sub(ELLIPSIS_CHARS) {
        Some(keep) if keep >= min_meaningful => {
            let mut out: String = text.chars().take(keep).collect();
            out.push_str(ELLIPSIS);
            Truncation {
                text: out,
                truncated: true,
                too_short_to_truncate: false,
            }
        }
        _ => {
            tracing::trace!(
                len,
                max_chars,
                min_meaningful,
                "truncation refused, label would lose too much"
            );
            Truncation::refused(text)
        }
    }
}

fn max_chars(available_width_px: f64, char_width_px: f64) -> usize {
    let n = available_width_px / char_width_px;
    if n.is_nan() || n <= 0.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive and clamped before cast; the cast floors"
    )]
    let n = n.min(usize::MAX as f64) as usize;
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORTY: &str = "How often do you use the official forums";

    #[test]
    fn fitting_text_is_returned_verbatim() {
        let t = truncate("Official Forum", 200.0, 5.5);
        assert_eq!(t.text, "Official Forum");
        assert!(!t.truncated && !t.too_short_to_truncate);
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(char_count(FORTY), 40);
        // floor(190 / 5.5) = 34 chars, 31 before the ellipsis; floor is max(10, 20).
        let t = truncate(FORTY, 190.0, 5.5);
        assert!(t.truncated, "expected truncation: {t:?}");
        assert_eq!(t.text.chars().count(), 34);
        assert!(t.text.ends_with(ELLIPSIS));
        assert!(t.text.starts_with("How often do you use the offic"));
    }

    #[test]
    fn refuses_when_remainder_is_below_half() {
        // floor(100 / 5.5) = 18 chars, 15 before the ellipsis < 20.
        let t = truncate(FORTY, 100.0, 5.5);
        assert!(t.too_short_to_truncate);
        assert!(!t.truncated);
        assert_eq!(t.text, FORTY);
    }

    #[test]
    fn refuses_when_remainder_is_below_ten_chars() {
        // 14 chars: half is 7 but the floor is 10. 12 chars fit, 9 before the ellipsis.
        let t = truncate("Strongly agree", 66.0, 5.5);
        assert!(t.too_short_to_truncate);
        assert_eq!(t.text, "Strongly agree");
    }

    #[test]
    fn negative_space_refuses_instead_of_panicking() {
        let t = truncate(FORTY, -25.0, 5.5);
        assert!(t.too_short_to_truncate);
    }

    #[test]
    fn degenerate_char_width_imposes_no_limit() {
        assert_eq!(truncate(FORTY, 10.0, 0.0).text, FORTY);
        assert!(!truncate(FORTY, 10.0, f64::NAN).too_short_to_truncate);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let label = "Ça dépend énormément de la situation actuelle";
        let t = truncate(label, 200.0, 5.5);
        assert!(t.truncated);
        assert!(t.text.starts_with("Ça dépend"));
    }
}
