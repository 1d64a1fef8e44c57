// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text width estimation and truncation for bar labels.
//!
//! Pollbar decides label placement before anything is painted, and the host
//! renderer usually has no cheap way to measure text at that point. Labels are
//! therefore sized with a calibrated average character width per font class:
//!
//! - category names use a small font (about 5.5px per character), and
//! - value/percentage labels use a bolder font (about 7 to 8px per character).
//!
//! This crate is intentionally:
//! - dependency-light and `no_std`-friendly (it uses `alloc` for owned strings), and
//! - deterministic: the same input always produces the same estimate.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod truncate;

pub use truncate::{ELLIPSIS, MIN_MEANINGFUL_CHARS, Truncation, truncate};

/// Average character width for category labels, in pixels.
pub const CATEGORY_CHAR_PX: f64 = 5.5;
/// Average character width for value labels in the default (smaller) font, in pixels.
pub const VALUE_CHAR_PX: f64 = 7.0;
/// Average character width for value labels in the larger font, in pixels.
pub const LARGE_VALUE_CHAR_PX: f64 = 8.0;

/// Returns the number of characters in `text`.
///
/// Lengths are counted in Unicode scalar values so that non-ASCII category
/// names are not over-estimated by their UTF-8 byte length.
#[must_use]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Estimates the pixel width of `text` as `char_count * char_width_px`.
#[must_use]
pub fn estimate_width(text: &str, char_width_px: f64) -> f64 {
    char_count(text) as f64 * char_width_px
}

/// The font class a label is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontClass {
    /// Category names (the bar's label).
    Category,
    /// Values and percentages.
    Value,
}

/// A minimal text measurement interface used by the label planners.
///
/// Implementations provide an average character width per [`FontClass`];
/// widths are derived from that. A host with real text metrics can still
/// implement this by returning a calibrated average.
pub trait TextMeasurer {
    /// Average character width for `class`, in pixels.
    fn char_width(&self, class: FontClass) -> f64;

    /// Estimated width of a single line of `text`.
    fn measure(&self, text: &str, class: FontClass) -> f64 {
        estimate_width(text, self.char_width(class))
    }
}

/// Fixed per-class character widths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharWidths {
    /// Width per character for category labels.
    pub category_px: f64,
    /// Width per character for value labels.
    pub value_px: f64,
}

impl CharWidths {
    /// Creates a measurer from explicit per-class widths.
    #[must_use]
    pub fn new(category_px: f64, value_px: f64) -> Self {
        Self {
            category_px,
            value_px,
        }
    }

    /// Widths for charts that render values in the larger font.
    #[must_use]
    pub fn large_values() -> Self {
        Self::new(CATEGORY_CHAR_PX, LARGE_VALUE_CHAR_PX)
    }
}

impl Default for CharWidths {
    fn default() -> Self {
        Self::new(CATEGORY_CHAR_PX, VALUE_CHAR_PX)
    }
}

impl TextMeasurer for CharWidths {
    fn char_width(&self, class: FontClass) -> f64 {
        match class {
            FontClass::Category => self.category_px,
            FontClass::Value => self.value_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_char_count_times_char_width() {
        assert_eq!(estimate_width("42%", 7.0), 21.0);
        assert_eq!(estimate_width("", 5.5), 0.0);
    }

    #[test]
    fn non_ascii_labels_count_characters_not_bytes() {
        // "Énergie" is 7 characters but 8 bytes.
        assert_eq!(char_count("Énergie"), 7);
        assert_eq!(estimate_width("Énergie", 2.0), 14.0);
    }

    #[test]
    fn default_widths_measure_per_class() {
        let m = CharWidths::default();
        assert_eq!(m.measure("abcd", FontClass::Category), 22.0);
        assert_eq!(m.measure("abcd", FontClass::Value), 28.0);
        assert_eq!(
            CharWidths::large_values().measure("10%", FontClass::Value),
            24.0
        );
    }
}
