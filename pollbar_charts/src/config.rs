// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for the planners.
//!
//! Bar widgets historically disagreed on these numbers. Each config here has a
//! `Default` carrying the calibrated values, `with_*` setters, and a
//! `validate` that rejects values the planners cannot work with.

use pollbar_text::{CATEGORY_CHAR_PX, CharWidths, LARGE_VALUE_CHAR_PX, VALUE_CHAR_PX};

/// Errors returned by the `validate` methods.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A character width is zero, negative, or not finite.
    #[error("`{field}` must be a positive, finite character width (got {value})")]
    InvalidCharWidth {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A length is negative or not finite.
    #[error("`{field}` must be a non-negative, finite length (got {value})")]
    InvalidLength {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A percentage threshold lies outside `[0, 100]`.
    #[error("`{field}` must lie within [0, 100] (got {value})")]
    PercentOutOfRange {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

fn check_char_width(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        tracing::debug!(field, value, "rejected character width");
        Err(ConfigError::InvalidCharWidth { field, value })
    }
}

fn check_length(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        tracing::debug!(field, value, "rejected length");
        Err(ConfigError::InvalidLength { field, value })
    }
}

fn check_percent(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        tracing::debug!(field, value, "rejected percentage");
        Err(ConfigError::PercentOutOfRange { field, value })
    }
}

/// Constants for horizontal label placement (standard and mirrored bars).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Average character width of category labels.
    pub category_char_px: f64,
    /// Average character width of value labels.
    pub value_char_px: f64,
    /// Padding kept between an inside label and each bar edge.
    pub min_padding_px: f64,
    /// Bars at or below this width fraction never hold labels.
    pub small_bar_pct: f64,
    /// Lower bound of the minimum bar width for an inside category.
    pub min_category_bar_px: f64,
    /// Per-character minimum bar width for an inside category.
    pub category_px_per_char: f64,
    /// Bars wider than this may hold a (truncated) category even when it does not fit.
    pub wide_bar_px: f64,
    /// Minimum bar width for an inside value.
    pub min_value_bar_px: f64,
    /// Gap reserved between an inside category and an inside value.
    pub value_gap_px: f64,
    /// Fixed width of bars without data.
    pub no_data_bar_px: f64,
    /// Space kept free at the container edge for mirrored outside labels.
    pub mirror_margin_px: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            category_char_px: CATEGORY_CHAR_PX,
            value_char_px: VALUE_CHAR_PX,
            min_padding_px: 8.0,
            small_bar_pct: 5.0,
            min_category_bar_px: 60.0,
            category_px_per_char: 4.0,
            wide_bar_px: 80.0,
            min_value_bar_px: 60.0,
            value_gap_px: 10.0,
            no_data_bar_px: 8.0,
            mirror_margin_px: 20.0,
        }
    }
}

impl PlacementConfig {
    /// Defaults for charts that draw values in the larger font.
    #[must_use]
    pub fn large_values() -> Self {
        Self::default().with_value_char_px(LARGE_VALUE_CHAR_PX)
    }

    /// The measurer implied by the configured character widths.
    #[must_use]
    pub fn measurer(&self) -> CharWidths {
        CharWidths::new(self.category_char_px, self.value_char_px)
    }

    /// Sets the category character width.
    #[must_use]
    pub fn with_category_char_px(mut self, px: f64) -> Self {
        self.category_char_px = px;
        self
    }

    /// Sets the value character width.
    #[must_use]
    pub fn with_value_char_px(mut self, px: f64) -> Self {
        self.value_char_px = px;
        self
    }

    /// Sets the inside-label padding.
    #[must_use]
    pub fn with_min_padding_px(mut self, px: f64) -> Self {
        self.min_padding_px = px;
        self
    }

    /// Sets the small-bar threshold (width fraction).
    #[must_use]
    pub fn with_small_bar_pct(mut self, pct: f64) -> Self {
        self.small_bar_pct = pct;
        self
    }

    /// Sets the width of bars without data.
    #[must_use]
    pub fn with_no_data_bar_px(mut self, px: f64) -> Self {
        self.no_data_bar_px = px;
        self
    }

    /// Sets the mirrored edge margin.
    #[must_use]
    pub fn with_mirror_margin_px(mut self, px: f64) -> Self {
        self.mirror_margin_px = px;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_char_width("category_char_px", self.category_char_px)?;
        check_char_width("value_char_px", self.value_char_px)?;
        check_length("min_padding_px", self.min_padding_px)?;
        check_percent("small_bar_pct", self.small_bar_pct)?;
        check_length("min_category_bar_px", self.min_category_bar_px)?;
        check_length("category_px_per_char", self.category_px_per_char)?;
        check_length("wide_bar_px", self.wide_bar_px)?;
        check_length("min_value_bar_px", self.min_value_bar_px)?;
        check_length("value_gap_px", self.value_gap_px)?;
        check_length("no_data_bar_px", self.no_data_bar_px)?;
        check_length("mirror_margin_px", self.mirror_margin_px)
    }
}

/// Constants for stacked ("waterfall") bars.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackedConfig {
    /// Segments narrower than this (percent) are small and labelled outside.
    pub small_pct: f64,
    /// Left anchoring requires an offset greater than this (percent).
    pub left_anchor_min_offset_pct: f64,
    /// Left anchoring requires a width smaller than this (percent).
    pub left_anchor_max_width_pct: f64,
    /// Margin subtracted from the free space beside a segment (percent).
    pub label_margin_pct: f64,
    /// Visual width of zero-width segments.
    pub zero_marker_px: f64,
}

impl Default for StackedConfig {
    fn default() -> Self {
        Self {
            small_pct: 8.0,
            left_anchor_min_offset_pct: 20.0,
            left_anchor_max_width_pct: 15.0,
            label_margin_pct: 2.0,
            zero_marker_px: 4.0,
        }
    }
}

impl StackedConfig {
    /// Sets the small-segment threshold.
    #[must_use]
    pub fn with_small_pct(mut self, pct: f64) -> Self {
        self.small_pct = pct;
        self
    }

    /// Sets the zero-width marker size.
    #[must_use]
    pub fn with_zero_marker_px(mut self, px: f64) -> Self {
        self.zero_marker_px = px;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percent("small_pct", self.small_pct)?;
        check_percent("left_anchor_min_offset_pct", self.left_anchor_min_offset_pct)?;
        check_percent("left_anchor_max_width_pct", self.left_anchor_max_width_pct)?;
        check_percent("label_margin_pct", self.label_margin_pct)?;
        check_length("zero_marker_px", self.zero_marker_px)
    }
}

/// Constants for vertical bars.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VerticalConfig {
    /// Horizontal padding inside each category slot.
    pub slot_padding_px: f64,
    /// Height of one line of value text.
    pub value_line_px: f64,
    /// Bars at or below this height fraction never hold the value.
    pub small_bar_pct: f64,
    /// Fixed height of bars without data.
    pub no_data_bar_px: f64,
}

impl Default for VerticalConfig {
    fn default() -> Self {
        Self {
            slot_padding_px: 4.0,
            value_line_px: 16.0,
            small_bar_pct: 5.0,
            no_data_bar_px: 8.0,
        }
    }
}

impl VerticalConfig {
    /// Sets the slot padding.
    #[must_use]
    pub fn with_slot_padding_px(mut self, px: f64) -> Self {
        self.slot_padding_px = px;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length("slot_padding_px", self.slot_padding_px)?;
        check_length("value_line_px", self.value_line_px)?;
        check_percent("small_bar_pct", self.small_bar_pct)?;
        check_length("no_data_bar_px", self.no_data_bar_px)
    }
}

/// Constants for tooltip placement and dismissal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipConfig {
    /// Horizontal distance from the cursor (and vertical distance when below it).
    pub cursor_offset_px: f64,
    /// Vertical gap between the cursor and a tooltip placed above it.
    pub vertical_gap_px: f64,
    /// Delay before a pointer-leave hides the tooltip.
    pub hide_delay_ms: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            cursor_offset_px: 15.0,
            vertical_gap_px: 10.0,
            hide_delay_ms: 100,
        }
    }
}

impl TooltipConfig {
    /// Sets the hide delay.
    #[must_use]
    pub fn with_hide_delay_ms(mut self, ms: u64) -> Self {
        self.hide_delay_ms = ms;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length("cursor_offset_px", self.cursor_offset_px)?;
        check_length("vertical_gap_px", self.vertical_gap_px)
    }
}
