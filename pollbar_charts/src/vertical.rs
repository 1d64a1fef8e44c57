// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label placement for vertical (column) bars.
//!
//! Values sit inside the top of the column when it is tall enough for one line of
//! text; category names sit below the axis, within the column's slot.

use alloc::string::String;

use pollbar_rows::clamp_fraction;
use pollbar_text::{CharWidths, FontClass, TextMeasurer, truncate};

use crate::config::VerticalConfig;

/// Where a column's labels go.
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalDecision {
    /// The column's drawn height in pixels.
    pub bar_height_px: f64,
    /// Draw the value inside the column (otherwise above it).
    pub value_inside: bool,
    /// The category text to draw below the axis.
    pub category_display: String,
    /// Whether `category_display` was shortened.
    pub category_truncated: bool,
    /// Draw the category rotated, because it neither fits nor truncates well.
    pub category_rotated: bool,
}

/// Plans label placement for vertical bars.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalPlanner {
    config: VerticalConfig,
    measurer: CharWidths,
}

impl VerticalPlanner {
    /// Creates a planner using `config` and the default character widths.
    pub fn new(config: VerticalConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid vertical config: {config:?}");
        Self {
            config,
            measurer: CharWidths::default(),
        }
    }

    /// Sets the character widths used for both label classes.
    #[must_use]
    pub fn with_measurer(mut self, measurer: CharWidths) -> Self {
        self.measurer = measurer;
        self
    }

    /// The planner's configuration.
    pub fn config(&self) -> &VerticalConfig {
        &self.config
    }

    /// Decides where the labels of one column go.
    ///
    /// `fraction` is clamped into `[0, 100]` of `plot_height_px`.
    pub fn plan(
        &self,
        category: &str,
        value_text: &str,
        fraction: f64,
        plot_height_px: f64,
        slot_width_px: f64,
        is_no_data: bool,
    ) -> VerticalDecision {
        let c = &self.config;
        let fraction = clamp_fraction(fraction);
        let bar_height_px = if is_no_data {
            c.no_data_bar_px
        } else {
            fraction * plot_height_px.max(0.0) / 100.0
        };
        let available = slot_width_px - 2.0 * c.slot_padding_px;
        let value_inside = !is_no_data
            && fraction > c.small_bar_pct
            && bar_height_px >= c.value_line_px + 2.0 * c.slot_padding_px
            && self.measurer.measure(value_text, FontClass::Value) <= available;

        let t = truncate(
            category,
            available,
            self.measurer.char_width(FontClass::Category),
        );
        if t.too_short_to_truncate {
            tracing::trace!(category, slot_width_px, "category rotated instead of truncated");
        }

        VerticalDecision {
            bar_height_px,
            value_inside,
            category_display: t.text,
            category_truncated: t.truncated,
            category_rotated: t.too_short_to_truncate,
        }
    }
}

/// Plans one column with the default [`VerticalPlanner`].
pub fn plan_vertical(
    category: &str,
    value_text: &str,
    fraction: f64,
    plot_height_px: f64,
    slot_width_px: f64,
    is_no_data: bool,
) -> VerticalDecision {
    VerticalPlanner::default().plan(
        category,
        value_text,
        fraction,
        plot_height_px,
        slot_width_px,
        is_no_data,
    )
}
