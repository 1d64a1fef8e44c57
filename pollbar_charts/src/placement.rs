// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inside/outside label placement for a single horizontal bar.
//!
//! Given a bar's width fraction and the container width, the planner decides
//! whether the category name and the value label render on top of the bar's
//! fill or beside it, and whether the category must be truncated to fit.
//!
//! The decision cascades with bar size:
//! - large bars show both labels inside, verbatim;
//! - medium bars show a truncated category plus the value;
//! - small bars push one or both labels outside;
//! - bars at or below the small-bar threshold always push both outside.
//!
//! Every branch is a total function of the inputs; nothing here can fail.

use alloc::string::String;

use pollbar_rows::clamp_fraction;
use pollbar_text::{FontClass, TextMeasurer, char_count, truncate};

use crate::config::PlacementConfig;

/// Where a bar's labels go.
///
/// If `category_truncated` is set then `show_category_inside` is set too:
/// truncation is only ever used for the inside placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementDecision {
    /// The bar's drawn width in pixels.
    pub bar_px: f64,
    /// Draw the value on top of the bar.
    pub show_value_inside: bool,
    /// Draw the category on top of the bar.
    pub show_category_inside: bool,
    /// The category text to draw (possibly truncated).
    pub category_display: String,
    /// Whether `category_display` was shortened.
    pub category_truncated: bool,
    /// Draw the category beside the bar's inner (right) edge instead of its default side.
    pub show_category_outside_right: bool,
    /// Draw the value beside the bar's inner (right) edge instead of its default side.
    pub show_value_outside_right: bool,
}

impl PlacementDecision {
    fn outside(bar_px: f64, category: &str) -> Self {
        Self {
            bar_px,
            show_value_inside: false,
            show_category_inside: false,
            category_display: String::from(category),
            category_truncated: false,
            show_category_outside_right: false,
            show_value_outside_right: false,
        }
    }

    /// Whether the category is drawn outside on the default side.
    pub fn category_outside_default(&self) -> bool {
        !self.show_category_inside && !self.show_category_outside_right
    }

    /// Whether the value is drawn outside on the default side.
    pub fn value_outside_default(&self) -> bool {
        !self.show_value_inside && !self.show_value_outside_right
    }
}

/// Plans label placement for horizontal bars.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LabelPlacementPlanner {
    config: PlacementConfig,
}

impl LabelPlacementPlanner {
    /// Creates a planner using `config`.
    ///
    /// `config` should pass [`PlacementConfig::validate`]; debug builds assert it.
    pub fn new(config: PlacementConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid placement config: {config:?}");
        Self { config }
    }

    /// The planner's configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// The bar width in pixels for a width fraction (or the no-data floor).
    pub fn bar_px(&self, width_fraction: f64, container_width_px: f64, is_no_data: bool) -> f64 {
        if is_no_data {
            return self.config.no_data_bar_px;
        }
        clamp_fraction(width_fraction) * container_width_px.max(0.0) / 100.0
    }

    /// Decides where the labels of one bar go.
    ///
    /// `width_fraction` is clamped into `[0, 100]`. Bars without data get the fixed
    /// no-data width and both labels outside.
    pub fn plan(
        &self,
        category: &str,
        value_text: &str,
        width_fraction: f64,
        container_width_px: f64,
        is_no_data: bool,
    ) -> PlacementDecision {
        let c = &self.config;
        let bar_px = self.bar_px(width_fraction, container_width_px, is_no_data);
        if is_no_data {
            return PlacementDecision::outside(bar_px, category);
        }

        let fraction = clamp_fraction(width_fraction);
        let measurer = c.measurer();
        let category_w = measurer.measure(category, FontClass::Category);
        let value_w = measurer.measure(value_text, FontClass::Value);
        let pad = c.min_padding_px;

        let is_very_small = fraction <= c.small_bar_pct;
        let category_fits = bar_px > category_w + 2.0 * pad;
        let value_fits = bar_px > value_w + 2.0 * pad;
        let min_category_bar = c
            .min_category_bar_px
            .max(char_count(category) as f64 * c.category_px_per_char);

        let mut category_inside = !is_very_small
            && bar_px >= min_category_bar
            && (category_fits || bar_px > c.wide_bar_px);
        let value_inside = !is_very_small && bar_px >= c.min_value_bar_px && value_fits;

        let mut category_display = String::from(category);
        let mut category_truncated = false;
        if category_inside && !category_fits {
            let reserved = if value_inside {
                value_w + c.value_gap_px
            } else {
                0.0
            };
            let available = bar_px - 2.0 * pad - reserved;
            let t = truncate(category, available, c.category_char_px);
            if t.too_short_to_truncate {
                tracing::trace!(category, bar_px, "category moved outside instead of truncating");
                category_inside = false;
            } else {
                category_display = t.text;
                category_truncated = t.truncated;
            }
        }

        PlacementDecision {
            bar_px,
            show_value_inside: value_inside,
            show_category_inside: category_inside,
            category_display,
            category_truncated,
            show_category_outside_right: false,
            show_value_outside_right: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORTY: &str = "How often do you use the official forums";

    fn planner() -> LabelPlacementPlanner {
        LabelPlacementPlanner::default()
    }

    #[test]
    fn wide_bar_shows_both_labels_inside() {
        let d = planner().plan("Official Forum", "42%", 60.0, 600.0, false);
        assert_eq!(d.bar_px, 360.0);
        assert!(d.show_category_inside && d.show_value_inside);
        assert!(!d.category_truncated);
        assert_eq!(d.category_display, "Official Forum");
    }

    #[test]
    fn very_small_bar_pushes_everything_outside() {
        let d = planner().plan("Official Forum", "3%", 3.0, 600.0, false);
        assert_eq!(d.bar_px, 18.0);
        assert!(!d.show_category_inside && !d.show_value_inside);
        assert!(!d.category_truncated);
    }

    #[test]
    fn threshold_is_inclusive() {
        // 5% of 2000px is 100px, plenty of room, but still at the threshold.
        let d = planner().plan("Yes", "5%", 5.0, 2000.0, false);
        assert!(!d.show_category_inside && !d.show_value_inside);
    }

    #[test]
    fn long_category_on_narrow_bar_stays_outside_unmodified() {
        let d = planner().plan(FORTY, "12%", 12.0, 500.0, false);
        assert_eq!(d.bar_px, 60.0);
        assert!(!d.show_category_inside);
        assert!(!d.category_truncated);
        assert_eq!(d.category_display, FORTY);
        // The value still fits: 60px >= 60 and 60 > 21 + 16.
        assert!(d.show_value_inside);
    }

    #[test]
    fn medium_bar_truncates_category_next_to_value() {
        // 270px bar: 220 + 16 < 270, so the category fits as is.
        let d = planner().plan(FORTY, "45%", 45.0, 600.0, false);
        assert!(d.show_category_inside && !d.category_truncated);

        // 210px bar: does not fit, min width max(60, 160) holds, > 80px so truncation runs.
        // available = 210 - 16 - (21 + 10) = 163 -> 29 chars, 26 before the ellipsis >= 20.
        let d = planner().plan(FORTY, "35%", 35.0, 600.0, false);
        assert!(d.show_category_inside && d.show_value_inside);
        assert!(d.category_truncated);
        assert_eq!(char_count(&d.category_display), 29);
        assert!(d.category_display.ends_with("..."));
    }

    #[test]
    fn truncation_refused_moves_category_outside() {
        // 168px bar: min width 160 holds; available = 168 - 16 - 31 = 121 -> 22 chars,
        // 19 before the ellipsis < 20.
        let d = planner().plan(FORTY, "28%", 28.0, 600.0, false);
        assert!(!d.show_category_inside);
        assert!(!d.category_truncated);
        assert_eq!(d.category_display, FORTY);
    }

    #[test]
    fn no_data_bar_uses_floor_and_outside_labels() {
        let d = planner().plan("Other", "-", 80.0, 600.0, true);
        assert_eq!(d.bar_px, 8.0);
        assert!(!d.show_category_inside && !d.show_value_inside);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        let d = planner().plan("A", "130%", 130.0, 400.0, false);
        assert_eq!(d.bar_px, 400.0);
        let d = planner().plan("A", "-4%", -4.0, 400.0, false);
        assert_eq!(d.bar_px, 0.0);
    }

    #[test]
    fn planning_is_deterministic() {
        let p = planner();
        assert_eq!(
            p.plan(FORTY, "35%", 35.0, 600.0, false),
            p.plan(FORTY, "35%", 35.0, 600.0, false)
        );
    }
}
