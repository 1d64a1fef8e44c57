// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal bar charts: rows to placement decisions.

use alloc::vec::Vec;

use kurbo::Rect;
use pollbar_rows::{BarDatum, FractionScale, width_fractions};

use crate::config::PlacementConfig;
use crate::geometry::ChartGeometry;
use crate::placement::{LabelPlacementPlanner, PlacementDecision};
use crate::strategy::{MirroredStrategy, PlacementContext, PlacementStrategy, StandardStrategy};

/// One planned bar.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedBar {
    /// Width fraction in `[0, 100]`.
    pub fraction: f64,
    /// Label placement (including the bar's pixel width).
    pub decision: PlacementDecision,
    /// Whether the bar grows from the right edge.
    pub from_right: bool,
}

impl PlannedBar {
    /// The bar's rectangle within a row `band` spanning the container width.
    pub fn rect(&self, band: Rect) -> Rect {
        let w = self.decision.bar_px.min(band.width());
        if self.from_right {
            Rect::new(band.x1 - w, band.y0, band.x1, band.y1)
        } else {
            Rect::new(band.x0, band.y0, band.x0 + w, band.y1)
        }
    }
}

/// A horizontal bar chart: shared planner plus a widget strategy.
#[derive(Clone, Debug, Default)]
pub struct HorizontalBarChart<S = StandardStrategy> {
    planner: LabelPlacementPlanner,
    strategy: S,
    scale: FractionScale,
}

impl HorizontalBarChart {
    /// A standard (left-anchored) chart.
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            planner: LabelPlacementPlanner::new(config),
            strategy: StandardStrategy,
            scale: FractionScale::MaxValue,
        }
    }

    /// A mirrored (right-anchored) chart.
    pub fn mirrored(config: PlacementConfig) -> HorizontalBarChart<MirroredStrategy> {
        Self::new(config).with_strategy(MirroredStrategy)
    }
}

impl<S: PlacementStrategy> HorizontalBarChart<S> {
    /// Replaces the widget strategy.
    pub fn with_strategy<T: PlacementStrategy>(self, strategy: T) -> HorizontalBarChart<T> {
        HorizontalBarChart {
            planner: self.planner,
            strategy,
            scale: self.scale,
        }
    }

    /// Sets how values map to width fractions.
    #[must_use]
    pub fn with_scale(mut self, scale: FractionScale) -> Self {
        self.scale = scale;
        self
    }

    /// The shared planner.
    pub fn planner(&self) -> &LabelPlacementPlanner {
        &self.planner
    }

    /// Plans every bar of `data` for the current container geometry.
    pub fn plan(&self, data: &[BarDatum], geometry: ChartGeometry) -> Vec<PlannedBar> {
        let width = geometry.width_px();
        let fractions = width_fractions(data, self.scale);
        let config = self.planner.config();
        let from_right = self.strategy.grows_from_right();

        data.iter()
            .zip(fractions)
            .map(|(datum, fraction)| {
                let base = self.planner.plan(
                    &datum.category,
                    &datum.display_value,
                    fraction,
                    width,
                    !datum.has_data,
                );
                let ctx = PlacementContext {
                    category: &datum.category,
                    value_text: &datum.display_value,
                    width_fraction: fraction,
                    container_width_px: width,
                };
                PlannedBar {
                    fraction,
                    decision: self.strategy.refine(base, &ctx, config),
                    from_right,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn sample() -> Vec<BarDatum> {
        vec![
            BarDatum::new("Official Forum", 60.0, Some(120)),
            BarDatum::new("Discord", 3.0, Some(6)),
            BarDatum::no_data("Mailing list", None),
        ]
    }

    #[test]
    fn plans_each_row_against_the_largest_value() {
        let chart = HorizontalBarChart::new(PlacementConfig::default());
        let bars = chart.plan(&sample(), ChartGeometry::default().with_measurement(600.0));
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].fraction, 100.0);
        assert_eq!(bars[0].decision.bar_px, 600.0);
        assert!(bars[0].decision.show_category_inside);
        assert_eq!(bars[1].fraction, 5.0);
        assert!(!bars[1].decision.show_value_inside);
        assert_eq!(bars[2].decision.bar_px, 8.0);
    }

    #[test]
    fn total_scale_uses_values_directly() {
        let chart =
            HorizontalBarChart::new(PlacementConfig::default()).with_scale(FractionScale::Total);
        let bars = chart.plan(&sample(), ChartGeometry::default());
        assert_eq!(bars[0].decision.bar_px, 360.0);
        assert_eq!(bars[1].decision.bar_px, 18.0);
    }

    #[test]
    fn bar_rects_follow_growth_direction() {
        let band = Rect::new(100.0, 0.0, 700.0, 20.0);
        let left = HorizontalBarChart::new(PlacementConfig::default())
            .with_scale(FractionScale::Total)
            .plan(&sample(), ChartGeometry::default());
        assert_eq!(left[0].rect(band), Rect::new(100.0, 0.0, 460.0, 20.0));

        let right = HorizontalBarChart::mirrored(PlacementConfig::default())
            .with_scale(FractionScale::Total)
            .plan(&sample(), ChartGeometry::default());
        assert!(right[0].from_right);
        assert_eq!(right[0].rect(band), Rect::new(340.0, 0.0, 700.0, 20.0));
    }
}
