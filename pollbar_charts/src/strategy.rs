// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget-specific refinements of a [`PlacementDecision`].
//!
//! Bar widgets share one [`crate::LabelPlacementPlanner`]; what differs between
//! them (e.g. mirrored bars growing from the right edge) is expressed as a
//! [`PlacementStrategy`] applied to the planner's output.

use pollbar_text::{FontClass, TextMeasurer};

use crate::config::PlacementConfig;
use crate::placement::PlacementDecision;

/// The inputs a strategy may need besides the base decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementContext<'a> {
    /// Category label (untruncated).
    pub category: &'a str,
    /// Value label.
    pub value_text: &'a str,
    /// Width fraction in `[0, 100]`.
    pub width_fraction: f64,
    /// Container width in pixels.
    pub container_width_px: f64,
}

/// A post-processing step applied to the planner's decision.
pub trait PlacementStrategy {
    /// Refines `decision` for this widget.
    fn refine(
        &self,
        decision: PlacementDecision,
        ctx: &PlacementContext<'_>,
        config: &PlacementConfig,
    ) -> PlacementDecision;

    /// Whether bars grow leftwards from the container's right edge.
    fn grows_from_right(&self) -> bool {
        false
    }
}

/// Bars grow from the left edge; the planner's decision is used as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardStrategy;

impl PlacementStrategy for StandardStrategy {
    fn refine(
        &self,
        decision: PlacementDecision,
        _ctx: &PlacementContext<'_>,
        _config: &PlacementConfig,
    ) -> PlacementDecision {
        decision
    }
}

/// Bars grow from the right edge; outside labels default to the bar's left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirroredStrategy;

impl PlacementStrategy for MirroredStrategy {
    fn refine(
        &self,
        decision: PlacementDecision,
        ctx: &PlacementContext<'_>,
        config: &PlacementConfig,
    ) -> PlacementDecision {
        resolve_mirrored(decision, ctx, config)
    }

    fn grows_from_right(&self) -> bool {
        true
    }
}

/// Flips outside labels of a mirrored bar to its inner side when they would run
/// past the container's left edge.
///
/// The space needed on the left is the wider of the labels currently drawn
/// outside on the default side. When it exceeds `container - bar - margin`, no
/// label stays inside the bar: both are drawn on the bar's right side and the
/// category is shown untruncated.
///
/// Applying this to its own output returns the output unchanged.
pub fn resolve_mirrored(
    mut decision: PlacementDecision,
    ctx: &PlacementContext<'_>,
    config: &PlacementConfig,
) -> PlacementDecision {
    let measurer = config.measurer();
    let category_w = if decision.category_outside_default() {
        measurer.measure(ctx.category, FontClass::Category)
    } else {
        0.0
    };
    let value_w = if decision.value_outside_default() {
        measurer.measure(ctx.value_text, FontClass::Value)
    } else {
        0.0
    };
    let needed = category_w.max(value_w);
    let room = ctx.container_width_px - decision.bar_px - config.mirror_margin_px;
    if needed <= 0.0 || needed <= room {
        return decision;
    }

    tracing::trace!(
        category = ctx.category,
        needed,
        room,
        "mirrored labels flipped to the inner side"
    );
    decision.show_category_inside = false;
    decision.show_value_inside = false;
    decision.show_category_outside_right = true;
    decision.show_value_outside_right = true;
    decision.category_display = ctx.category.into();
    decision.category_truncated = false;
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelPlacementPlanner;

    const SIXTY: &str = "Which of the following channels do you use to report issues?";

    fn ctx<'a>(
        category: &'a str,
        value_text: &'a str,
        fraction: f64,
        width: f64,
    ) -> PlacementContext<'a> {
        PlacementContext {
            category,
            value_text,
            width_fraction: fraction,
            container_width_px: width,
        }
    }

    #[test]
    fn labels_with_room_on_the_left_are_untouched() {
        let config = PlacementConfig::default();
        let planner = LabelPlacementPlanner::new(config);
        let c = ctx("Forum", "3%", 3.0, 600.0);
        let base = planner.plan(
            c.category,
            c.value_text,
            c.width_fraction,
            c.container_width_px,
            false,
        );
        let out = resolve_mirrored(base.clone(), &c, &config);
        assert_eq!(out, base);
        assert!(!out.show_category_outside_right && !out.show_value_outside_right);
    }

    #[test]
    fn overflowing_outside_label_flips_right() {
        let config = PlacementConfig::default();
        let planner = LabelPlacementPlanner::new(config);
        assert_eq!(SIXTY.chars().count(), 60);
        // 220px bar < max(60, 240): category outside (330px) > 400 - 220 - 20.
        let c = ctx(SIXTY, "55%", 55.0, 400.0);
        let base = planner.plan(
            c.category,
            c.value_text,
            c.width_fraction,
            c.container_width_px,
            false,
        );
        assert!(!base.show_category_inside && base.show_value_inside);

        let out = resolve_mirrored(base, &c, &config);
        assert!(!out.show_category_inside && !out.show_value_inside);
        assert!(out.show_category_outside_right && out.show_value_outside_right);
        assert_eq!(out.category_display, SIXTY);
        assert!(!out.category_truncated);
    }

    #[test]
    fn all_inside_labels_never_flip_even_on_full_bars() {
        let config = PlacementConfig::default();
        let planner = LabelPlacementPlanner::new(config);
        let c = ctx("Forum", "100%", 100.0, 600.0);
        let base = planner.plan(
            c.category,
            c.value_text,
            c.width_fraction,
            c.container_width_px,
            false,
        );
        assert_eq!(resolve_mirrored(base.clone(), &c, &config), base);
    }

    #[test]
    fn mirrored_resolution_is_idempotent() {
        let config = PlacementConfig::default();
        let planner = LabelPlacementPlanner::new(config);
        for (label, fraction, width) in [
            (SIXTY, 55.0, 400.0),
            ("Forum", 3.0, 600.0),
            (SIXTY, 2.0, 300.0),
        ] {
            let c = ctx(label, "12%", fraction, width);
            let once = resolve_mirrored(
                planner.plan(label, "12%", fraction, width, false),
                &c,
                &config,
            );
            let twice = resolve_mirrored(once.clone(), &c, &config);
            assert_eq!(once, twice, "not idempotent for {label:?} at {fraction}%");
        }
    }

    #[test]
    fn standard_strategy_is_identity() {
        let config = PlacementConfig::default();
        let planner = LabelPlacementPlanner::new(config);
        let c = ctx(SIXTY, "55%", 55.0, 400.0);
        let base = planner.plan(
            c.category,
            c.value_text,
            c.width_fraction,
            c.container_width_px,
            false,
        );
        assert_eq!(StandardStrategy.refine(base.clone(), &c, &config), base);
        assert!(MirroredStrategy.grows_from_right());
        assert!(!StandardStrategy.grows_from_right());
    }
}
