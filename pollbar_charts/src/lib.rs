// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive label placement for survey bar charts.
//!
//! Every bar-style widget shares one parameterized planner:
//! - [`LabelPlacementPlanner`] decides, per bar, whether the category and the
//!   value render inside the fill or beside it, truncating the category when
//!   that keeps enough of it;
//! - a [`PlacementStrategy`] refines that decision for the widget at hand
//!   ([`StandardStrategy`], or [`MirroredStrategy`] for bars growing from the
//!   right edge);
//! - [`CumulativeLayout`] lays stacked segments end to end on a 0–100% axis;
//! - [`VerticalPlanner`] does the same job for columns.
//!
//! Tooltips are positioned by [`TooltipPositioner`] and driven by a
//! [`TooltipController`], which is force-hidden on scroll through a
//! [`ViewportEvents`] subscription.
//!
//! All planning is synchronous and pure: results depend only on the arguments
//! (plus the configuration), and are recomputed whenever the container is
//! resized or the data changes. Nothing here draws; the host renderer turns
//! decisions into pixels.

#![no_std]

extern crate alloc;

mod config;
mod events;
mod geometry;
mod horizontal;
mod hover;
mod placement;
mod stacked;
mod strategy;
mod tooltip;
mod tooltip_controller;
mod vertical;

pub use config::{ConfigError, PlacementConfig, StackedConfig, TooltipConfig, VerticalConfig};
pub use events::{EventKind, Phase, ScrollOrigin, Subscription, ViewportEvent, ViewportEvents};
pub use geometry::ChartGeometry;
pub use horizontal::{HorizontalBarChart, PlannedBar};
pub use hover::{HoverScale, Orientation, hover_scale};
pub use placement::{LabelPlacementPlanner, PlacementDecision};
pub use stacked::{CumulativeLayout, CumulativeSlot, LabelAnchor};
pub use strategy::{
    MirroredStrategy, PlacementContext, PlacementStrategy, StandardStrategy, resolve_mirrored,
};
pub use tooltip::{
    MAX_QUOTES, MountContext, NARROW_VIEWPORT_PX, QUOTE_EXCERPT_CHARS, TooltipContent,
    TooltipPlacement, TooltipPositioner, TooltipRequest, Zoom, ZoomError,
};
pub use tooltip_controller::TooltipController;
pub use vertical::{VerticalDecision, VerticalPlanner, plan_vertical};
