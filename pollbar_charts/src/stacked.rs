// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked ("waterfall") bar layout along a single 0–100% axis.
//!
//! Segments are laid end to end: each starts where the previous one ended. If
//! rounding pushes the running total past 100%, the excess is clamped away from
//! the trailing segments, so every slot satisfies `offset + width <= 100`.

use alloc::vec::Vec;

use pollbar_rows::clamp_fraction;
use pollbar_text::{Truncation, truncate};

use crate::config::StackedConfig;

/// Which side of its segment an outside label is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelAnchor {
    /// Reads into the already occupied space before the segment.
    Left,
    /// Reads into the free space after the segment.
    Right,
}

/// One segment of a stacked bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CumulativeSlot {
    /// Start of the segment, in percent of the axis.
    pub offset_pct: f64,
    /// Width of the segment, in percent of the axis.
    pub width_pct: f64,
    /// Side used for the label when the segment is small.
    pub label_anchor: LabelAnchor,
    /// Small segments are labelled outside, on the `label_anchor` side.
    pub small: bool,
    /// Room for an outside label, in percent of the axis.
    pub max_label_pct: f64,
    /// Minimum drawn width in pixels (non-zero only for zero-width segments).
    pub marker_px: f64,
}

impl CumulativeSlot {
    /// The segment's start in pixels.
    pub fn offset_px(&self, container_width_px: f64) -> f64 {
        self.offset_pct * container_width_px / 100.0
    }

    /// The segment's drawn width in pixels, never below its marker width.
    pub fn bar_px(&self, container_width_px: f64) -> f64 {
        (self.width_pct * container_width_px / 100.0).max(self.marker_px)
    }

    /// Room for an outside label in pixels.
    pub fn max_label_px(&self, container_width_px: f64) -> f64 {
        self.max_label_pct * container_width_px / 100.0
    }

    /// Fits an outside label into the room on the anchored side.
    pub fn fit_label(&self, text: &str, container_width_px: f64, char_width_px: f64) -> Truncation {
        truncate(text, self.max_label_px(container_width_px), char_width_px)
    }
}

/// Computes [`CumulativeSlot`]s from width fractions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CumulativeLayout {
    config: StackedConfig,
}

impl CumulativeLayout {
    /// Creates a layout using `config`.
    ///
    /// `config` should pass [`StackedConfig::validate`]; debug builds assert it.
    pub fn new(config: StackedConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid stacked config: {config:?}");
        Self { config }
    }

    /// Lays out `fractions` end to end.
    ///
    /// Fractions are clamped into `[0, 100]` first; each segment then ends at
    /// `min(offset + fraction, 100)`.
    pub fn layout(&self, fractions: &[f64]) -> Vec<CumulativeSlot> {
        let c = &self.config;
        let mut offset = 0.0_f64;
        fractions
            .iter()
            .map(|&f| {
                let requested = clamp_fraction(f);
                let end = (offset + requested).min(100.0);
                let width = end - offset;
                if width < requested {
                    tracing::trace!(requested, width, offset, "stacked segment clamped");
                }

                let anchor = if offset > c.left_anchor_min_offset_pct
                    && width < c.left_anchor_max_width_pct
                {
                    LabelAnchor::Left
                } else {
                    LabelAnchor::Right
                };
                let side_pct = match anchor {
                    LabelAnchor::Left => offset,
                    LabelAnchor::Right => 100.0 - offset - width,
                };

                let slot = CumulativeSlot {
                    offset_pct: offset,
                    width_pct: width,
                    label_anchor: anchor,
                    small: width < c.small_pct,
                    max_label_pct: (side_pct - c.label_margin_pct).max(0.0),
                    marker_px: if width == 0.0 { c.zero_marker_px } else { 0.0 },
                };
                offset = end;
                slot
            })
            .collect()
    }
}
