// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container width bookkeeping.

/// The measured width of a chart's container.
///
/// Until the host has laid the container out, a fallback width is used. A
/// measurement that is not finite or not positive is treated as "not yet measured".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    measured_px: Option<f64>,
    fallback_px: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::new(Self::FALLBACK_WIDTH_PX)
    }
}

impl ChartGeometry {
    /// Fallback width for regular bar widgets.
    pub const FALLBACK_WIDTH_PX: f64 = 600.0;
    /// Fallback width for full-width widgets.
    pub const WIDE_FALLBACK_WIDTH_PX: f64 = 800.0;

    /// An unmeasured geometry with the given fallback width.
    pub fn new(fallback_px: f64) -> Self {
        Self {
            measured_px: None,
            fallback_px,
        }
    }

    /// Returns a copy carrying `width_px` as the latest measurement.
    #[must_use]
    pub fn with_measurement(mut self, width_px: f64) -> Self {
        self.measure(width_px);
        self
    }

    /// Records a new container measurement (e.g. after a resize).
    pub fn measure(&mut self, width_px: f64) {
        self.measured_px = (width_px.is_finite() && width_px > 0.0).then_some(width_px);
    }

    /// Whether a usable measurement has been recorded.
    pub fn is_measured(&self) -> bool {
        self.measured_px.is_some()
    }

    /// The width the planners should use.
    pub fn width_px(&self) -> f64 {
        self.measured_px.unwrap_or(self.fallback_px)
    }
}
