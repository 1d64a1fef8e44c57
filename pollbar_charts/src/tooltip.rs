// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip positioning and content.
//!
//! Cursor coordinates arrive in viewport pixels. When the page is rendered under a
//! visual scale factor the tooltip lives in unscaled page coordinates, so the
//! cursor is divided by the [`Zoom`] first. The zoom is always explicit: callers
//! pick it from how the tooltip is mounted ([`MountContext`]), never from an
//! ambient viewport check inside the positioner.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect, Size};
use pollbar_rows::respondents_label;
use pollbar_text::{char_count, estimate_width};
use smallvec::SmallVec;

use crate::config::TooltipConfig;

/// Viewports narrower than this are rendered scaled down on scaled pages.
pub const NARROW_VIEWPORT_PX: f64 = 768.0;

/// Quote excerpts longer than this many characters are cut.
pub const QUOTE_EXCERPT_CHARS: usize = 80;

/// At most this many quotes are shown.
pub const MAX_QUOTES: usize = 3;

/// Errors from [`Zoom::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ZoomError {
    /// The factor is zero, negative, or not finite.
    #[error("zoom factor must be positive and finite (got {0})")]
    Invalid(f64),
}

/// A visual scale factor applied to the page.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Zoom(f64);

impl TryFrom<f64> for Zoom {
    type Error = ZoomError;

    fn try_from(factor: f64) -> Result<Self, Self::Error> {
        Self::new(factor)
    }
}

impl From<Zoom> for f64 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Zoom {
    /// No scaling.
    pub const IDENTITY: Self = Self(1.0);
    /// The scale used for scaled pages on narrow viewports.
    pub const NARROW: Self = Self(0.7);

    /// Validates `factor`.
    pub fn new(factor: f64) -> Result<Self, ZoomError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            tracing::debug!(factor, "rejected zoom factor");
            Err(ZoomError::Invalid(factor))
        }
    }

    /// The zoom matching how a tooltip is mounted.
    pub fn for_mount(mount: MountContext, viewport_width_px: f64) -> Self {
        match mount {
            MountContext::ScaledPage if viewport_width_px < NARROW_VIEWPORT_PX => Self::NARROW,
            MountContext::ScaledPage | MountContext::TopLevelOverlay => Self::IDENTITY,
        }
    }

    /// The raw factor.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// How a tooltip is mounted relative to the page's visual scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MountContext {
    /// Inside the page content, which is scaled down on narrow viewports.
    ScaledPage,
    /// In a top-level overlay that is never scaled.
    TopLevelOverlay,
}

/// Inputs to [`TooltipPositioner::position`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipRequest {
    /// Cursor position in viewport pixels.
    pub cursor: Point,
    /// Size of the tooltip box.
    pub box_size: Size,
    /// Size of the viewport.
    pub viewport: Size,
    /// Page zoom; `None` means unscaled.
    pub zoom: Option<Zoom>,
}

impl TooltipRequest {
    /// A request without zoom.
    pub fn new(cursor: Point, box_size: Size, viewport: Size) -> Self {
        Self {
            cursor,
            box_size,
            viewport,
            zoom: None,
        }
    }

    /// Sets the page zoom.
    #[must_use]
    pub fn with_zoom(mut self, zoom: Zoom) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

/// Where a tooltip goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    /// Top-left corner of the box, in page coordinates.
    pub origin: Point,
    /// The box was moved to the left of the cursor.
    pub flipped_left: bool,
    /// The box was moved below the cursor.
    pub flipped_below: bool,
}

impl TooltipPlacement {
    /// The box's rectangle.
    pub fn rect(&self, box_size: Size) -> Rect {
        Rect::from_origin_size(self.origin, box_size)
    }
}

/// Places tooltips next to the cursor, inside the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TooltipPositioner {
    config: TooltipConfig,
}

impl TooltipPositioner {
    /// Creates a positioner using `config`.
    ///
    /// `config` should pass [`TooltipConfig::validate`]; debug builds assert it.
    pub fn new(config: TooltipConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid tooltip config: {config:?}");
        Self { config }
    }

    /// Positions a tooltip.
    ///
    /// The box goes above-right of the cursor; it flips below when it would cross
    /// the top edge and to the left when it would cross the right edge. The
    /// result is then clamped into the (zoomed) viewport, so a box that fits the
    /// viewport never leaves it.
    pub fn position(&self, request: &TooltipRequest) -> TooltipPlacement {
        let c = &self.config;
        let zoom = request.zoom.unwrap_or_default().get();
        let x0 = request.cursor.x / zoom;
        let y0 = request.cursor.y / zoom;
        let Size { width: w, height: h } = request.box_size;
        let max_x = request.viewport.width / zoom - w;
        let max_y = request.viewport.height / zoom - h;

        let mut x = x0 + c.cursor_offset_px;
        let mut y = y0 - h - c.vertical_gap_px;

        let flipped_below = y < 0.0;
        if flipped_below {
            y = y0 + c.cursor_offset_px;
        }
        let flipped_left = x > max_x;
        if flipped_left {
            x = x0 - w - c.cursor_offset_px;
        }

        let origin = Point::new(x.min(max_x).max(0.0), y.min(max_y).max(0.0));
        if origin.x != x || origin.y != y || flipped_left || flipped_below {
            tracing::trace!(
                x,
                y,
                clamped_x = origin.x,
                clamped_y = origin.y,
                flipped_left,
                flipped_below,
                "tooltip moved to stay in view"
            );
        }
        TooltipPlacement {
            origin,
            flipped_left,
            flipped_below,
        }
    }
}

/// The text shown in a bar's tooltip, one entry per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipContent {
    lines: SmallVec<[String; 4]>,
}

impl TooltipContent {
    /// Category, display value and, when known, the respondent count.
    pub fn for_bar(category: &str, display_value: &str, count: Option<u64>) -> Self {
        let mut lines = SmallVec::new();
        lines.push(String::from(category));
        lines.push(String::from(display_value));
        if let Some(n) = count {
            lines.push(respondents_label(n));
        }
        Self { lines }
    }

    /// Appends up to [`MAX_QUOTES`] quoted excerpts.
    #[must_use]
    pub fn with_quotes<'a>(mut self, quotes: impl IntoIterator<Item = &'a str>) -> Self {
        for quote in quotes.into_iter().take(MAX_QUOTES) {
            self.lines.push(format!("\"{}\"", excerpt(quote)));
        }
        self
    }

    /// The lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The content as newline-separated plain text.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// An estimated box size for this content.
    pub fn estimated_size(&self, char_width_px: f64, line_height_px: f64, padding_px: f64) -> Size {
        let longest = self
            .lines
            .iter()
            .map(|l| estimate_width(l, char_width_px))
            .fold(0.0, f64::max);
        Size::new(
            longest + 2.0 * padding_px,
            self.lines.len() as f64 * line_height_px + 2.0 * padding_px,
        )
    }
}

fn excerpt(quote: &str) -> String {
    let quote = quote.trim();
    if char_count(quote) <= QUOTE_EXCERPT_CHARS {
        return String::from(quote);
    }
    let mut out: String = quote.chars().take(QUOTE_EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
