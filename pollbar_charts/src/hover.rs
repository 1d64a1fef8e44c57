// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover emphasis as data: the renderer applies the returned scale.

use kurbo::{Affine, Point, Rect, Vec2};

/// Bar orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Bars grow along x.
    Horizontal,
    /// Bars grow along y.
    Vertical,
}

/// A scale applied to a bar around its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverScale {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl HoverScale {
    /// No scaling.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Whether this scale changes anything.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The transform scaling around `rect`'s center.
    pub fn transform_for(&self, rect: Rect) -> Affine {
        let c: Point = rect.center();
        Affine::translate(c.to_vec2())
            * Affine::scale_non_uniform(self.x, self.y)
            * Affine::translate(-c.to_vec2())
    }

    /// `rect` scaled around its center.
    pub fn apply(&self, rect: Rect) -> Rect {
        let c = rect.center();
        let half = Vec2::new(rect.width() * self.x, rect.height() * self.y) / 2.0;
        Rect::from_points(c - half, c + half)
    }
}

/// The scale for a bar in the given hover state.
///
/// Hovered horizontal bars grow 10% thicker; hovered vertical bars grow 5% wider.
pub fn hover_scale(orientation: Orientation, hovered: bool) -> HoverScale {
    match (orientation, hovered) {
        (_, false) => HoverScale::IDENTITY,
        (Orientation::Horizontal, true) => HoverScale { x: 1.0, y: 1.1 },
        (Orientation::Vertical, true) => HoverScale { x: 1.05, y: 1.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hovered_bars_scale() {
        assert!(hover_scale(Orientation::Horizontal, false).is_identity());
        assert!(hover_scale(Orientation::Vertical, false).is_identity());
        assert_eq!(hover_scale(Orientation::Horizontal, true), HoverScale { x: 1.0, y: 1.1 });
        assert_eq!(hover_scale(Orientation::Vertical, true), HoverScale { x: 1.05, y: 1.0 });
    }

    #[test]
    fn scale_keeps_the_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let s = HoverScale { x: 1.0, y: 1.5 };
        assert_eq!(s.apply(rect), Rect::new(0.0, -5.0, 100.0, 25.0));
        let mapped = s.transform_for(rect).transform_rect_bbox(rect);
        assert!((mapped.y0 + 5.0).abs() < 1e-9 && (mapped.y1 - 25.0).abs() < 1e-9);
    }
}
