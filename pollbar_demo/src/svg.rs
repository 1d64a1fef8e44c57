// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `pollbar_demo`.

use std::fmt::Write as _;

use kurbo::{Affine, Point, Rect};
use peniko::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug)]
enum Element {
    Rect {
        rect: Rect,
        fill: Color,
        transform: Option<Affine>,
    },
    Text {
        pos: Point,
        font_size: f64,
        anchor: TextAnchor,
        fill: Color,
        angle: f64,
        text: String,
    },
}

#[derive(Debug, Default)]
pub(crate) struct SvgDoc {
    elements: Vec<Element>,
}

impl SvgDoc {
    pub(crate) fn rect(&mut self, rect: Rect, fill: Color) {
        self.elements.push(Element::Rect {
            rect,
            fill,
            transform: None,
        });
    }

    pub(crate) fn rect_transformed(&mut self, rect: Rect, fill: Color, transform: Affine) {
        self.elements.push(Element::Rect {
            rect,
            fill,
            transform: Some(transform),
        });
    }

    pub(crate) fn text(
        &mut self,
        pos: Point,
        font_size: f64,
        anchor: TextAnchor,
        fill: Color,
        text: &str,
    ) {
        self.rotated_text(pos, font_size, anchor, fill, 0.0, text);
    }

    pub(crate) fn rotated_text(
        &mut self,
        pos: Point,
        font_size: f64,
        anchor: TextAnchor,
        fill: Color,
        angle: f64,
        text: &str,
    ) {
        self.elements.push(Element::Text {
            pos,
            font_size,
            anchor,
            fill,
            angle,
            text: text.to_string(),
        });
    }

    /// Multi-line text, one `<text>` per line below `origin`.
    pub(crate) fn lines(&mut self, origin: Point, font_size: f64, fill: Color, lines: &[String]) {
        let line_height = font_size * 1.3;
        for (i, line) in lines.iter().enumerate() {
            let pos = Point::new(origin.x, origin.y + line_height * (i as f64 + 1.0));
            self.text(pos, font_size, TextAnchor::Start, fill, line);
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box().unwrap_or(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );

        for element in &self.elements {
            match element {
                Element::Rect {
                    rect,
                    fill,
                    transform,
                } => {
                    let _ = write!(
                        out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    );
                    write_paint_attr(&mut out, "fill", *fill);
                    if let Some(t) = transform {
                        let [a, b, c, d, e, f] = t.as_coeffs();
                        let _ = write!(out, r#" transform="matrix({a} {b} {c} {d} {e} {f})""#);
                    }
                    out.push_str("/>\n");
                }
                Element::Text {
                    pos,
                    font_size,
                    anchor,
                    fill,
                    angle,
                    text,
                } => {
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="middle""#,
                        pos.x, pos.y, font_size
                    );
                    if *angle != 0.0 {
                        let _ = write!(
                            out,
                            r#" transform="rotate({} {} {})""#,
                            angle, pos.x, pos.y
                        );
                    }
                    out.push_str(match anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn view_box(&self) -> Option<Rect> {
        let bounds = self.elements.iter().map(|e| match e {
            Element::Rect {
                rect, transform, ..
            } => transform.map_or(*rect, |t| t.transform_rect_bbox(*rect)),
            Element::Text {
                pos,
                font_size,
                anchor,
                angle,
                text,
                ..
            } => {
                let b = estimate_text_bounds(*pos, *font_size, *anchor, text);
                if *angle == 0.0 {
                    b
                } else {
                    Affine::rotate_about(angle.to_radians(), *pos).transform_rect_bbox(b)
                }
            }
        });
        // Add a small padding margin.
        bounds.reduce(|a, b| a.union(b)).map(|r| r.inflate(10.0, 10.0))
    }
}

fn estimate_text_bounds(pos: Point, font_size: f64, anchor: TextAnchor, text: &str) -> Rect {
    // Very rough heuristic: assume ~0.6em average glyph width.
    let width = 0.6 * font_size * text.chars().count() as f64;
    let half_height = 0.5 * font_size;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (pos.x, pos.x + width),
        TextAnchor::Middle => (pos.x - width / 2.0, pos.x + width / 2.0),
        TextAnchor::End => (pos.x - width, pos.x),
    };
    Rect::new(x0, pos.y - half_height, x1, pos.y + half_height)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(out, r##" {name}="#{:02x}{:02x}{:02x}""##, rgba.r, rgba.g, rgba.b);
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn escapes_label_text() {
        let mut doc = SvgDoc::default();
        doc.text(Point::new(0.0, 0.0), 10.0, TextAnchor::Start, css::BLACK, "Q&A <forum>");
        let svg = doc.to_svg_string();
        assert!(svg.contains("Q&amp;A &lt;forum&gt;"));
    }

    #[test]
    fn view_box_covers_every_element() {
        let mut doc = SvgDoc::default();
        doc.rect(Rect::new(0.0, 0.0, 200.0, 20.0), css::TOMATO);
        doc.rect(Rect::new(0.0, 40.0, 50.0, 60.0), css::TOMATO);
        let svg = doc.to_svg_string();
        assert!(svg.contains(r#"viewBox="-10 -10 220 80""#), "{svg}");
        assert!(svg.contains(r##"fill="#ff6347""##));
    }
}
