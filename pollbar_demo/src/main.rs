// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Survey bar chart demos for `pollbar`.
//!
//! Renders standard, mirrored, stacked and vertical bars plus a tooltip into a
//! single SVG file (`pollbar_demo.svg`, or the path given as first argument).
//! Set `RUST_LOG=pollbar_charts=trace` to see every placement fallback.

mod svg;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;
use pollbar_charts::{
    ChartGeometry, CumulativeLayout, EventKind, HorizontalBarChart, LabelAnchor, Orientation,
    Phase, PlacementConfig, PlannedBar, ScrollOrigin, TooltipConfig, TooltipContent,
    TooltipController, TooltipRequest, VerticalPlanner, ViewportEvent, ViewportEvents,
    hover_scale,
};
use pollbar_rows::{BarDatum, FractionScale, OrderResolver, RawRow, width_fractions};
use pollbar_text::{CATEGORY_CHAR_PX, VALUE_CHAR_PX, estimate_width};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::svg::{SvgDoc, TextAnchor};

const CANVAS: Size = Size::new(760.0, 1180.0);
const MARGIN: f64 = 20.0;
/// Room right of the bars for outside labels.
const LABEL_GUTTER: f64 = 140.0;
const ROW_H: f64 = 22.0;
const ROW_GAP: f64 = 8.0;
const PAD: f64 = 8.0;
const CATEGORY_FONT: f64 = 10.0;
const VALUE_FONT: f64 = 11.0;
const TITLE_FONT: f64 = 14.0;

const STACK_COLORS: [Color; 5] = [
    css::SEA_GREEN,
    css::MEDIUM_SEA_GREEN,
    css::DARK_GRAY,
    css::SALMON,
    css::TOMATO,
];

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the tracing subscriber")?;

    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pollbar_demo.svg".to_string());

    // The host owns the container measurement and feeds it from resize events.
    let events = ViewportEvents::new();
    let geometry = Rc::new(Cell::new(ChartGeometry::default()));
    let g = Rc::clone(&geometry);
    let _resize = events.subscribe(EventKind::Resize, Phase::Bubble, move |e| {
        if let ViewportEvent::Resize { width, .. } = *e {
            let mut measured = g.get();
            measured.measure(width - 2.0 * MARGIN - LABEL_GUTTER);
            g.set(measured);
        }
    });
    events.dispatch(&ViewportEvent::Resize {
        width: CANVAS.width,
        height: CANVAS.height,
    });
    let width = geometry.get().width_px();
    info!(width, "container measured");

    let tooltip = Rc::new(RefCell::new(TooltipController::new(TooltipConfig::default())));
    let _scroll = TooltipController::hide_on_scroll(&tooltip, &events);

    let mut doc = SvgDoc::default();
    let mut y = MARGIN;

    let channels = data(&[
        RawRow::new("Official Forum", "42%").with_count(84),
        RawRow::new("Discord", 31.0).with_count(62),
        RawRow::new("Third-party community wikis and fan-made video guides", "12%").with_count(24),
        RawRow::new("Mailing list", "3%").with_count(6),
        RawRow::new("Other", 0.4).with_count(1),
        RawRow::new("Carrier pigeon", "N/A"),
    ]);

    y = title(&mut doc, y, "Where do you get support? (standard bars)");
    let chart = HorizontalBarChart::new(PlacementConfig::default());
    let bars = chart.plan(&channels, geometry.get());
    let hovered = 1;
    let hovered_band = band(y, hovered, MARGIN, width);
    y = draw_horizontal(&mut doc, y, MARGIN, width, &bars, &channels, Some(hovered));

    // Hovering the second bar shows its tooltip next to the bar's end.
    let datum = &channels[hovered];
    let content = TooltipContent::for_bar(&datum.category, &datum.display_value, datum.count)
        .with_quotes([
            "Answers usually arrive within the hour, and the moderators are friendly.",
            "Search is hard; I keep asking questions already answered in the pinned threads.",
        ]);
    let box_size = content.estimated_size(VALUE_FONT * 0.6, VALUE_FONT * 1.3, PAD);
    let cursor = Point::new(
        hovered_band.x0 + bars[hovered].decision.bar_px,
        hovered_band.center().y,
    );
    tooltip
        .borrow_mut()
        .pointer_enter(content, &TooltipRequest::new(cursor, box_size, CANVAS));

    y = title(&mut doc, y + MARGIN, "Same question, last year (mirrored bars)");
    let last_year = data(&[
        RawRow::new("Official Forum", "55%").with_count(110),
        RawRow::new("Discord", "18%").with_count(36),
        RawRow::new("Third-party community wikis and fan-made video guides", "20%").with_count(40),
        RawRow::new("Mailing list", "7%").with_count(14),
    ]);
    let mirrored = HorizontalBarChart::mirrored(PlacementConfig::large_values())
        .with_scale(FractionScale::Total);
    let narrow = ChartGeometry::new(ChartGeometry::FALLBACK_WIDTH_PX).with_measurement(width * 0.6);
    let bars = mirrored.plan(&last_year, narrow);
    let flipped = bars
        .iter()
        .filter(|b| b.decision.show_category_outside_right || b.decision.show_value_outside_right)
        .count();
    info!(flipped, "mirrored bars with labels flipped to the inner side");
    let x0 = MARGIN + width - narrow.width_px();
    y = draw_horizontal(&mut doc, y, x0, narrow.width_px(), &bars, &last_year, None);

    y = title(&mut doc, y + MARGIN, "How satisfied are you? (stacked bars)");
    let stacks = [
        data(&[
            RawRow::new("Very satisfied", 10.0),
            RawRow::new("Satisfied", 50.0),
            RawRow::new("Neutral", 45.0),
        ]),
        data(&[
            RawRow::new("Very satisfied", 62.0),
            RawRow::new("Satisfied", 30.0),
            RawRow::new("Neutral", 5.0),
            RawRow::new("Dissatisfied", 2.0),
            RawRow::new("Very dissatisfied", 1.0),
        ]),
        data(&[
            RawRow::new("Very satisfied", 18.0),
            RawRow::new("Satisfied", 4.0),
            RawRow::new("Neutral", 0.0),
            RawRow::new("Dissatisfied", 6.0),
            RawRow::new("Very dissatisfied", 72.0),
        ]),
    ];
    for stack in &stacks {
        y = draw_stacked(&mut doc, y, width, stack);
    }

    y = title(&mut doc, y + MARGIN, "How often do you visit? (vertical bars)");
    let mut visits = data(&[
        RawRow::new("Often", 28.0).with_count(56),
        RawRow::new("Never", 6.0).with_count(12),
        RawRow::new("Always", 12.0).with_count(24),
        RawRow::new("Sometimes", 35.0).with_count(70),
        RawRow::new("Rarely", 19.0).with_count(38),
    ]);
    let source = OrderResolver::new().sort(&mut visits, |d| d.category.as_str());
    info!(?source, "categories ordered");
    visits.push(BarDatum::no_data("I would rather not say how often", None));
    y = draw_vertical(&mut doc, y, width, &visits);

    // The tooltip is drawn last so it sits above every chart.
    if let (Some(content), Some(placement)) = (
        tooltip.borrow().content().cloned(),
        tooltip.borrow().placement(),
    ) {
        let rect = placement.rect(box_size);
        doc.rect(rect, css::LIGHT_YELLOW);
        doc.lines(
            Point::new(rect.x0 + PAD, rect.y0 + PAD - VALUE_FONT * 0.65),
            VALUE_FONT,
            css::BLACK,
            content.lines(),
        );
        debug!(text = %content.to_text(), ?placement, "tooltip");
    }

    // A scroll anywhere (even inside a nested container) dismisses it.
    events.dispatch(&ViewportEvent::Scroll {
        origin: ScrollOrigin::Nested,
    });
    info!(visible = tooltip.borrow().is_visible(), "after nested scroll");

    std::fs::write(&out_path, doc.to_svg_string())
        .with_context(|| format!("failed to write {out_path}"))?;
    info!(path = %out_path, height = y, "wrote demo");
    Ok(())
}

fn data(rows: &[RawRow]) -> Vec<BarDatum> {
    rows.iter().map(BarDatum::from_row).collect()
}

fn title(doc: &mut SvgDoc, y: f64, text: &str) -> f64 {
    doc.text(
        Point::new(MARGIN, y + TITLE_FONT / 2.0),
        TITLE_FONT,
        TextAnchor::Start,
        css::BLACK,
        text,
    );
    y + TITLE_FONT + ROW_GAP
}

fn band(y: f64, row: usize, x0: f64, width: f64) -> Rect {
    let top = y + row as f64 * (ROW_H + ROW_GAP);
    Rect::new(x0, top, x0 + width, top + ROW_H)
}

fn draw_horizontal(
    doc: &mut SvgDoc,
    y: f64,
    x0: f64,
    width: f64,
    bars: &[PlannedBar],
    data: &[BarDatum],
    hovered: Option<usize>,
) -> f64 {
    for (i, (bar, datum)) in bars.iter().zip(data).enumerate() {
        let rect = bar.rect(band(y, i, x0, width));
        let fill = if datum.has_data { css::STEEL_BLUE } else { css::LIGHT_GRAY };
        let scale = hover_scale(Orientation::Horizontal, hovered == Some(i));
        if scale.is_identity() {
            doc.rect(rect, fill);
        } else {
            doc.rect_transformed(rect, fill, scale.transform_for(rect));
        }

        let d = &bar.decision;
        let mid = rect.center().y;
        // Inside labels start at the bar's anchored edge; the value sits at its tip.
        let (category_at, value_at) = if bar.from_right {
            ((rect.x1 - PAD, TextAnchor::End), (rect.x0 + PAD, TextAnchor::Start))
        } else {
            ((rect.x0 + PAD, TextAnchor::Start), (rect.x1 - PAD, TextAnchor::End))
        };
        if d.show_category_inside {
            let (x, anchor) = category_at;
            doc.text(Point::new(x, mid), CATEGORY_FONT, anchor, css::WHITE, &d.category_display);
        }
        if d.show_value_inside {
            let (x, anchor) = value_at;
            doc.text(Point::new(x, mid), VALUE_FONT, anchor, css::WHITE, &datum.display_value);
        }

        let mut default_side = Vec::new();
        let mut inner_side = Vec::new();
        if !d.show_category_inside {
            if d.show_category_outside_right {
                inner_side.push(d.category_display.as_str());
            } else {
                default_side.push(d.category_display.as_str());
            }
        }
        if !d.show_value_inside {
            if d.show_value_outside_right {
                inner_side.push(datum.display_value.as_str());
            } else {
                default_side.push(datum.display_value.as_str());
            }
        }
        if !default_side.is_empty() {
            let (x, anchor) = if bar.from_right {
                (rect.x0 - PAD, TextAnchor::End)
            } else {
                (rect.x1 + PAD, TextAnchor::Start)
            };
            let label = default_side.join("  ");
            doc.text(Point::new(x, mid), CATEGORY_FONT, anchor, css::DARK_SLATE_GRAY, &label);
        }
        if !inner_side.is_empty() {
            let label = inner_side.join("  ");
            doc.text(
                Point::new(rect.x1 + PAD, mid),
                CATEGORY_FONT,
                TextAnchor::Start,
                css::DARK_SLATE_GRAY,
                &label,
            );
        }
    }
    y + bars.len() as f64 * (ROW_H + ROW_GAP)
}

fn draw_stacked(doc: &mut SvgDoc, y: f64, width: f64, stack: &[BarDatum]) -> f64 {
    let fractions = width_fractions(stack, FractionScale::Total);
    let slots = CumulativeLayout::default().layout(&fractions);
    let label_y = y + ROW_H + CATEGORY_FONT;

    for (i, (slot, datum)) in slots.iter().zip(stack).enumerate() {
        let x = MARGIN + slot.offset_px(width);
        let rect = Rect::new(x, y, x + slot.bar_px(width), y + ROW_H);
        doc.rect(rect, STACK_COLORS[i % STACK_COLORS.len()]);

        let value = &datum.display_value;
        if !slot.small && estimate_width(value, VALUE_CHAR_PX) + 2.0 * PAD <= rect.width() {
            doc.text(rect.center(), VALUE_FONT, TextAnchor::Middle, css::WHITE, value);
            continue;
        }
        let label = format!("{} {}", datum.category, value);
        let fitted = slot.fit_label(&label, width, CATEGORY_CHAR_PX);
        if fitted.too_short_to_truncate {
            debug!(category = %datum.category, "stacked label dropped, no room on either side");
            continue;
        }
        let (pos, anchor) = match slot.label_anchor {
            LabelAnchor::Left => (Point::new(rect.x0, label_y), TextAnchor::End),
            LabelAnchor::Right => (Point::new(rect.x1, label_y), TextAnchor::Start),
        };
        doc.text(pos, CATEGORY_FONT, anchor, css::DARK_SLATE_GRAY, &fitted.text);
    }
    label_y + CATEGORY_FONT + ROW_GAP
}

fn draw_vertical(doc: &mut SvgDoc, y: f64, width: f64, columns: &[BarDatum]) -> f64 {
    const PLOT_H: f64 = 160.0;
    let planner = VerticalPlanner::default();
    let slot_w = width / columns.len().max(1) as f64;
    let padding = planner.config().slot_padding_px;
    let baseline = y + PLOT_H;
    let fractions = width_fractions(columns, FractionScale::MaxValue);

    for (i, (datum, fraction)) in columns.iter().zip(fractions).enumerate() {
        let d = planner.plan(
            &datum.category,
            &datum.display_value,
            fraction,
            PLOT_H,
            slot_w,
            !datum.has_data,
        );
        let x = MARGIN + i as f64 * slot_w;
        let rect = Rect::new(
            x + padding,
            baseline - d.bar_height_px,
            x + slot_w - padding,
            baseline,
        );
        let fill = if datum.has_data { css::STEEL_BLUE } else { css::LIGHT_GRAY };
        let scale = hover_scale(Orientation::Vertical, i == 2);
        if scale.is_identity() {
            doc.rect(rect, fill);
        } else {
            doc.rect_transformed(rect, fill, scale.transform_for(rect));
        }

        let cx = rect.center().x;
        if d.value_inside {
            let pos = Point::new(cx, rect.y0 + VALUE_FONT);
            doc.text(pos, VALUE_FONT, TextAnchor::Middle, css::WHITE, &datum.display_value);
        } else {
            let pos = Point::new(cx, rect.y0 - VALUE_FONT);
            doc.text(
                pos,
                VALUE_FONT,
                TextAnchor::Middle,
                css::DARK_SLATE_GRAY,
                &datum.display_value,
            );
        }

        let pos = Point::new(cx, baseline + CATEGORY_FONT);
        if d.category_rotated {
            doc.rotated_text(
                pos,
                CATEGORY_FONT,
                TextAnchor::Start,
                css::BLACK,
                30.0,
                &d.category_display,
            );
        } else {
            doc.text(pos, CATEGORY_FONT, TextAnchor::Middle, css::BLACK, &d.category_display);
        }
    }
    baseline + 4.0 * CATEGORY_FONT
}

#[cfg(test)]
mod tests {
    use pollbar_charts::{MirroredStrategy, PlacementStrategy};

    use super::*;

    #[test]
    fn rows_normalize_before_planning() {
        let rows = data(&[RawRow::new("A", "-"), RawRow::new("B", " 12% ").with_count(3)]);
        assert!(!rows[0].has_data);
        assert_eq!(rows[1].display_value, "12%");
    }

    #[test]
    fn bands_stack_downwards() {
        let a = band(0.0, 0, MARGIN, 100.0);
        let b = band(0.0, 1, MARGIN, 100.0);
        assert_eq!(b.y0 - a.y0, ROW_H + ROW_GAP);
    }

    #[test]
    fn strategies_pick_the_growth_edge() {
        let chart = HorizontalBarChart::mirrored(PlacementConfig::default());
        let bars = chart.plan(&data(&[RawRow::new("A", 50.0)]), ChartGeometry::default());
        assert!(bars[0].from_right);
        assert!(MirroredStrategy.grows_from_right());
    }
}
