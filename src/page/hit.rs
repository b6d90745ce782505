//! Hit-testing for draggable page elements.
//!
//! Kinds are tested in a fixed order (text, articulations, lines, symbols,
//! metadata labels) and the first match wins. Within a kind the most
//! recently created element is tested first.

use super::{ElementId, LabelKind, Page, TextElement};
use crate::notation::NotationRegistry;
use crate::util::{Bounds, Point, point_segment_distance};

/// Average glyph advance relative to the font size, used when no font
/// metrics are available.
const CHAR_WIDTH_FACTOR: f64 = 0.6;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Element found under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Text(ElementId),
    Articulation(ElementId),
    Line(ElementId),
    Symbol(ElementId),
    Label(LabelKind),
}

/// Distances within which an element counts as hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTolerance {
    /// Radius around an articulation centre
    pub articulation_radius: f64,
    /// Radius around a symbol's visual centre
    pub symbol_radius: f64,
    /// Maximum distance from a line segment
    pub line_tolerance: f64,
    /// Font size used to estimate label bounds
    pub label_font_size: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            articulation_radius: 15.0,
            symbol_radius: 24.0,
            line_tolerance: 6.0,
            label_font_size: 18.0,
        }
    }
}

/// Estimated bounds of a block of text anchored at its top-left corner.
pub fn estimate_text_bounds(content: &str, x: f64, y: f64, font_size: f64) -> Option<Bounds> {
    let longest = content
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let line_count = content.lines().count().max(1);
    Bounds::new(
        x,
        y,
        longest as f64 * font_size * CHAR_WIDTH_FACTOR,
        line_count as f64 * font_size * LINE_HEIGHT_FACTOR,
    )
}

fn text_bounds(text: &TextElement) -> Option<Bounds> {
    estimate_text_bounds(&text.content, text.x, text.y, text.font_size)
}

/// Finds the draggable element under `point`.
pub fn hit_test(
    page: &Page,
    registry: &NotationRegistry,
    point: Point,
    tolerance: &HitTolerance,
) -> Option<HitTarget> {
    if let Some(text) = page
        .texts()
        .iter()
        .rev()
        .find(|t| text_bounds(t).is_some_and(|b| b.contains(point.x, point.y)))
    {
        return Some(HitTarget::Text(text.id));
    }

    if let Some(articulation) = page
        .articulations()
        .iter()
        .rev()
        .find(|a| a.position().distance_to(point) <= tolerance.articulation_radius)
    {
        return Some(HitTarget::Articulation(articulation.id));
    }

    if let Some(line) = page.lines().iter().rev().find(|l| {
        let reach = tolerance.line_tolerance.max(l.thickness / 2.0);
        point_segment_distance(point, l.start(), l.end()) <= reach
    }) {
        return Some(HitTarget::Line(line.id));
    }

    if let Some(symbol) = page.symbols().iter().rev().find(|s| {
        registry.lookup(s.trigger).is_some_and(|descriptor| {
            let centre = Point::new(
                s.x + descriptor.width / 2.0,
                s.y + descriptor.height / 2.0,
            );
            centre.distance_to(point) <= tolerance.symbol_radius
        })
    }) {
        return Some(HitTarget::Symbol(symbol.id));
    }

    LabelKind::ALL.into_iter().find_map(|kind| {
        let anchor = page.settings.labels.get(kind);
        let text = page.settings.label_text(kind);
        estimate_text_bounds(&text, anchor.x, anchor.y, tolerance.label_font_size)
            .filter(|b| b.contains(point.x, point.y))
            .map(|_| HitTarget::Label(kind))
    })
}
