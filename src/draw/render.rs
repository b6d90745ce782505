//! Cairo-based rendering of a score page.

use super::color::{Color, BLACK, GRAY, WHITE};
use super::font::FontDescriptor;
use super::ink::render_ink;
use crate::config::Config;
use crate::notation::NotationRegistry;
use crate::page::{
    ArticulationElement, LabelKind, LineElement, Page, PlacedSymbol, TextElement,
};
use crate::placement::SheetLayout;

/// Everything besides page content that affects how a page looks.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    /// Draw faint horizontal guides at each writing line
    pub staff_guides: bool,
    pub text_family: String,
    /// Font used for notation glyphs and articulation marks
    pub notation_family: String,
    pub symbol_font_size: f64,
    pub label_font_size: f64,
    /// Output scale applied by exporters
    pub scale: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RenderStyle {
    fn from(config: &Config) -> Self {
        Self {
            background: config.export.background.to_color_or(WHITE),
            staff_guides: config.export.staff_guides,
            text_family: config.text.font_family.clone(),
            notation_family: config.text.notation_font.clone(),
            symbol_font_size: config.export.symbol_font_size,
            label_font_size: config.hit_test.label_font_size,
            scale: config.export.scale,
        }
    }
}

/// Renders a full page: background, guides, symbols, lines, text,
/// articulations, labels, and finally the ink layer.
///
/// When `ink` is given (the live overlay surface) it is composited as-is;
/// otherwise the page's ink history is replayed onto an isolated group so
/// eraser operations only clear ink.
pub fn render_page(
    ctx: &cairo::Context,
    page: &Page,
    registry: &NotationRegistry,
    layout: &SheetLayout,
    style: &RenderStyle,
    ink: Option<&cairo::ImageSurface>,
) {
    render_background(ctx, layout, style);
    if style.staff_guides {
        render_staff_guides(ctx, layout);
    }

    for symbol in page.symbols() {
        render_symbol(ctx, registry, symbol, style);
    }
    for line in page.lines() {
        render_line(ctx, line);
    }
    for text in page.texts() {
        render_text(ctx, text, &style.text_family);
    }
    for articulation in page.articulations() {
        render_articulation(ctx, articulation, style);
    }
    for kind in LabelKind::ALL {
        let position = page.settings.labels.get(kind);
        render_label(
            ctx,
            &page.settings.label_text(kind),
            position.x,
            position.y,
            style,
        );
    }

    match ink {
        Some(surface) => {
            if ctx.set_source_surface(surface, 0.0, 0.0).is_ok() {
                let _ = ctx.paint();
            }
        }
        None => {
            ctx.push_group();
            render_ink(ctx, page.ink());
            if ctx.pop_group_to_source().is_ok() {
                let _ = ctx.paint();
            }
        }
    }
}

/// Fills the sheet with the background color.
pub fn render_background(ctx: &cairo::Context, layout: &SheetLayout, style: &RenderStyle) {
    style.background.apply(ctx);
    ctx.rectangle(0.0, 0.0, layout.width, layout.height);
    let _ = ctx.fill();
}

fn render_staff_guides(ctx: &cairo::Context, layout: &SheetLayout) {
    let guide = Color { a: 0.35, ..GRAY };
    guide.apply(ctx);
    ctx.set_line_width(1.0);
    for &y in layout.line_positions() {
        ctx.move_to(layout.left_boundary, y);
        ctx.line_to(layout.right_boundary, y);
    }
    let _ = ctx.stroke();
}

/// Draws a symbol's glyph inside its box, bottom-aligned so the glyph's
/// baseline sits on the box's lower edge.
fn render_symbol(
    ctx: &cairo::Context,
    registry: &NotationRegistry,
    symbol: &PlacedSymbol,
    style: &RenderStyle,
) {
    let Some(descriptor) = registry.lookup(symbol.trigger) else {
        log::debug!("No descriptor for placed symbol '{}'", symbol.trigger);
        return;
    };

    let layout = pangocairo::functions::create_layout(ctx);
    let font = FontDescriptor::new(
        style.notation_family.clone(),
        "normal".to_string(),
        "normal".to_string(),
    );
    layout.set_font_description(Some(&font.to_pango(style.symbol_font_size)));
    layout.set_text(descriptor.glyph);

    let (_, logical) = layout.extents();
    let glyph_width = logical.width() as f64 / pango::SCALE as f64;
    let glyph_height = logical.height() as f64 / pango::SCALE as f64;
    let x = symbol.x + (descriptor.width - glyph_width) / 2.0;
    let y = symbol.y + descriptor.height - glyph_height;

    BLACK.apply(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);
}

fn render_line(ctx: &cairo::Context, line: &LineElement) {
    line.color.apply(ctx);
    ctx.set_line_width(line.thickness);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(line.x1, line.y1);
    ctx.line_to(line.x2, line.y2);
    let _ = ctx.stroke();
}

/// Renders a text element with its style flags at its top-left anchor.
pub fn render_text(ctx: &cairo::Context, text: &TextElement, family: &str) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font = FontDescriptor::for_text(family, text.bold, text.italic);
    layout.set_font_description(Some(&font.to_pango(text.font_size)));
    layout.set_text(&text.content);

    if text.underline {
        let attrs = pango::AttrList::new();
        attrs.insert(pango::AttrInt::new_underline(pango::Underline::Single));
        layout.set_attributes(Some(&attrs));
    }

    BLACK.apply(ctx);
    ctx.move_to(text.x, text.y);
    pangocairo::functions::show_layout(ctx, &layout);
}

/// Renders an articulation mark centred on its position.
fn render_articulation(ctx: &cairo::Context, articulation: &ArticulationElement, style: &RenderStyle) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font = FontDescriptor::new(
        style.notation_family.clone(),
        "normal".to_string(),
        "normal".to_string(),
    );
    layout.set_font_description(Some(&font.to_pango(style.label_font_size)));
    layout.set_text(&articulation.symbol);

    let (_, logical) = layout.extents();
    let width = logical.width() as f64 / pango::SCALE as f64;
    let height = logical.height() as f64 / pango::SCALE as f64;

    BLACK.apply(ctx);
    ctx.move_to(articulation.x - width / 2.0, articulation.y - height / 2.0);
    pangocairo::functions::show_layout(ctx, &layout);
}

pub(crate) fn render_label(ctx: &cairo::Context, text: &str, x: f64, y: f64, style: &RenderStyle) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font = FontDescriptor::for_text(&style.text_family, true, false);
    layout.set_font_description(Some(&font.to_pango(style.label_font_size)));
    layout.set_text(text);

    BLACK.apply(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);
}

/// Draws the text-entry caret box at `(x, y)` with the buffer typed so far.
pub fn render_text_entry(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    buffer: &str,
    family: &str,
    font_size: f64,
) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font = FontDescriptor::for_text(family, false, false);
    layout.set_font_description(Some(&font.to_pango(font_size)));
    layout.set_text(buffer);

    let (_, logical) = layout.extents();
    let width = logical.width() as f64 / pango::SCALE as f64;
    let height = (logical.height() as f64 / pango::SCALE as f64).max(font_size);

    BLACK.apply(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);

    // Caret
    let caret = Color { a: 0.8, ..GRAY };
    caret.apply(ctx);
    ctx.set_line_width(1.0);
    ctx.move_to(x + width + 1.0, y);
    ctx.line_to(x + width + 1.0, y + height);
    let _ = ctx.stroke();
}
