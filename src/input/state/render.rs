use crate::draw::ink::render_polyline;
use crate::draw::render::{render_label, render_text_entry};
use crate::draw::{RenderStyle, render_page};
use crate::page::HitTarget;

use super::{InputState, InteractionState};

impl InputState {
    /// Renders the current page plus whatever the active interaction is
    /// previewing.
    pub fn render(&self, ctx: &cairo::Context, style: &RenderStyle) {
        render_page(
            ctx,
            self.project.current_page(),
            &self.registry,
            self.engine.layout(),
            style,
            self.overlay.as_ref().map(|overlay| overlay.surface()),
        );
        self.render_preview(ctx, style);
    }

    /// Draws the provisional part of the current interaction: a stroke not
    /// yet painted on an overlay, the rubber-band line, a dragged label,
    /// or the text being typed. A dragged label shows as a ghost until
    /// release.
    pub fn render_preview(&self, ctx: &cairo::Context, style: &RenderStyle) {
        match &self.state {
            // With an overlay the segments are already painted
            InteractionState::Drawing { points } if self.overlay.is_none() => {
                render_polyline(ctx, points, self.pen_color, self.pen_thickness);
            }
            InteractionState::DrawingLine { start, current } => {
                self.pen_color.apply(ctx);
                ctx.set_line_width(self.pen_thickness);
                ctx.set_line_cap(cairo::LineCap::Round);
                ctx.move_to(start.x, start.y);
                ctx.line_to(current.x, current.y);
                let _ = ctx.stroke();
            }
            InteractionState::Dragging(drag) => {
                if let (HitTarget::Label(kind), Some(position)) = (drag.target, drag.preview) {
                    let text = self.project.current_page().settings.label_text(kind);
                    ctx.push_group();
                    render_label(ctx, &text, position.x, position.y, style);
                    if ctx.pop_group_to_source().is_ok() {
                        let _ = ctx.paint_with_alpha(0.5);
                    }
                }
            }
            InteractionState::TextInput { x, y, buffer } => {
                render_text_entry(ctx, *x, *y, buffer, &style.text_family, self.text_font_size);
            }
            InteractionState::Idle | InteractionState::Erasing | InteractionState::Drawing { .. } => {}
        }
    }
}
