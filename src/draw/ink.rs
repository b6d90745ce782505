//! Freehand ink: committed strokes, eraser dabs, and the raster overlay they paint.
//!
//! The overlay is an independent ARGB surface layered over the placed
//! elements. Pen segments are painted incrementally while a stroke is in
//! progress; whenever the page's ink history changes the overlay is cleared
//! and the whole history is replayed in order, so eraser dabs recorded after
//! a stroke keep removing that stroke's pixels.

use super::color::Color;
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// A committed freehand pen stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnStroke {
    /// Polyline points in the order they were recorded
    pub points: Vec<Point>,
    pub color: Color,
    pub thickness: f64,
}

/// One entry of a page's ink history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InkOp {
    /// A committed pen stroke
    Stroke(DrawnStroke),
    /// A destructive circular erase
    Erase { x: f64, y: f64, radius: f64 },
}

/// Raster surface holding the ink layer for the current page.
pub struct InkOverlay {
    surface: cairo::ImageSurface,
}

impl InkOverlay {
    /// Allocates a transparent overlay of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, cairo::Error> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// The underlying surface, for compositing onto a page render.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    fn context(&self) -> Option<cairo::Context> {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                log::debug!("Ink overlay context unavailable: {err}");
                None
            }
        }
    }

    /// Wipes the overlay to fully transparent.
    pub fn clear(&mut self) {
        if let Some(ctx) = self.context() {
            clear_context(&ctx);
        }
    }

    /// Clears the overlay and replays the full ink history.
    pub fn replay(&mut self, ops: &[InkOp]) {
        let Some(ctx) = self.context() else {
            return;
        };
        clear_context(&ctx);
        render_ink(&ctx, ops);
    }

    /// Paints a single segment of an in-progress stroke.
    pub fn paint_segment(&mut self, from: Point, to: Point, color: Color, thickness: f64) {
        let Some(ctx) = self.context() else {
            return;
        };
        color.apply(&ctx);
        ctx.set_line_width(thickness);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        let _ = ctx.stroke();
    }

    /// Removes existing ink inside a circle.
    pub fn erase(&mut self, x: f64, y: f64, radius: f64) {
        if let Some(ctx) = self.context() {
            render_erase(&ctx, x, y, radius);
        }
    }

    /// Reads the alpha channel of one pixel; `None` when out of bounds.
    pub fn alpha_at(&mut self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let pixel = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        Some((pixel >> 24) as u8)
    }

    /// Returns true when any pixel carries ink.
    pub fn has_ink(&mut self) -> bool {
        self.surface.flush();
        self.surface
            .data()
            .map(|data| data.iter().any(|byte| *byte != 0))
            .unwrap_or(false)
    }
}

fn clear_context(ctx: &cairo::Context) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Replays ink operations onto a context in history order.
pub fn render_ink(ctx: &cairo::Context, ops: &[InkOp]) {
    for op in ops {
        match op {
            InkOp::Stroke(stroke) => render_stroke(ctx, stroke),
            InkOp::Erase { x, y, radius } => render_erase(ctx, *x, *y, *radius),
        }
    }
}

/// Render a committed stroke (polyline through its points).
pub fn render_stroke(ctx: &cairo::Context, stroke: &DrawnStroke) {
    render_polyline(ctx, &stroke.points, stroke.color, stroke.thickness);
}

/// Render a polyline from borrowed points, e.g. a stroke still in progress.
pub fn render_polyline(ctx: &cairo::Context, points: &[Point], color: Color, thickness: f64) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    color.apply(ctx);
    ctx.set_line_width(thickness);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    let _ = ctx.stroke();
}

fn render_erase(ctx: &cairo::Context, x: f64, y: f64, radius: f64) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Clear);
    ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU);
    let _ = ctx.fill();
    let _ = ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLACK;

    fn stroke(points: &[(f64, f64)]) -> DrawnStroke {
        DrawnStroke {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            color: BLACK,
            thickness: 4.0,
        }
    }

    #[test]
    fn replay_paints_strokes() {
        let mut overlay = InkOverlay::new(100, 100).unwrap();
        assert!(!overlay.has_ink());

        overlay.replay(&[InkOp::Stroke(stroke(&[(10.0, 50.0), (90.0, 50.0)]))]);
        assert_eq!(overlay.alpha_at(50, 50), Some(255));
        assert_eq!(overlay.alpha_at(50, 10), Some(0));
    }

    #[test]
    fn erase_after_stroke_survives_replay() {
        let mut overlay = InkOverlay::new(100, 100).unwrap();
        let ops = vec![
            InkOp::Stroke(stroke(&[(10.0, 50.0), (90.0, 50.0)])),
            InkOp::Erase {
                x: 50.0,
                y: 50.0,
                radius: 10.0,
            },
        ];

        overlay.replay(&ops);
        assert_eq!(overlay.alpha_at(50, 50), Some(0));
        assert_eq!(overlay.alpha_at(20, 50), Some(255));
    }

    #[test]
    fn clear_removes_everything() {
        let mut overlay = InkOverlay::new(40, 40).unwrap();
        overlay.paint_segment(Point::new(0.0, 20.0), Point::new(40.0, 20.0), BLACK, 6.0);
        assert!(overlay.has_ink());
        overlay.clear();
        assert!(!overlay.has_ink());
    }

    #[test]
    fn alpha_out_of_bounds_is_none() {
        let mut overlay = InkOverlay::new(10, 10).unwrap();
        assert_eq!(overlay.alpha_at(10, 0), None);
        assert_eq!(overlay.alpha_at(-1, 3), None);
    }

    #[test]
    fn ink_op_serializes_with_tag() {
        let json = serde_json::to_string(&InkOp::Erase {
            x: 1.0,
            y: 2.0,
            radius: 3.0,
        })
        .unwrap();
        assert!(json.contains("\"op\":\"erase\""));
    }
}
