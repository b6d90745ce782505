use crate::draw::ink::{DrawnStroke, InkOp};
use crate::input::tool::ToolMode;
use crate::util::Point;

use super::{InputState, InteractionState};

impl InputState {
    /// Starts a pen stroke, eraser gesture, or line at `point` depending on
    /// the tool mode.
    pub(super) fn begin_canvas_gesture(&mut self, point: Point) {
        match self.mode {
            ToolMode::Pen => {
                self.state = InteractionState::Drawing {
                    points: vec![point],
                };
            }
            ToolMode::Eraser => {
                self.state = InteractionState::Erasing;
                self.erase_at(point);
            }
            ToolMode::Line => {
                self.state = InteractionState::DrawingLine {
                    start: point,
                    current: point,
                };
            }
            _ => return,
        }
        self.needs_redraw = true;
    }

    /// Extends the gesture in progress to `point`.
    pub(super) fn continue_canvas_gesture(&mut self, point: Point) {
        if self.state == InteractionState::Erasing {
            self.erase_at(point);
            return;
        }

        match &mut self.state {
            InteractionState::Drawing { points } => {
                let Some(&previous) = points.last() else {
                    return;
                };
                points.push(point);
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.paint_segment(previous, point, self.pen_color, self.pen_thickness);
                }
            }
            InteractionState::DrawingLine { current, .. } => *current = point,
            _ => return,
        }
        self.needs_redraw = true;
    }

    /// Commits the gesture in progress.
    pub(super) fn finish_canvas_gesture(&mut self, point: Point) {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing { points } => self.commit_stroke(points),
            InteractionState::DrawingLine { start, .. } => self.commit_line(start, point),
            InteractionState::Erasing => {}
            other => self.state = other,
        }
    }

    fn commit_stroke(&mut self, points: Vec<Point>) {
        if points.len() < 2 {
            log::debug!("Discarding single-point stroke");
            self.replay_overlay();
            return;
        }

        log::debug!("Committing stroke with {} points", points.len());
        self.project
            .current_page_mut()
            .push_ink(InkOp::Stroke(DrawnStroke {
                points,
                color: self.pen_color,
                thickness: self.pen_thickness,
            }));
        self.refresh_ink();
    }

    fn commit_line(&mut self, start: Point, end: Point) {
        if start == end {
            log::debug!("Discarding zero-length line");
            return;
        }

        let line = self.project.current_page_mut().add_line(
            (start.x, start.y),
            (end.x, end.y),
            self.pen_color,
            self.pen_thickness,
        );
        self.observer.on_line_added(line);
        self.needs_redraw = true;
    }

    /// Erases ink around `point` and deletes articulations whose centre is
    /// within the eraser radius. Placed symbols and text are left alone.
    ///
    /// Without an overlay the raster part is skipped. Dabs are only
    /// recorded while the page has strokes for them to cut into.
    pub(super) fn erase_at(&mut self, point: Point) {
        let radius = self.eraser_radius;
        let page = self.project.current_page_mut();

        let has_strokes = page.strokes().next().is_some();
        if has_strokes {
            page.push_ink(InkOp::Erase {
                x: point.x,
                y: point.y,
                radius,
            });
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.erase(point.x, point.y, radius);
            }
        }

        for id in page.remove_articulations_within(point.x, point.y, radius) {
            log::debug!("Eraser removed articulation {id}");
            self.observer.on_articulation_removed(id);
        }

        if has_strokes {
            self.observer.on_ink_changed(page.ink());
        }
        self.needs_redraw = true;
    }
}
