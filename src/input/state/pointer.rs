use crate::input::events::PointerButton;
use crate::input::tool::ToolMode;
use crate::util::Point;

use super::{InputState, InteractionState};

impl InputState {
    /// Processes a pointer button press.
    ///
    /// # Behavior
    /// - Secondary button: cancels the current interaction
    /// - Primary during text entry: moves the text anchor
    /// - Primary while idle, first match wins:
    ///   1. a draggable element under the pointer starts a drag (not in eraser mode)
    ///   2. pen, eraser, or line mode starts a canvas gesture
    ///   3. text mode opens text entry at the pointer
    ///   4. articulation mode places the articulation
    ///   5. a selected notation is placed at the pointer
    pub fn on_pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        self.sync_tool_signal();
        let point = Point::new(x, y);
        self.last_pointer = point;

        match button {
            PointerButton::Primary => {}
            PointerButton::Secondary => {
                self.cancel_interaction();
                return;
            }
            PointerButton::Middle => return,
        }

        if let InteractionState::TextInput { x: tx, y: ty, .. } = &mut self.state {
            *tx = x;
            *ty = y;
            self.needs_redraw = true;
            return;
        }
        if self.state != InteractionState::Idle {
            return;
        }

        if self.mode != ToolMode::Eraser {
            if let Some(target) = self.hit_test(point) {
                if self.begin_drag(target, point) {
                    self.needs_redraw = true;
                    return;
                }
            }
        }

        if self.mode.routes_to_canvas() {
            self.begin_canvas_gesture(point);
            return;
        }

        match self.mode {
            ToolMode::TextPending => {
                self.state = InteractionState::TextInput {
                    x,
                    y,
                    buffer: String::new(),
                };
                self.needs_redraw = true;
            }
            ToolMode::ArticulationPending(kind) => {
                let (x, y) = self.engine.layout().clamp_click(x, y);
                let articulation = self
                    .project
                    .current_page_mut()
                    .add_articulation(kind, x, y);
                self.observer.on_articulation_added(articulation);
                self.needs_redraw = true;
            }
            ToolMode::None => {
                let Some(symbol) = self
                    .selected_notation
                    .and_then(|trigger| self.registry.lookup(trigger))
                else {
                    return;
                };
                let placed =
                    self.engine
                        .place_at_click(self.project.current_page_mut(), symbol, x, y);
                self.observer.on_symbol_added(placed);
                self.needs_redraw = true;
            }
            ToolMode::Pen | ToolMode::Eraser | ToolMode::Line => {}
        }
    }

    /// Processes pointer motion.
    ///
    /// Extends pen strokes and eraser gestures, updates the line preview,
    /// and moves dragged elements.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let point = Point::new(x, y);
        self.last_pointer = point;

        match self.state {
            InteractionState::Drawing { .. }
            | InteractionState::DrawingLine { .. }
            | InteractionState::Erasing => self.continue_canvas_gesture(point),
            InteractionState::Dragging(_) => self.drag_to(point),
            InteractionState::Idle | InteractionState::TextInput { .. } => {}
        }
    }

    /// Processes a pointer button release, committing the gesture or drag.
    pub fn on_pointer_up(&mut self, button: PointerButton, x: f64, y: f64) {
        if button != PointerButton::Primary {
            return;
        }
        let point = Point::new(x, y);
        self.last_pointer = point;

        match self.state {
            InteractionState::Dragging(_) => self.end_drag(),
            InteractionState::Drawing { .. }
            | InteractionState::DrawingLine { .. }
            | InteractionState::Erasing => self.finish_canvas_gesture(point),
            InteractionState::Idle | InteractionState::TextInput { .. } => {}
        }
    }

    /// The pointer left the canvas: treated as a release at the last known
    /// position so no gesture stays stuck.
    pub fn on_pointer_leave(&mut self) {
        let last = self.last_pointer;
        self.on_pointer_up(PointerButton::Primary, last.x, last.y);
    }
}
