use crate::page::{HitTarget, hit_test};
use crate::util::Point;

use super::{InputState, InteractionState};

/// An element being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub target: HitTarget,
    /// Pointer position minus element position at pointer-down
    pub offset: Point,
    /// Label position during the drag; labels commit it on release
    pub preview: Option<Point>,
}

impl DragState {
    pub(super) fn log_cancel(&self) {
        log::debug!("Drag of {:?} cancelled", self.target);
    }
}

impl InputState {
    /// Finds the draggable element under `pointer` on the current page.
    pub fn hit_test(&self, pointer: Point) -> Option<HitTarget> {
        hit_test(
            self.project.current_page(),
            &self.registry,
            pointer,
            &self.hit_tolerance,
        )
    }

    /// Position a drag offset is measured from: the text anchor, an
    /// articulation centre, a line's start point, a symbol's top-left
    /// corner, or a label anchor.
    fn drag_origin(&self, target: HitTarget) -> Option<Point> {
        let page = self.project.current_page();
        match target {
            HitTarget::Text(id) => page.text(id).map(|t| t.position()),
            HitTarget::Articulation(id) => page
                .articulations()
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.position()),
            HitTarget::Line(id) => page.lines().iter().find(|l| l.id == id).map(|l| l.start()),
            HitTarget::Symbol(id) => page.symbol(id).map(|s| s.position()),
            HitTarget::Label(kind) => Some(page.settings.labels.get(kind)),
        }
    }

    /// Starts dragging `target`. Returns false if it no longer exists.
    pub(super) fn begin_drag(&mut self, target: HitTarget, pointer: Point) -> bool {
        let Some(origin) = self.drag_origin(target) else {
            return false;
        };
        log::debug!("Dragging {target:?}");
        self.state = InteractionState::Dragging(DragState {
            target,
            offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
            preview: None,
        });
        true
    }

    /// Moves the dragged element so it keeps its offset from the pointer.
    ///
    /// Ordinary elements are written immediately; labels only update their preview.
    pub(super) fn drag_to(&mut self, pointer: Point) {
        let InteractionState::Dragging(drag) = &mut self.state else {
            return;
        };
        let position = Point::new(pointer.x - drag.offset.x, pointer.y - drag.offset.y);
        if let HitTarget::Label(_) = drag.target {
            drag.preview = Some(position);
            self.needs_redraw = true;
            return;
        }

        let target = drag.target;
        let page = self.project.current_page_mut();
        let observer = &mut self.observer;
        let moved = match target {
            HitTarget::Text(id) => page.text_mut(id).map(|text| {
                text.x = position.x;
                text.y = position.y;
                observer.on_text_updated(text);
            }),
            HitTarget::Articulation(id) => page.articulation_mut(id).map(|articulation| {
                articulation.x = position.x;
                articulation.y = position.y;
                observer.on_articulation_moved(articulation);
            }),
            HitTarget::Line(id) => page.line_mut(id).map(|line| {
                line.translate_start_to(position);
                observer.on_line_moved(line);
            }),
            HitTarget::Symbol(id) => page.symbol_mut(id).map(|symbol| {
                symbol.x = position.x;
                symbol.y = position.y;
                observer.on_symbol_moved(symbol);
            }),
            HitTarget::Label(_) => None,
        };

        if moved.is_none() {
            log::debug!("Dragged element {target:?} disappeared; ending drag");
            self.state = InteractionState::Idle;
        }
        self.needs_redraw = true;
    }

    /// Finishes the drag. Labels commit their final position to the page
    /// settings; symbols update their line and the cursor is re-derived.
    pub(super) fn end_drag(&mut self) {
        let InteractionState::Dragging(drag) =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        else {
            return;
        };

        let page = self.project.current_page_mut();
        match drag.target {
            HitTarget::Label(kind) => {
                if let Some(position) = drag.preview {
                    page.settings.labels.set(kind, position);
                    self.observer.on_settings_changed(&page.settings);
                }
            }
            HitTarget::Symbol(id) => {
                let layout = self.engine.layout();
                if let Some(symbol) = page.symbol_mut(id) {
                    symbol.stave = layout.nearest_line(symbol.y);
                    self.observer.on_symbol_moved(symbol);
                }
                self.engine.rederive(page);
            }
            _ => {}
        }
        log::debug!("Drag of {:?} finished", drag.target);
        self.needs_redraw = true;
    }
}
