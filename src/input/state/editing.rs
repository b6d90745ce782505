//! Explicit editing commands: per-element delete, text edits, page settings,
//! ink history, and page management.

use crate::page::{ElementId, HitTarget, TextStyle};

use super::{InputState, InteractionState};

impl InputState {
    /// Removes the most recently placed symbol on the current page.
    pub fn undo_last(&mut self) {
        match self.engine.undo_last(self.project.current_page_mut()) {
            Some(removed) => {
                log::debug!("Undo removed symbol {}", removed.id);
                self.observer.on_symbol_removed(removed.id);
                self.needs_redraw = true;
            }
            None => log::debug!("Nothing to undo"),
        }
    }

    /// Moves the insertion cursor to the start of the next line.
    pub fn line_break(&mut self) {
        if let Err(err) = self.engine.line_break(self.project.current_page_mut()) {
            self.warn(&format!("Line break rejected: {err}"));
            return;
        }
        self.needs_redraw = true;
    }

    pub fn remove_symbol(&mut self, id: ElementId) {
        if self
            .engine
            .remove(self.project.current_page_mut(), id)
            .is_some()
        {
            self.observer.on_symbol_removed(id);
            self.needs_redraw = true;
        }
    }

    /// Removes every symbol on the current page.
    pub fn clear_symbols(&mut self) {
        for removed in self.engine.clear(self.project.current_page_mut()) {
            self.observer.on_symbol_removed(removed.id);
        }
        self.needs_redraw = true;
    }

    pub fn remove_text(&mut self, id: ElementId) {
        if self.project.current_page_mut().remove_text(id).is_some() {
            self.cancel_drag_of(id);
            self.observer.on_text_removed(id);
            self.needs_redraw = true;
        }
    }

    pub fn remove_articulation(&mut self, id: ElementId) {
        if self
            .project
            .current_page_mut()
            .remove_articulation(id)
            .is_some()
        {
            self.cancel_drag_of(id);
            self.observer.on_articulation_removed(id);
            self.needs_redraw = true;
        }
    }

    pub fn remove_line(&mut self, id: ElementId) {
        if self.project.current_page_mut().remove_line(id).is_some() {
            self.cancel_drag_of(id);
            self.observer.on_line_removed(id);
            self.needs_redraw = true;
        }
    }

    fn cancel_drag_of(&mut self, id: ElementId) {
        if let InteractionState::Dragging(drag) = &self.state {
            let dragged = match drag.target {
                HitTarget::Text(t)
                | HitTarget::Articulation(t)
                | HitTarget::Line(t)
                | HitTarget::Symbol(t) => Some(t),
                HitTarget::Label(_) => None,
            };
            if dragged == Some(id) {
                self.state = InteractionState::Idle;
            }
        }
    }

    /// Replaces a text element's content (inline edit).
    pub fn update_text(&mut self, id: ElementId, content: String) {
        let Some(text) = self.project.current_page_mut().text_mut(id) else {
            return;
        };
        text.content = content;
        self.observer.on_text_updated(text);
        self.needs_redraw = true;
    }

    /// Flips one style flag on a text element.
    pub fn toggle_text_style(&mut self, id: ElementId, style: TextStyle) {
        let Some(text) = self.project.current_page_mut().text_mut(id) else {
            return;
        };
        let flag = match style {
            TextStyle::Bold => &mut text.bold,
            TextStyle::Italic => &mut text.italic,
            TextStyle::Underline => &mut text.underline,
        };
        *flag = !*flag;
        self.observer.on_text_updated(text);
        self.needs_redraw = true;
    }

    pub fn set_text_font_size(&mut self, id: ElementId, font_size: f64) {
        let Some(text) = self.project.current_page_mut().text_mut(id) else {
            return;
        };
        text.font_size = font_size.clamp(8.0, 72.0);
        self.observer.on_text_updated(text);
        self.needs_redraw = true;
    }

    pub fn set_tempo(&mut self, bpm: u32) {
        let page = self.project.current_page_mut();
        page.settings.tempo = bpm.clamp(20, 400);
        self.observer.on_settings_changed(&page.settings);
        self.needs_redraw = true;
    }

    pub fn set_key_signature(&mut self, key_signature: String) {
        let page = self.project.current_page_mut();
        page.settings.key_signature = key_signature;
        self.observer.on_settings_changed(&page.settings);
        self.needs_redraw = true;
    }

    pub fn set_time_signature(&mut self, time_signature: String) {
        let page = self.project.current_page_mut();
        page.settings.time_signature = time_signature;
        self.observer.on_settings_changed(&page.settings);
        self.needs_redraw = true;
    }

    /// Removes the newest pen stroke as a whole and redraws the overlay.
    pub fn undo_stroke(&mut self) {
        if self.project.current_page_mut().pop_stroke().is_some() {
            self.refresh_ink();
        }
    }

    pub fn clear_ink(&mut self) {
        self.cancel_interaction();
        self.project.current_page_mut().clear_ink();
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.clear();
        }
        self.observer.on_ink_changed(&[]);
        self.needs_redraw = true;
    }

    /// Removes every element and all ink from the current page. Settings are kept.
    pub fn clear_page(&mut self) {
        self.cancel_interaction();
        let page = self.project.current_page_mut();
        let removed_symbols: Vec<ElementId> = page.symbols().iter().map(|s| s.id).collect();
        let removed_texts: Vec<ElementId> = page.texts().iter().map(|t| t.id).collect();
        let removed_articulations: Vec<ElementId> =
            page.articulations().iter().map(|a| a.id).collect();
        let removed_lines: Vec<ElementId> = page.lines().iter().map(|l| l.id).collect();

        page.clear_elements();
        self.engine.rederive(page);

        for id in removed_symbols {
            self.observer.on_symbol_removed(id);
        }
        for id in removed_texts {
            self.observer.on_text_removed(id);
        }
        for id in removed_articulations {
            self.observer.on_articulation_removed(id);
        }
        for id in removed_lines {
            self.observer.on_line_removed(id);
        }
        self.refresh_ink();
        log::info!("Cleared page {}", self.project.current_index() + 1);
    }

    /// Appends an empty page and makes it current.
    pub fn add_page(&mut self) -> usize {
        let index = self.project.add_page();
        self.engine.rederive(&mut self.project.pages_mut()[index]);
        self.switch_page(index);
        index
    }

    /// Makes another page current, cancelling any interaction on the old one.
    pub fn switch_page(&mut self, index: usize) -> bool {
        if index == self.project.current_index() {
            return true;
        }
        self.cancel_interaction();
        if !self.project.switch_to(index) {
            self.warn(&format!("No page {}", index + 1));
            return false;
        }
        self.replay_overlay();
        log::info!(
            "Switched to page {}/{}",
            index + 1,
            self.project.page_count()
        );
        self.observer.on_page_switched(index);
        self.needs_redraw = true;
        true
    }

    /// Deletes a page. The last remaining page cannot be deleted.
    pub fn remove_page(&mut self, index: usize) -> bool {
        let was_current = index == self.project.current_index();
        if was_current {
            self.cancel_interaction();
        }
        if self.project.remove_page(index).is_none() {
            self.warn(&format!("Cannot remove page {}", index + 1));
            return false;
        }
        if was_current {
            self.replay_overlay();
        }
        self.observer.on_page_switched(self.project.current_index());
        self.needs_redraw = true;
        true
    }
}
