use crate::config::Action;
use crate::input::events::Key;
use crate::input::tool::ToolMode;

use super::{InputState, InteractionState};

/// Longest text the entry flow accepts.
const MAX_TEXT_LENGTH: usize = 10_000;

impl InputState {
    /// Processes a key press.
    ///
    /// While text entry is open every key goes to it. Otherwise keys are
    /// ignored while the host reports text focus or an open modal. Reserved
    /// bindings (undo-last, line-break, cancel) are checked next, then the
    /// key is looked up as a notation trigger for sequential placement.
    pub fn on_key_press(&mut self, key: Key) {
        self.sync_tool_signal();

        if matches!(self.state, InteractionState::TextInput { .. }) {
            self.handle_text_entry_key(key);
            return;
        }

        if self.text_focus || self.modal_open {
            log::debug!("Ignoring {key:?}: host control has focus");
            return;
        }

        if let Some(action) = self.find_action(key) {
            self.handle_action(action);
            return;
        }

        let Key::Char(trigger) = key else {
            return;
        };
        if self.mode.is_active() || !self.keyboard_input {
            return;
        }
        self.place_sequential(trigger, None);
    }

    fn handle_text_entry_key(&mut self, key: Key) {
        let InteractionState::TextInput { x, y, buffer } = &mut self.state else {
            return;
        };

        match key {
            Key::Char(c) => push_limited(buffer, c),
            Key::Space => push_limited(buffer, ' '),
            Key::Tab => push_limited(buffer, '\t'),
            Key::Backspace => {
                buffer.pop();
            }
            Key::Return => {
                let (x, y) = (*x, *y);
                let content = std::mem::take(buffer);
                self.state = InteractionState::Idle;
                if !content.is_empty() {
                    let text = self.project.current_page_mut().add_text(
                        content,
                        x,
                        y,
                        self.text_font_size,
                    );
                    log::debug!("Committed text {} at ({x}, {y})", text.id);
                    self.observer.on_text_added(text);
                }
            }
            Key::Escape => self.state = InteractionState::Idle,
            Key::Unknown => return,
        }
        self.needs_redraw = true;
    }

    /// Runs a reserved action.
    ///
    /// Undo-last needs a sequential source and no tool; line-break needs no
    /// tool; cancel always works and leaves any tool mode.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Cancel => {
                self.cancel_interaction();
                self.set_tool_mode(ToolMode::None);
            }
            Action::UndoLast => {
                if self.mode.is_active() || !self.sequential_source_enabled() {
                    log::debug!("Undo-last ignored: no sequential input active");
                    return;
                }
                self.undo_last();
            }
            Action::LineBreak => {
                if self.mode.is_active() {
                    return;
                }
                self.line_break();
            }
        }
    }
}

fn push_limited(buffer: &mut String, c: char) {
    if buffer.len() + c.len_utf8() > MAX_TEXT_LENGTH {
        log::warn!("Text entry is limited to {MAX_TEXT_LENGTH} bytes");
        return;
    }
    buffer.push(c);
}
