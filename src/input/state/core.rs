//! Input router state: tool mode, input sources, and the interaction state machine.

use super::drag::DragState;
use crate::config::{Action, Config, KeyBinding, KeybindingError};
use crate::draw::Color;
use crate::draw::ink::InkOverlay;
use crate::input::events::{Key, MidiAccess};
use crate::input::signal::{ToolSignal, ToolSubscription};
use crate::input::tool::{ToolMode, ToolSelection};
use crate::notation::NotationRegistry;
use crate::notation::midi::MidiNoteMap;
use crate::page::{HitTolerance, NullObserver, Page, PageObserver, Project};
use crate::placement::{PlacementEngine, SheetLayout};
use crate::util::Point;
use std::collections::HashMap;
use thiserror::Error;

/// Pointer interaction state machine.
///
/// Only one interaction runs at a time. Handlers read the current state,
/// compute the next one, and write it back once.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    /// Waiting for input
    Idle,
    /// Pen stroke in progress (points recorded so far)
    Drawing { points: Vec<Point> },
    /// Line tool held down
    DrawingLine { start: Point, current: Point },
    /// Eraser held down
    Erasing,
    /// An element or label follows the pointer
    Dragging(DragState),
    /// Text entry anchored at a clicked position
    TextInput {
        /// Top-left X of the text being entered
        x: f64,
        /// Top-left Y of the text being entered
        y: f64,
        /// Accumulated text buffer
        buffer: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("MIDI input is unavailable (access {0:?})")]
    MidiUnavailable(MidiAccess),
}

/// The input router.
///
/// Owns the project being edited together with everything needed to turn
/// host events into page mutations: the notation registry, the placement
/// engine, tool mode and input-source flags, the ink overlay, and the
/// observer that hears about committed changes.
pub struct InputState {
    pub(super) project: Project,
    pub(super) registry: NotationRegistry,
    pub(super) note_map: MidiNoteMap,
    pub(super) engine: PlacementEngine,
    pub(super) mode: ToolMode,
    pub(super) selected_notation: Option<char>,
    pub(super) keyboard_input: bool,
    pub(super) midi_input: bool,
    /// MIDI input asked for by config before the host reported access
    midi_requested: bool,
    midi_access: MidiAccess,
    pub(super) modal_open: bool,
    pub(super) text_focus: bool,
    /// Current pointer interaction
    pub state: InteractionState,
    pub(super) overlay: Option<InkOverlay>,
    /// Pen and line color
    pub pen_color: Color,
    /// Pen and line thickness
    pub pen_thickness: f64,
    pub eraser_radius: f64,
    /// Font size for new text elements
    pub text_font_size: f64,
    pub hit_tolerance: HitTolerance,
    action_map: HashMap<KeyBinding, Action>,
    tools: Option<ToolSubscription>,
    pub(super) observer: Box<dyn PageObserver>,
    pub(super) last_pointer: Point,
    /// Whether the host should re-render
    pub needs_redraw: bool,
}

impl InputState {
    /// Creates a router for an empty project using config defaults.
    ///
    /// # Errors
    /// Returns an error if the configured keybindings are invalid.
    pub fn from_config(config: &Config) -> Result<Self, KeybindingError> {
        let action_map = config.keybindings.build_action_map()?;
        let engine = PlacementEngine::new(SheetLayout::from(&config.sheet));
        let hit = &config.hit_test;

        let mut state = Self {
            project: Project::default(),
            registry: NotationRegistry::builtin(),
            note_map: MidiNoteMap::new(),
            engine,
            mode: ToolMode::None,
            selected_notation: None,
            keyboard_input: config.input.keyboard_enabled,
            midi_input: false,
            midi_requested: config.input.midi_enabled,
            midi_access: MidiAccess::Unknown,
            modal_open: false,
            text_focus: false,
            state: InteractionState::Idle,
            overlay: None,
            pen_color: config.pen.color.to_color(),
            pen_thickness: config.pen.thickness,
            eraser_radius: config.eraser.radius,
            text_font_size: config.text.font_size,
            hit_tolerance: HitTolerance {
                articulation_radius: hit.articulation_radius,
                symbol_radius: hit.symbol_radius,
                line_tolerance: hit.line_tolerance,
                label_font_size: hit.label_font_size,
            },
            action_map,
            tools: None,
            observer: Box::new(NullObserver),
            last_pointer: Point::default(),
            needs_redraw: true,
        };
        state.engine.rederive(state.project.current_page_mut());
        Ok(state)
    }

    /// Replaces the project being edited.
    ///
    /// Cursors are re-derived for every page and the overlay is repainted
    /// from the new current page.
    pub fn load_project(&mut self, mut project: Project) {
        project.normalize();
        for page in project.pages_mut() {
            self.engine.rederive(page);
        }
        self.state = InteractionState::Idle;
        self.project = project;
        log::info!(
            "Loaded project '{}' ({} pages)",
            self.project.title,
            self.project.page_count()
        );
        self.refresh_ink();
        self.observer.on_page_switched(self.project.current_index());
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consumes the router and returns the edited project.
    pub fn into_project(self) -> Project {
        self.project
    }

    pub fn current_page(&self) -> &Page {
        self.project.current_page()
    }

    pub fn registry(&self) -> &NotationRegistry {
        &self.registry
    }

    pub fn layout(&self) -> &SheetLayout {
        self.engine.layout()
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn selected_notation(&self) -> Option<char> {
        self.selected_notation
    }

    pub fn keyboard_input_enabled(&self) -> bool {
        self.keyboard_input
    }

    pub fn midi_input_enabled(&self) -> bool {
        self.midi_input
    }

    pub fn midi_access(&self) -> MidiAccess {
        self.midi_access
    }

    // ------------------------------------------------------------------
    // Host wiring
    // ------------------------------------------------------------------

    /// Routes committed page changes to `observer`.
    pub fn set_observer(&mut self, observer: Box<dyn PageObserver>) {
        self.observer = observer;
    }

    /// Attaches a raster overlay and paints the current page's ink onto it.
    pub fn attach_overlay(&mut self, mut overlay: InkOverlay) {
        overlay.replay(self.project.current_page().ink());
        self.overlay = Some(overlay);
        self.needs_redraw = true;
    }

    /// Allocates an overlay matching the sheet size.
    pub fn create_overlay(&mut self) -> Result<(), cairo::Error> {
        let layout = self.engine.layout();
        let overlay = InkOverlay::new(layout.width.ceil() as i32, layout.height.ceil() as i32)?;
        self.attach_overlay(overlay);
        Ok(())
    }

    pub fn detach_overlay(&mut self) -> Option<InkOverlay> {
        self.overlay.take()
    }

    pub fn overlay(&self) -> Option<&InkOverlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut InkOverlay> {
        self.overlay.as_mut()
    }

    /// Starts listening to a tool picker. Any selection it already holds is
    /// applied immediately.
    pub fn subscribe_tools(&mut self, signal: &ToolSignal) {
        self.tools = Some(signal.subscribe());
        self.sync_tool_signal();
    }

    /// Applies the newest tool selection published since the last sync.
    pub fn sync_tool_signal(&mut self) {
        let latest = self.tools.as_mut().and_then(ToolSubscription::take_latest);
        if let Some(selection) = latest {
            self.apply_tool_selection(selection);
        }
    }

    /// Applies a tool-picker selection.
    ///
    /// Notation selections keep tool mode off so clicks place the symbol;
    /// every other selection clears the selected notation.
    pub fn apply_tool_selection(&mut self, selection: ToolSelection) {
        match selection {
            ToolSelection::Notation { trigger } => self.set_selected_notation(Some(trigger)),
            _ => self.selected_notation = None,
        }
        self.set_tool_mode(selection.mode());
    }

    /// Switches tool mode, abandoning any interaction in progress.
    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if self.mode == mode {
            return;
        }
        self.cancel_interaction();
        log::info!("Tool mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.needs_redraw = true;
    }

    /// Selects the notation placed by clicks. Unknown triggers clear the selection.
    pub fn set_selected_notation(&mut self, trigger: Option<char>) {
        self.selected_notation = trigger.filter(|t| {
            let known = self.registry.lookup(*t).is_some();
            if !known {
                log::debug!("Ignoring selection of unmapped trigger '{t}'");
            }
            known
        });
    }

    /// Toggles keyboard-sequential input. Enabling it leaves any tool mode.
    pub fn set_keyboard_input(&mut self, enabled: bool) {
        if enabled {
            self.set_tool_mode(ToolMode::None);
        }
        self.keyboard_input = enabled;
        log::info!("Keyboard input {}", if enabled { "on" } else { "off" });
    }

    /// Toggles MIDI-sequential input. Enabling it leaves any tool mode.
    ///
    /// # Errors
    /// Fails, leaving MIDI input off, unless the host has granted MIDI access.
    pub fn set_midi_input(&mut self, enabled: bool) -> Result<(), InputError> {
        if !enabled {
            self.midi_input = false;
            return Ok(());
        }
        if self.midi_access != MidiAccess::Granted {
            self.midi_input = false;
            let err = InputError::MidiUnavailable(self.midi_access);
            self.warn(&err.to_string());
            return Err(err);
        }
        self.set_tool_mode(ToolMode::None);
        self.midi_input = true;
        log::info!("MIDI input on");
        Ok(())
    }

    /// Records the host's MIDI capability. Anything but granted forces MIDI input off.
    pub fn set_midi_access(&mut self, access: MidiAccess) {
        self.midi_access = access;
        match access {
            MidiAccess::Granted => {
                if std::mem::take(&mut self.midi_requested) {
                    // Only fails when access is missing
                    let _ = self.set_midi_input(true);
                }
            }
            MidiAccess::Unknown => {}
            MidiAccess::Denied | MidiAccess::Unsupported => {
                let was_on = self.midi_input || self.midi_requested;
                self.midi_input = false;
                self.midi_requested = false;
                if was_on {
                    self.warn(&InputError::MidiUnavailable(access).to_string());
                }
            }
        }
    }

    /// Host flag: a modal dialog or dropdown is open.
    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    /// Host flag: keyboard focus is inside a text control.
    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    // ------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------

    /// Abandons the current interaction without committing it.
    pub fn cancel_interaction(&mut self) {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Idle => return,
            // Partially painted segments are not in the history
            InteractionState::Drawing { .. } => self.replay_overlay(),
            InteractionState::Dragging(drag) => drag.log_cancel(),
            _ => {}
        }
        log::debug!("Interaction cancelled");
        self.needs_redraw = true;
    }

    /// Logs a user-visible warning and forwards it to the observer.
    pub(super) fn warn(&mut self, message: &str) {
        log::warn!("{message}");
        self.observer.on_warning(message);
    }

    pub(super) fn find_action(&self, key: Key) -> Option<Action> {
        self.action_map.get(&KeyBinding { key }).copied()
    }

    /// Whether keyboard or MIDI placement is switched on.
    pub(super) fn sequential_source_enabled(&self) -> bool {
        self.keyboard_input || self.midi_input
    }

    pub(super) fn replay_overlay(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.replay(self.project.current_page().ink());
        }
    }

    /// Repaints the overlay after the ink history changed and notifies the observer.
    pub(super) fn refresh_ink(&mut self) {
        self.replay_overlay();
        self.observer
            .on_ink_changed(self.project.current_page().ink());
        self.needs_redraw = true;
    }

    /// Places a symbol at the cursor of the current page.
    pub(super) fn place_sequential(&mut self, trigger: char, octave: Option<i8>) {
        let Some(symbol) = self.registry.lookup(trigger) else {
            return;
        };
        match self
            .engine
            .place_sequential(self.project.current_page_mut(), symbol, octave)
        {
            Ok(placed) => {
                log::debug!(
                    "Placed '{}' at ({}, {})",
                    placed.trigger,
                    placed.x,
                    placed.y
                );
                self.observer.on_symbol_added(placed);
                self.needs_redraw = true;
            }
            Err(err) => {
                let message = format!("Cannot place '{trigger}': {err}");
                self.warn(&message);
            }
        }
    }
}
