use super::*;
use crate::config::Config;
use crate::draw::InkOverlay;
use crate::draw::ink::InkOp;
use crate::input::events::{Key, MidiAccess, PointerButton};
use crate::input::signal::ToolSignal;
use crate::input::tool::{ToolMode, ToolSelection};
use crate::page::{
    ArticulationElement, ArticulationKind, ElementId, HitTarget, LabelKind, PageObserver,
    PageSettings, PlacedSymbol, TextElement,
};
use crate::util::Point;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    fn push(&self, event: String) {
        self.0.borrow_mut().push(event);
    }
}

impl PageObserver for Recorder {
    fn on_symbol_added(&mut self, symbol: &PlacedSymbol) {
        self.push(format!("symbol_added {} {}", symbol.trigger, symbol.x));
    }
    fn on_symbol_moved(&mut self, symbol: &PlacedSymbol) {
        self.push(format!("symbol_moved {} stave {}", symbol.x, symbol.stave));
    }
    fn on_symbol_removed(&mut self, id: ElementId) {
        self.push(format!("symbol_removed {id}"));
    }
    fn on_text_added(&mut self, text: &TextElement) {
        self.push(format!("text_added {}", text.content));
    }
    fn on_text_updated(&mut self, text: &TextElement) {
        self.push(format!("text_updated {} {}", text.x, text.y));
    }
    fn on_articulation_added(&mut self, articulation: &ArticulationElement) {
        self.push(format!("articulation_added {}", articulation.kind.name()));
    }
    fn on_articulation_removed(&mut self, id: ElementId) {
        self.push(format!("articulation_removed {id}"));
    }
    fn on_ink_changed(&mut self, ink: &[InkOp]) {
        self.push(format!("ink_changed {}", ink.len()));
    }
    fn on_settings_changed(&mut self, _settings: &PageSettings) {
        self.push("settings_changed".to_string());
    }
    fn on_page_switched(&mut self, index: usize) {
        self.push(format!("page_switched {index}"));
    }
    fn on_warning(&mut self, message: &str) {
        self.push(format!("warning {message}"));
    }
}

fn create_test_input_state() -> (InputState, Recorder) {
    let mut state = InputState::from_config(&Config::default()).unwrap();
    let recorder = Recorder::default();
    state.set_observer(Box::new(recorder.clone()));
    (state, recorder)
}

fn type_keys(state: &mut InputState, text: &str) {
    for c in text.chars() {
        state.on_key_press(Key::Char(c));
    }
}

fn click(state: &mut InputState, x: f64, y: f64) {
    state.on_pointer_down(PointerButton::Primary, x, y);
    state.on_pointer_up(PointerButton::Primary, x, y);
}

fn symbol_xs(state: &InputState) -> Vec<f64> {
    state.current_page().symbols().iter().map(|s| s.x).collect()
}

// ----------------------------------------------------------------------
// Keyboard routing
// ----------------------------------------------------------------------

#[test]
fn keyboard_input_places_symbols_sequentially() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);

    type_keys(&mut state, "ccc");

    assert_eq!(symbol_xs(&state), vec![170.0, 220.0, 270.0]);
    assert_eq!(recorder.count("symbol_added c"), 3);
    assert!(state.needs_redraw);
}

#[test]
fn keys_are_ignored_while_keyboard_input_is_off() {
    let (mut state, _) = create_test_input_state();
    type_keys(&mut state, "cd");
    assert!(state.current_page().symbols().is_empty());
}

#[test]
fn unmapped_triggers_are_ignored() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "1?");
    assert!(state.current_page().symbols().is_empty());
    assert!(recorder.events().is_empty());
}

#[test]
fn tool_mode_suppresses_keyboard_placement() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);
    state.set_tool_mode(ToolMode::Pen);

    type_keys(&mut state, "c");

    assert!(state.current_page().symbols().is_empty());
    // The source stays switched on
    assert!(state.keyboard_input_enabled());
}

#[test]
fn enabling_keyboard_input_leaves_tool_mode() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Eraser);
    state.set_keyboard_input(true);
    assert_eq!(state.mode(), ToolMode::None);
}

#[test]
fn host_focus_and_modals_block_keys() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);

    state.set_text_focus(true);
    type_keys(&mut state, "c");
    state.set_text_focus(false);

    state.set_modal_open(true);
    type_keys(&mut state, "c");
    state.set_modal_open(false);

    assert!(state.current_page().symbols().is_empty());
    type_keys(&mut state, "c");
    assert_eq!(state.current_page().symbols().len(), 1);
}

#[test]
fn backspace_undoes_last_symbol_and_rederives_cursor() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "cc");

    state.on_key_press(Key::Backspace);

    assert_eq!(symbol_xs(&state), vec![170.0]);
    assert_eq!(state.current_page().cursor().next_insert_x, 220.0);
    assert_eq!(recorder.count("symbol_removed"), 1);

    type_keys(&mut state, "c");
    assert_eq!(symbol_xs(&state), vec![170.0, 220.0]);
}

#[test]
fn backspace_on_empty_page_is_noop() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    state.on_key_press(Key::Backspace);
    assert!(state.current_page().symbols().is_empty());
    assert_eq!(recorder.count("symbol_removed"), 0);
}

#[test]
fn backspace_requires_sequential_source() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "c");
    state.set_keyboard_input(false);

    state.on_key_press(Key::Backspace);
    assert_eq!(state.current_page().symbols().len(), 1);
}

#[test]
fn return_breaks_to_next_line() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "c");

    state.on_key_press(Key::Return);
    type_keys(&mut state, "c");

    let second = &state.current_page().symbols()[1];
    assert_eq!((second.x, second.y), (170.0, 300.0));
    assert_eq!(second.stave, 1);
}

#[test]
fn line_break_on_last_line_warns() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    for _ in 0..10 {
        state.on_key_press(Key::Return);
    }
    assert_eq!(state.current_page().cursor().current_line_index, 10);

    state.on_key_press(Key::Return);
    assert_eq!(state.current_page().cursor().current_line_index, 10);
    assert_eq!(recorder.count("warning"), 1);
}

#[test]
fn placement_rejected_on_full_last_line() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    for _ in 0..10 {
        state.on_key_press(Key::Return);
    }
    // 170..=920 fits sixteen quarter notes on a line
    type_keys(&mut state, &"c".repeat(16));
    let cursor = state.current_page().cursor();
    assert_eq!(cursor.next_insert_x, 970.0);

    type_keys(&mut state, "c");

    assert_eq!(state.current_page().symbols().len(), 16);
    assert_eq!(state.current_page().cursor(), cursor);
    assert_eq!(recorder.count("warning"), 1);
}

#[test]
fn escape_leaves_tool_mode() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Line);
    state.on_key_press(Key::Escape);
    assert_eq!(state.mode(), ToolMode::None);
}

// ----------------------------------------------------------------------
// Text entry
// ----------------------------------------------------------------------

#[test]
fn text_entry_commits_on_return() {
    let (mut state, recorder) = create_test_input_state();
    state.set_tool_mode(ToolMode::TextPending);
    click(&mut state, 400.0, 600.0);
    assert!(matches!(state.state, InteractionState::TextInput { .. }));

    type_keys(&mut state, "Adagi");
    state.on_key_press(Key::Backspace);
    state.on_key_press(Key::Char('o'));
    state.on_key_press(Key::Return);

    let texts = state.current_page().texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].content, "Adago");
    assert_eq!((texts[0].x, texts[0].y), (400.0, 600.0));
    assert_eq!(state.state, InteractionState::Idle);
    assert_eq!(recorder.count("text_added Adago"), 1);
}

#[test]
fn text_entry_keys_do_not_place_symbols() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);
    state.set_tool_mode(ToolMode::TextPending);
    click(&mut state, 400.0, 600.0);

    type_keys(&mut state, "cc");
    state.on_key_press(Key::Escape);

    assert!(state.current_page().symbols().is_empty());
    assert!(state.current_page().texts().is_empty());
}

#[test]
fn empty_text_entry_is_discarded() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::TextPending);
    click(&mut state, 400.0, 600.0);
    state.on_key_press(Key::Return);
    assert!(state.current_page().texts().is_empty());
}

// ----------------------------------------------------------------------
// MIDI
// ----------------------------------------------------------------------

fn grant_midi(state: &mut InputState) {
    state.set_midi_access(MidiAccess::Granted);
    state.set_midi_input(true).unwrap();
}

#[test]
fn midi_note_on_places_mapped_symbol_with_octave() {
    let (mut state, _) = create_test_input_state();
    grant_midi(&mut state);

    state.on_midi_message(&[0x90, 60, 100]);

    let symbols = state.current_page().symbols();
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].trigger, 'c');
    assert_eq!(symbols[0].octave, Some(4));
    assert_eq!(symbols[0].x, 170.0);
}

#[test]
fn midi_note_off_and_zero_velocity_are_ignored() {
    let (mut state, _) = create_test_input_state();
    grant_midi(&mut state);

    state.on_midi_message(&[0x80, 60, 0]);
    state.on_midi_message(&[0x90, 60, 0]);
    state.on_midi_message(&[0xB0, 7, 100]);

    assert!(state.current_page().symbols().is_empty());
}

#[test]
fn midi_ignored_in_tool_mode() {
    let (mut state, _) = create_test_input_state();
    grant_midi(&mut state);
    state.set_tool_mode(ToolMode::Pen);

    state.on_midi_message(&[0x90, 60, 100]);
    assert!(state.current_page().symbols().is_empty());
}

#[test]
fn enabling_midi_without_access_fails_and_stays_off() {
    let (mut state, recorder) = create_test_input_state();

    let err = state.set_midi_input(true).unwrap_err();
    assert_eq!(err, InputError::MidiUnavailable(MidiAccess::Unknown));
    assert!(!state.midi_input_enabled());
    assert_eq!(recorder.count("warning"), 1);

    state.set_midi_access(MidiAccess::Denied);
    assert!(state.set_midi_input(true).is_err());
    state.on_midi_message(&[0x90, 60, 100]);
    assert!(state.current_page().symbols().is_empty());
}

#[test]
fn configured_midi_applies_once_access_is_granted() {
    let mut config = Config::default();
    config.input.midi_enabled = true;
    let mut state = InputState::from_config(&config).unwrap();
    assert!(!state.midi_input_enabled());

    state.set_midi_access(MidiAccess::Granted);
    assert!(state.midi_input_enabled());
}

#[test]
fn losing_midi_access_turns_input_off() {
    let (mut state, _) = create_test_input_state();
    grant_midi(&mut state);
    state.set_midi_access(MidiAccess::Unsupported);
    assert!(!state.midi_input_enabled());
}

// ----------------------------------------------------------------------
// Canvas drawing
// ----------------------------------------------------------------------

#[test]
fn single_point_stroke_is_discarded() {
    let (mut state, recorder) = create_test_input_state();
    state.set_tool_mode(ToolMode::Pen);

    click(&mut state, 500.0, 500.0);

    assert!(state.current_page().ink().is_empty());
    assert_eq!(recorder.count("ink_changed"), 0);
}

#[test]
fn multi_point_stroke_is_committed() {
    let (mut state, recorder) = create_test_input_state();
    state.set_tool_mode(ToolMode::Pen);

    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    state.on_pointer_move(510.0, 505.0);
    state.on_pointer_move(520.0, 515.0);
    state.on_pointer_up(PointerButton::Primary, 520.0, 515.0);

    let strokes: Vec<_> = state.current_page().strokes().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points.len(), 3);
    assert_eq!(recorder.count("ink_changed 1"), 1);
}

#[test]
fn stroke_is_painted_on_attached_overlay() {
    let (mut state, _) = create_test_input_state();
    state.attach_overlay(InkOverlay::new(1100, 1400).unwrap());
    state.set_tool_mode(ToolMode::Pen);

    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    state.on_pointer_move(600.0, 500.0);
    state.on_pointer_up(PointerButton::Primary, 600.0, 500.0);

    let overlay = state.overlay_mut().unwrap();
    assert!(overlay.alpha_at(550, 500).unwrap_or(0) > 0);

    state.undo_stroke();
    assert!(!state.overlay_mut().unwrap().has_ink());
}

#[test]
fn pointer_leave_finishes_stroke() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Pen);
    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    state.on_pointer_move(520.0, 500.0);

    state.on_pointer_leave();

    assert_eq!(state.state, InteractionState::Idle);
    assert_eq!(state.current_page().strokes().count(), 1);
}

#[test]
fn eraser_removes_articulation_within_radius() {
    let (mut state, recorder) = create_test_input_state();
    let inside = state
        .project
        .current_page_mut()
        .add_articulation(ArticulationKind::Staccato, 500.0, 500.0)
        .id;
    state.set_tool_mode(ToolMode::Eraser);

    click(&mut state, 505.0, 500.0);

    assert!(state.current_page().articulations().is_empty());
    assert_eq!(recorder.count(&format!("articulation_removed {inside}")), 1);
}

#[test]
fn eraser_boundary_is_inclusive() {
    let (mut state, _) = create_test_input_state();
    state
        .project
        .current_page_mut()
        .add_articulation(ArticulationKind::Accent, 500.0, 500.0);
    state.set_tool_mode(ToolMode::Eraser);

    // Default radius is 10
    click(&mut state, 510.0, 500.0);
    assert!(state.current_page().articulations().is_empty());
}

#[test]
fn eraser_keeps_articulation_outside_radius() {
    let (mut state, _) = create_test_input_state();
    state
        .project
        .current_page_mut()
        .add_articulation(ArticulationKind::Accent, 500.0, 500.0);
    state.set_tool_mode(ToolMode::Eraser);

    click(&mut state, 511.0, 500.0);
    assert_eq!(state.current_page().articulations().len(), 1);
}

#[test]
fn erasing_ink_free_page_records_nothing() {
    let (mut state, recorder) = create_test_input_state();
    state.set_tool_mode(ToolMode::Eraser);

    state.on_pointer_down(PointerButton::Primary, 300.0, 300.0);
    for step in 1..=50 {
        state.on_pointer_move(300.0 + step as f64, 300.0);
    }
    state.on_pointer_up(PointerButton::Primary, 350.0, 300.0);

    assert!(state.current_page().ink().is_empty());
    assert!(state.current_page().is_empty());
    assert_eq!(recorder.count("ink_changed"), 0);
}

#[test]
fn erasing_over_strokes_records_dabs() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Pen);
    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    state.on_pointer_move(600.0, 500.0);
    state.on_pointer_up(PointerButton::Primary, 600.0, 500.0);

    state.set_tool_mode(ToolMode::Eraser);
    state.on_pointer_down(PointerButton::Primary, 550.0, 500.0);
    state.on_pointer_move(560.0, 500.0);
    state.on_pointer_up(PointerButton::Primary, 560.0, 500.0);
    assert_eq!(state.current_page().ink().len(), 3);

    state.undo_stroke();
    assert!(state.current_page().ink().is_empty());
}

#[test]
fn eraser_leaves_symbols_and_text() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "c");
    state
        .project
        .current_page_mut()
        .add_text("p".to_string(), 600.0, 600.0, 16.0);
    state.set_tool_mode(ToolMode::Eraser);

    click(&mut state, 194.0, 232.0);
    click(&mut state, 602.0, 605.0);

    assert_eq!(state.current_page().symbols().len(), 1);
    assert_eq!(state.current_page().texts().len(), 1);
}

#[test]
fn line_tool_creates_line_element() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Line);

    state.on_pointer_down(PointerButton::Primary, 300.0, 700.0);
    state.on_pointer_move(350.0, 720.0);
    state.on_pointer_up(PointerButton::Primary, 400.0, 750.0);

    let lines = state.current_page().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!((lines[0].x2, lines[0].y2), (400.0, 750.0));
}

#[test]
fn articulation_tool_places_at_click() {
    let (mut state, recorder) = create_test_input_state();
    state.set_tool_mode(ToolMode::ArticulationPending(ArticulationKind::Fermata));

    click(&mut state, 400.0, 650.0);

    let articulations = state.current_page().articulations();
    assert_eq!(articulations.len(), 1);
    assert_eq!((articulations[0].x, articulations[0].y), (400.0, 650.0));
    assert_eq!(recorder.count("articulation_added fermata"), 1);
}

// ----------------------------------------------------------------------
// Click placement and drag
// ----------------------------------------------------------------------

#[test]
fn selected_notation_is_placed_at_click() {
    let (mut state, _) = create_test_input_state();
    state.set_selected_notation(Some('a'));

    click(&mut state, 5.0, 1390.0);

    let symbol = &state.current_page().symbols()[0];
    assert_eq!((symbol.x, symbol.y), (20.0, 1380.0));
    assert_eq!(state.current_page().cursor().next_insert_x, 70.0);
}

#[test]
fn unknown_notation_selection_is_cleared() {
    let (mut state, _) = create_test_input_state();
    state.set_selected_notation(Some('@'));
    assert_eq!(state.selected_notation(), None);
}

#[test]
fn text_drag_keeps_pointer_offset() {
    let (mut state, recorder) = create_test_input_state();
    let id = state
        .project
        .current_page_mut()
        .add_text("Hello".to_string(), 100.0, 100.0, 16.0)
        .id;

    state.on_pointer_down(PointerButton::Primary, 105.0, 108.0);
    assert!(matches!(
        state.state,
        InteractionState::Dragging(DragState {
            target: HitTarget::Text(_),
            ..
        })
    ));
    state.on_pointer_move(200.0, 150.0);

    let text = state.current_page().text(id).unwrap();
    assert_eq!((text.x, text.y), (195.0, 142.0));
    assert_eq!(recorder.count("text_updated 195 142"), 1);

    state.on_pointer_up(PointerButton::Primary, 200.0, 150.0);
    assert_eq!(state.state, InteractionState::Idle);
}

#[test]
fn drag_takes_priority_over_click_placement() {
    let (mut state, _) = create_test_input_state();
    state
        .project
        .current_page_mut()
        .add_text("Hello".to_string(), 400.0, 400.0, 16.0);
    state.set_selected_notation(Some('c'));

    click(&mut state, 405.0, 405.0);

    assert!(state.current_page().symbols().is_empty());
}

#[test]
fn label_drag_commits_only_on_release() {
    let (mut state, recorder) = create_test_input_state();
    let start = state
        .current_page()
        .settings
        .labels
        .get(LabelKind::TimeSignature);

    state.on_pointer_down(PointerButton::Primary, start.x + 5.0, start.y + 5.0);
    state.on_pointer_move(305.0, 405.0);

    assert_eq!(
        state.current_page().settings.labels.get(LabelKind::TimeSignature),
        start
    );
    assert_eq!(recorder.count("settings_changed"), 0);

    state.on_pointer_up(PointerButton::Primary, 305.0, 405.0);

    assert_eq!(
        state.current_page().settings.labels.get(LabelKind::TimeSignature),
        Point::new(300.0, 400.0)
    );
    assert_eq!(recorder.count("settings_changed"), 1);
}

#[test]
fn symbol_drag_updates_stave_and_cursor() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "c");

    // Symbol centre is (194, 232)
    state.on_pointer_down(PointerButton::Primary, 194.0, 232.0);
    state.on_pointer_move(494.0, 532.0);
    state.on_pointer_up(PointerButton::Primary, 494.0, 532.0);

    let symbol = &state.current_page().symbols()[0];
    assert_eq!((symbol.x, symbol.y), (470.0, 500.0));
    assert_eq!(symbol.stave, 3);
    let cursor = state.current_page().cursor();
    assert_eq!(cursor.next_insert_x, 520.0);
    assert_eq!(cursor.current_line_index, 3);
    // The live move still carries the old stave; release reports the new one
    assert_eq!(recorder.count("symbol_moved 470 stave 0"), 1);
    assert_eq!(recorder.count("symbol_moved 470 stave 3"), 1);
}

#[test]
fn secondary_button_cancels_interaction() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Pen);
    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    state.on_pointer_move(550.0, 500.0);

    state.on_pointer_down(PointerButton::Secondary, 550.0, 500.0);

    assert_eq!(state.state, InteractionState::Idle);
    assert!(state.current_page().ink().is_empty());
}

// ----------------------------------------------------------------------
// Tool signal and pages
// ----------------------------------------------------------------------

#[test]
fn tool_signal_applies_on_next_event() {
    let (mut state, _) = create_test_input_state();
    let signal = ToolSignal::new();
    state.subscribe_tools(&signal);

    signal.publish(ToolSelection::Pen);
    assert_eq!(state.mode(), ToolMode::None);

    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    assert_eq!(state.mode(), ToolMode::Pen);
    assert!(matches!(state.state, InteractionState::Drawing { .. }));
}

#[test]
fn notation_selection_clears_tool_mode() {
    let (mut state, _) = create_test_input_state();
    state.set_tool_mode(ToolMode::Eraser);

    state.apply_tool_selection(ToolSelection::Notation { trigger: 'c' });

    assert_eq!(state.mode(), ToolMode::None);
    assert_eq!(state.selected_notation(), Some('c'));

    state.apply_tool_selection(ToolSelection::Pen);
    assert_eq!(state.selected_notation(), None);
}

#[test]
fn page_switch_cancels_interaction_and_keeps_cursors() {
    let (mut state, recorder) = create_test_input_state();
    state.set_keyboard_input(true);
    type_keys(&mut state, "c");
    state.on_key_press(Key::Return);

    let second = state.add_page();
    assert_eq!(second, 1);
    assert_eq!(recorder.count("page_switched 1"), 1);
    type_keys(&mut state, "c");
    assert_eq!(symbol_xs(&state), vec![170.0]);

    state.set_tool_mode(ToolMode::Pen);
    state.on_pointer_down(PointerButton::Primary, 500.0, 500.0);
    assert!(state.switch_page(0));
    assert_eq!(state.state, InteractionState::Idle);

    // The line break on page one survives the round trip
    state.set_tool_mode(ToolMode::None);
    type_keys(&mut state, "c");
    let last = state.current_page().symbols().last().unwrap();
    assert_eq!((last.x, last.y), (170.0, 300.0));
}

#[test]
fn last_page_cannot_be_removed() {
    let (mut state, recorder) = create_test_input_state();
    assert!(!state.remove_page(0));
    assert_eq!(recorder.count("warning"), 1);
}

#[test]
fn clear_page_resets_cursor_and_keeps_settings() {
    let (mut state, _) = create_test_input_state();
    state.set_keyboard_input(true);
    state.set_tempo(90);
    type_keys(&mut state, "cc");

    state.clear_page();

    assert!(state.current_page().is_empty());
    assert_eq!(state.current_page().settings.tempo, 90);
    assert_eq!(state.current_page().cursor().next_insert_x, 170.0);
}
