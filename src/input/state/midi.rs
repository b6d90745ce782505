use crate::notation::midi::{self, MidiInput};

use super::{InputState, InteractionState};

impl InputState {
    /// Processes a raw MIDI message from any input device.
    ///
    /// Note-on with non-zero velocity places the mapped symbol exactly like
    /// a typed trigger, recording the note's octave on the symbol. Note-off,
    /// zero-velocity note-on, unmapped notes, and all other messages are
    /// ignored.
    pub fn on_midi_message(&mut self, bytes: &[u8]) {
        self.sync_tool_signal();

        let Some(MidiInput::NoteOn { channel, key, .. }) = midi::decode(bytes) else {
            return;
        };
        if !self.midi_input || self.mode.is_active() {
            log::debug!("MIDI note {key} ignored: MIDI placement inactive");
            return;
        }
        if self.text_focus || self.modal_open || self.state != InteractionState::Idle {
            log::debug!("MIDI note {key} ignored: interaction in progress");
            return;
        }
        let Some(note) = self.note_map.resolve(key) else {
            log::debug!("MIDI note {key} on channel {channel} is not mapped");
            return;
        };

        self.place_sequential(note.trigger, Some(note.octave));
    }
}
