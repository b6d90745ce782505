//! MIDI note-on decoding and the fixed note-number to trigger table.
//!
//! Notes C3 (48) through B5 (83) are mapped. The register picks the note
//! value (half, quarter, eighth notes for octaves 3, 4, 5) and black keys
//! select the dotted form of that value. Pitch itself is not interpreted;
//! the octave travels with the placed symbol as metadata.

use midly::{MidiMessage, live::LiveEvent};

/// Lowest mapped note number (C3)
pub const FIRST_MAPPED_NOTE: u8 = 48;
/// Highest mapped note number (B5)
pub const LAST_MAPPED_NOTE: u8 = 83;

/// `(plain, dotted)` triggers per mapped octave, starting at octave 3.
const OCTAVE_TRIGGERS: [(char, char); 3] = [('b', 'B'), ('c', 'C'), ('d', 'D')];

/// Pitch classes that are black keys on a piano keyboard.
const BLACK_KEYS: [u8; 5] = [1, 3, 6, 8, 10];

/// The subset of MIDI messages the router distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiInput {
    /// Note-on with non-zero velocity
    NoteOn { channel: u8, key: u8, velocity: u8 },
    /// Note-off, or note-on with zero velocity
    NoteOff { channel: u8, key: u8 },
    /// Any other channel, system common, or realtime message
    Other,
}

/// Decodes a raw MIDI message. Returns `None` for malformed bytes.
pub fn decode(bytes: &[u8]) -> Option<MidiInput> {
    let event = match LiveEvent::parse(bytes) {
        Ok(event) => event,
        Err(err) => {
            log::debug!("Ignoring malformed MIDI message {bytes:02x?}: {err}");
            return None;
        }
    };

    let LiveEvent::Midi { channel, message } = event else {
        return Some(MidiInput::Other);
    };
    let channel = channel.as_int();

    Some(match message {
        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => MidiInput::NoteOn {
            channel,
            key: key.as_int(),
            velocity: vel.as_int(),
        },
        MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => MidiInput::NoteOff {
            channel,
            key: key.as_int(),
        },
        _ => MidiInput::Other,
    })
}

/// A resolved note: which symbol to place and the octave it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTrigger {
    pub trigger: char,
    pub octave: i8,
}

/// Fixed note-number to trigger-key table.
#[derive(Debug, Clone, Default)]
pub struct MidiNoteMap;

impl MidiNoteMap {
    pub fn new() -> Self {
        Self
    }

    /// Resolves a note number; unmapped notes yield `None`.
    pub fn resolve(&self, note: u8) -> Option<NoteTrigger> {
        if !(FIRST_MAPPED_NOTE..=LAST_MAPPED_NOTE).contains(&note) {
            return None;
        }

        let octave = (note / 12) as i8 - 1;
        let (plain, dotted) = OCTAVE_TRIGGERS[((note - FIRST_MAPPED_NOTE) / 12) as usize];
        let trigger = if BLACK_KEYS.contains(&(note % 12)) {
            dotted
        } else {
            plain
        };

        Some(NoteTrigger { trigger, octave })
    }
}
