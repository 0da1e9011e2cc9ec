use crate::plugin::Instrument;

/// Channel voice messages understood by the instrument contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
    ControlChange { channel: u8, cc: u8, value: u8 },
    PitchBend { channel: u8, value: u16 },
}

impl MidiMessage {
    /// Decode one complete message (status byte first).
    ///
    /// Returns `None` for system messages, running status, truncated input
    /// and message types the contract has no entry point for.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status & 0x80 == 0 || status >= 0xF0 {
            return None;
        }
        let channel = status & 0x0F;
        let data1 = *data.first()? & 0x7F;
        let data2 = *data.get(1)? & 0x7F;

        match status & 0xF0 {
            0x90 if data2 > 0 => Some(Self::NoteOn {
                channel,
                note: data1,
                velocity: data2,
            }),
            // Note-on with zero velocity is a note-off.
            0x80 | 0x90 => Some(Self::NoteOff {
                channel,
                note: data1,
            }),
            0xB0 => Some(Self::ControlChange {
                channel,
                cc: data1,
                value: data2,
            }),
            0xE0 => Some(Self::PitchBend {
                channel,
                value: (data2 as u16) << 7 | data1 as u16,
            }),
            _ => None,
        }
    }

    pub fn apply<I: Instrument + ?Sized>(self, instrument: &mut I) {
        match self {
            Self::NoteOn {
                channel,
                note,
                velocity,
            } => instrument.note_on(note, velocity, channel),
            Self::NoteOff { channel, note } => instrument.note_off(note, channel),
            Self::ControlChange { channel, cc, value } => {
                instrument.control_change(cc, value, channel)
            }
            Self::PitchBend { channel, value } => instrument.pitch_bend(value, channel),
        }
    }
}

/// Decode raw MIDI bytes and forward them to the instrument.
///
/// Returns `false` if the bytes were not a supported message.
pub fn dispatch<I: Instrument + ?Sized>(instrument: &mut I, bytes: &[u8]) -> bool {
    match MidiMessage::parse(bytes) {
        Some(message) => {
            message.apply(instrument);
            true
        }
        None => {
            log::trace!("ignoring MIDI bytes {:02X?}", bytes);
            false
        }
    }
}
