/// Highest valid MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// Controllers the instrument responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChange {
    ModWheel,
    Volume,
    FilterResonance,
    FilterCutoff,
    AllNotesOff,
}

impl ControlChange {
    pub fn from_midi(cc: u8) -> Option<Self> {
        match cc {
            1 => Some(Self::ModWheel),
            7 => Some(Self::Volume),
            71 => Some(Self::FilterResonance),
            74 => Some(Self::FilterCutoff),
            123 => Some(Self::AllNotesOff),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::ModWheel => 1,
            Self::Volume => 7,
            Self::FilterResonance => 71,
            Self::FilterCutoff => 74,
            Self::AllNotesOff => 123,
        }
    }
}
