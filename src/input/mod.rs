mod midi;
pub use self::midi::{dispatch, MidiMessage};
