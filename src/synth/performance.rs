pub const PITCH_BEND_CENTER: u16 = 8192;
pub const PITCH_BEND_MAX: u16 = 16383;
/// Bend range in semitones at full deflection.
pub const PITCH_BEND_RANGE: f32 = 2.0;
pub const DEFAULT_MASTER_VOLUME: f32 = 0.8;

/// Controller state read by every voice each block.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceState {
    pub pitch_bend: f32,    // -1.0 to 1.0
    pub mod_wheel: f32,     // 0.0 to 1.0
    pub master_volume: f32, // 0.0 to 1.0
}

impl PerformanceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a 14-bit bend value (center 8192) onto [-1, 1].
    pub fn set_pitch_bend(&mut self, value: u16) {
        let value = value.min(PITCH_BEND_MAX);
        self.pitch_bend = (value as f32 - PITCH_BEND_CENTER as f32) / PITCH_BEND_CENTER as f32;
    }

    pub fn set_mod_wheel(&mut self, value: u8) {
        self.mod_wheel = normalize_cc(value);
    }

    pub fn set_master_volume(&mut self, value: u8) {
        self.master_volume = normalize_cc(value);
    }

    pub fn bend_semitones(&self) -> f32 {
        self.pitch_bend * PITCH_BEND_RANGE
    }

    /// Center the bend and zero the mod wheel. Master volume is kept.
    pub fn reset(&mut self) {
        self.pitch_bend = 0.0;
        self.mod_wheel = 0.0;
    }
}

impl Default for PerformanceState {
    fn default() -> Self {
        Self {
            pitch_bend: 0.0,
            mod_wheel: 0.0,
            master_volume: DEFAULT_MASTER_VOLUME,
        }
    }
}

/// 7-bit controller value to [0, 1]; values above 127 saturate.
#[inline]
pub fn normalize_cc(value: u8) -> f32 {
    value.min(127) as f32 / 127.0
}
