use crate::error::InitError;

/// Number of interleaved channels in `Plugin::process` buffers.
pub const NUM_CHANNELS: usize = 2;

/// Lifecycle and parameter contract shared by every host-loadable plugin.
///
/// The host calls `init` once before the first `process`, then `process` once
/// per buffer, and `dispose` once after the last. None of the processing or
/// parameter entry points fail: bad indices are ignored, bad values clamped.
pub trait Plugin {
    fn init(&mut self, sample_rate: f32, block_size: usize) -> Result<(), InitError>;
    fn reset(&mut self);
    fn dispose(&mut self);

    /// Processing latency in samples.
    fn latency(&self) -> u32 {
        0
    }

    fn parameter_count(&self) -> usize;
    fn get_parameter(&self, index: usize) -> f32;
    fn set_parameter(&mut self, index: usize, value: f32);

    /// Process `sample_count` interleaved stereo frames.
    ///
    /// `sample_count` is clamped to the frames the slices can actually hold.
    fn process(&mut self, input: &[f32], output: &mut [f32], sample_count: usize);
}

/// Note-level entry points of an instrument plugin.
///
/// `channel` is accepted for contract compatibility; it does not route.
pub trait Instrument: Plugin {
    fn note_on(&mut self, note: u8, velocity: u8, channel: u8);
    fn note_off(&mut self, note: u8, channel: u8);
    fn control_change(&mut self, cc: u8, value: u8, channel: u8);
    fn pitch_bend(&mut self, value: u16, channel: u8);
}

/// Frames that fit in an interleaved buffer of `len` samples, capped at `sample_count`.
pub(crate) fn interleaved_frames(len: usize, sample_count: usize) -> usize {
    sample_count.min(len / NUM_CHANNELS)
}

pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<f32, InitError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(InitError::InvalidSampleRate(sample_rate))
    }
}
