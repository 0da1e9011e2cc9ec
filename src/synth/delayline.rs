use crate::error::InitError;

/// Zeroed per-channel sample memory, allocated once at init.
///
/// Holds `length` frames for each of `channels` channels, channel-major.
#[derive(Clone, Debug)]
pub struct DelayBuffer {
    buffer: Vec<f32>,
    length: usize,
    channels: usize,
    write_pos: usize,
}

impl DelayBuffer {
    /// Reserve `length * channels` samples without aborting on allocation failure.
    pub fn try_new(length: usize, channels: usize) -> Result<Self, InitError> {
        let samples = length.saturating_mul(channels);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(samples)
            .map_err(|source| InitError::Allocation { samples, source })?;
        buffer.resize(samples, 0.0);
        Ok(Self {
            buffer,
            length,
            channels,
            write_pos: 0,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    pub fn channel(&self, channel: usize) -> Option<&[f32]> {
        if channel >= self.channels {
            return None;
        }
        let start = channel * self.length;
        self.buffer.get(start..start + self.length)
    }

    /// Zero the contents and rewind, keeping the allocation.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
