use crate::synth::prelude::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    Noise,
}

impl Waveform {
    /// Map the waveform parameter (0-4, truncated toward zero) to a waveform.
    pub fn from_param(value: f32) -> Self {
        match value as i32 {
            i32::MIN..=0 => Waveform::Sine,
            1 => Waveform::Square,
            2 => Waveform::Sawtooth,
            3 => Waveform::Triangle,
            _ => Waveform::Noise,
        }
    }

    pub fn as_param(self) -> f32 {
        match self {
            Waveform::Sine => 0.0,
            Waveform::Square => 1.0,
            Waveform::Sawtooth => 2.0,
            Waveform::Triangle => 3.0,
            Waveform::Noise => 4.0,
        }
    }
}

/// Polynomial band-limited step residual for a discontinuity at phase 0.
///
/// `t` is the phase in [0, 1), `dt` the per-sample phase increment.
#[inline]
pub fn poly_blep(t: f32, dt: f32) -> f32 {
    if t < dt {
        let t = t / dt;
        t + t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}

pub const NOISE_SEED: u32 = 12345;

/// 32-bit linear congruential noise generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseSource {
    state: u32,
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next sample in [-1, 1].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        ((self.state >> 16) & 0x7FFF) as f32 / 16383.5 - 1.0
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(NOISE_SEED)
    }
}

/// Phase-accumulating oscillator with a normalized [0, 1) phase.
#[derive(Debug, Clone, Default)]
pub struct Oscillator {
    pub phase: f32,
    pub phase_increment: f32,
}

impl Oscillator {
    pub fn new(phase_increment: f32) -> Self {
        Self {
            phase: 0.0,
            phase_increment,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Produce one sample and advance the phase by one increment.
    ///
    /// `noise` is only consulted for `Waveform::Noise`.
    pub fn next_sample(&mut self, waveform: Waveform, noise: &mut NoiseSource) -> f32 {
        let t = self.phase;
        let dt = self.phase_increment;
        let sample = match waveform {
            Waveform::Sine => (t * TAU).sin(),
            Waveform::Square => {
                // Rising edge at phase 0, falling edge at phase 0.5.
                let naive = if t < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(t, dt) - poly_blep((t + 0.5) % 1.0, dt)
            }
            Waveform::Sawtooth => 2.0 * t - 1.0 - poly_blep(t, dt),
            Waveform::Triangle => 4.0 * (t - 0.5).abs() - 1.0,
            Waveform::Noise => noise.next_sample(),
        };

        self.phase += dt;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }
}
