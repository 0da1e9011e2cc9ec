use crate::synth::prelude::{lerp, PI};

pub const MIN_CUTOFF: f32 = 20.0;
pub const MAX_CUTOFF: f32 = 20000.0;

/// Smoothing coefficient of an RC lowpass sampled at `sample_rate`.
pub fn one_pole_alpha(cutoff: f32, sample_rate: f32) -> f32 {
    let rc = 1.0 / (2.0 * PI * cutoff);
    let dt = 1.0 / sample_rate;
    dt / (rc + dt)
}

/// Single-pole RC lowpass. State persists across calls.
#[derive(Clone, Debug, Default)]
pub struct OnePoleLowPass {
    state: f32,
}

impl OnePoleLowPass {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, input: f32, alpha: f32) -> f32 {
        self.state = lerp(self.state, input, alpha);
        self.state
    }

    pub fn state(&self) -> f32 {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// Two-integrator state-variable filter, lowpass tap.
///
/// The cutoff opens upward with the voice envelope by up to 50%.
#[derive(Clone, Debug, Default)]
pub struct StateVariableFilter {
    band: f32,
    low: f32,
}

impl StateVariableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(
        &mut self,
        input: f32,
        cutoff: f32,
        resonance: f32,
        envelope: f32,
        sample_rate: f32,
    ) -> f32 {
        let cutoff = (cutoff * (1.0 + envelope * 0.5)).clamp(MIN_CUTOFF, MAX_CUTOFF);
        let f = 2.0 * (PI * cutoff / sample_rate).sin();
        let q = 1.0 - resonance * 0.9;

        let low = self.low + f * self.band;
        let high = input - low - q * self.band;
        let band = f * high + self.band;

        self.band = band;
        self.low = low;
        low
    }

    /// Current `(band, low)` integrator state.
    pub fn state(&self) -> (f32, f32) {
        (self.band, self.low)
    }

    pub fn reset(&mut self) {
        self.band = 0.0;
        self.low = 0.0;
    }
}
