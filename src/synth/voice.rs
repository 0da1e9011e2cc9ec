use super::envelope::{Envelope, EnvelopeParams, EnvelopeStage};
use super::filter::StateVariableFilter;
use super::waveform::{NoiseSource, Oscillator, Waveform, NOISE_SEED};

/// Per-sample settings shared by every voice for the current block.
#[derive(Debug, Clone, Copy)]
pub struct VoiceParams {
    pub waveform: Waveform,
    pub envelope: EnvelopeParams,
    pub cutoff: f32,
    pub resonance: f32,
    pub sample_rate: f32,
}

/// One sounding note: oscillator, envelope and filter stepped together.
#[derive(Debug, Clone)]
pub struct Voice {
    active: bool,
    note: u8,
    velocity: f32, // 0.0-1.0
    oscillator: Oscillator,
    envelope: Envelope,
    filter: StateVariableFilter,
    noise: NoiseSource, // only used in per-voice noise mode
}

impl Voice {
    /// Creates a new, inactive voice.
    pub fn new(slot: usize) -> Self {
        Self {
            active: false,
            note: 0,
            velocity: 0.0,
            oscillator: Oscillator::default(),
            envelope: Envelope::new(),
            filter: StateVariableFilter::new(),
            noise: NoiseSource::new(NOISE_SEED.wrapping_add(slot as u32)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn level(&self) -> f32 {
        self.envelope.level()
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.envelope.stage()
    }

    pub fn phase(&self) -> f32 {
        self.oscillator.phase
    }

    pub fn phase_increment(&self) -> f32 {
        self.oscillator.phase_increment
    }

    pub fn filter_state(&self) -> (f32, f32) {
        self.filter.state()
    }

    pub fn is_releasing(&self) -> bool {
        self.envelope.stage() == EnvelopeStage::Release
    }

    /// Start a note from silence. `velocity` is the raw MIDI value (1-127).
    pub fn activate(&mut self, note: u8, velocity: u8, phase_increment: f32) {
        self.active = true;
        self.note = note;
        self.velocity = velocity.min(127) as f32 / 127.0;
        self.oscillator.reset();
        self.oscillator.phase_increment = phase_increment;
        self.filter.reset();
        self.envelope.trigger();
        log::trace!("voice activated note {} velocity {}", note, velocity);
    }

    pub fn release(&mut self) {
        if self.active && !self.is_releasing() {
            self.envelope.release();
            log::trace!("voice released note {}", self.note);
        }
    }

    /// Silence the voice immediately, keeping its noise generator.
    pub fn reset(&mut self) {
        self.active = false;
        self.envelope.reset();
        self.filter.reset();
    }

    pub fn set_phase_increment(&mut self, phase_increment: f32) {
        self.oscillator.phase_increment = phase_increment;
    }

    /// Render one sample and step the envelope.
    ///
    /// The returned sample uses the envelope level from before this step, so
    /// the reported level runs one sample ahead of what was heard. `shared_noise`
    /// is used for the noise waveform unless `per_voice_noise` is set.
    pub fn render(
        &mut self,
        params: &VoiceParams,
        shared_noise: &mut NoiseSource,
        per_voice_noise: bool,
    ) -> f32 {
        if !self.active {
            return 0.0;
        }
        let noise = if per_voice_noise {
            &mut self.noise
        } else {
            shared_noise
        };
        let osc = self.oscillator.next_sample(params.waveform, noise);
        let filtered = self.filter.process(
            osc,
            params.cutoff,
            params.resonance,
            self.envelope.level(),
            params.sample_rate,
        );
        let voiced = filtered * self.envelope.level() * self.velocity;

        if self.envelope.advance(&params.envelope, params.sample_rate) {
            self.active = false;
        }
        voiced
    }
}
