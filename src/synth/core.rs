use super::envelope::EnvelopeParams;
use super::filter::{MAX_CUTOFF, MIN_CUTOFF};
use super::note::{ControlChange, MAX_NOTE};
use super::performance::{normalize_cc, PerformanceState};
use super::pool::VoicePool;
use super::prelude::{note_to_frequency, semitones_to_ratio};
use super::voice::{Voice, VoiceParams};
use super::waveform::{NoiseSource, Waveform};
use crate::config::{NoiseMode, PluginConfig};
use crate::error::{InitError, PresetError};
use crate::params::{ParamSpec, ParameterStore};
use crate::plugin::{interleaved_frames, validate_sample_rate, Instrument, Plugin, NUM_CHANNELS};

pub const PARAM_WAVEFORM: usize = 0;
pub const PARAM_ATTACK: usize = 1;
pub const PARAM_DECAY: usize = 2;
pub const PARAM_SUSTAIN: usize = 3;
pub const PARAM_RELEASE: usize = 4;
pub const PARAM_CUTOFF: usize = 5;
pub const PARAM_RESONANCE: usize = 6;
pub const PARAM_DETUNE: usize = 7;
pub const NUM_INSTRUMENT_PARAMS: usize = 8;

pub static INSTRUMENT_PARAMS: [ParamSpec; NUM_INSTRUMENT_PARAMS] = [
    ParamSpec::new("waveform", 0.0, 4.0, 0.0),
    ParamSpec::new("attack", 0.001, 2.0, 0.01),
    ParamSpec::new("decay", 0.001, 2.0, 0.1),
    ParamSpec::new("sustain", 0.0, 1.0, 0.7),
    ParamSpec::new("release", 0.001, 5.0, 0.3),
    ParamSpec::new("cutoff", MIN_CUTOFF, MAX_CUTOFF, 5000.0),
    ParamSpec::new("resonance", 0.0, 1.0, 0.3),
    ParamSpec::new("detune", -1.0, 1.0, 0.0),
];

/// Polyphonic subtractive instrument: voice pool, master stage and controllers.
pub struct Synth {
    config: PluginConfig,
    params: ParameterStore<NUM_INSTRUMENT_PARAMS>,
    pool: VoicePool,
    performance: PerformanceState,
    noise: NoiseSource, // shared by all voices in NoiseMode::Shared
    sample_rate: f32,
    block_size: usize,
}

impl Synth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PluginConfig) -> Self {
        let config = config.sanitized();
        Self {
            params: ParameterStore::new(&INSTRUMENT_PARAMS),
            pool: VoicePool::new(config.voice_count()),
            performance: PerformanceState::new(),
            noise: NoiseSource::default(),
            sample_rate: config.sample_rate,
            block_size: config.block_size,
            config,
        }
    }

    /// Construction-time settings. The pool size is fixed from these.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn parameters(&self) -> &ParameterStore<NUM_INSTRUMENT_PARAMS> {
        &self.params
    }

    pub fn performance(&self) -> &PerformanceState {
        &self.performance
    }

    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }

    pub fn voice(&self, slot: usize) -> Option<&Voice> {
        self.pool.voice(slot)
    }

    pub fn active_voice_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn waveform(&self) -> Waveform {
        Waveform::from_param(self.params.get(PARAM_WAVEFORM))
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.params.set(PARAM_WAVEFORM, waveform.as_param());
    }

    pub fn preset_json(&self) -> String {
        self.params.to_json()
    }

    pub fn load_preset(&mut self, text: &str) -> Result<(), PresetError> {
        self.params.load_json(text)
    }

    fn envelope_params(&self) -> EnvelopeParams {
        EnvelopeParams {
            attack: self.params.get(PARAM_ATTACK),
            decay: self.params.get(PARAM_DECAY),
            sustain: self.params.get(PARAM_SUSTAIN),
            release: self.params.get(PARAM_RELEASE),
        }
    }

    fn voice_params(&self) -> VoiceParams {
        VoiceParams {
            waveform: self.waveform(),
            envelope: self.envelope_params(),
            cutoff: self.params.get(PARAM_CUTOFF),
            resonance: self.params.get(PARAM_RESONANCE),
            sample_rate: self.sample_rate,
        }
    }

    /// Retune active voices for the current bend and detune.
    fn update_pitch(&mut self) {
        let offset = self.performance.bend_semitones() + self.params.get(PARAM_DETUNE);
        let ratio = semitones_to_ratio(offset);
        let sample_rate = self.sample_rate;
        for voice in self.pool.voices_mut().iter_mut().filter(|v| v.is_active()) {
            let frequency = note_to_frequency(voice.note()) * ratio;
            voice.set_phase_increment(frequency / sample_rate);
        }
    }

    /// Render `sample_count` stereo frames into an interleaved buffer.
    pub fn render(&mut self, output: &mut [f32], sample_count: usize) {
        let frames = interleaved_frames(output.len(), sample_count);
        self.update_pitch();
        let params = self.voice_params();
        let per_voice_noise = self.config.noise_mode == NoiseMode::PerVoice;
        let master_volume = self.performance.master_volume;

        for frame in output[..frames * NUM_CHANNELS].chunks_exact_mut(NUM_CHANNELS) {
            let mut sample = 0.0;
            for voice in self.pool.voices_mut().iter_mut() {
                if voice.is_active() {
                    sample += voice.render(&params, &mut self.noise, per_voice_noise);
                }
            }
            let sample = (sample * master_volume).tanh();
            frame.fill(sample);
        }
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::with_config(PluginConfig::default())
    }
}

impl Plugin for Synth {
    fn init(&mut self, sample_rate: f32, block_size: usize) -> Result<(), InitError> {
        self.sample_rate = validate_sample_rate(sample_rate)?;
        self.block_size = block_size;
        self.pool.reset();
        log::info!(
            "instrument init: {} Hz, block {}, {} voices",
            sample_rate,
            block_size,
            self.pool.capacity()
        );
        Ok(())
    }

    fn reset(&mut self) {
        self.pool.reset();
        self.performance.reset();
        log::debug!("instrument reset");
    }

    fn dispose(&mut self) {
        self.pool.reset();
        log::info!("instrument disposed");
    }

    fn parameter_count(&self) -> usize {
        self.params.count()
    }

    fn get_parameter(&self, index: usize) -> f32 {
        self.params.get(index)
    }

    fn set_parameter(&mut self, index: usize, value: f32) {
        self.params.set(index, value);
    }

    /// Input is ignored; output is interleaved stereo.
    fn process(&mut self, _input: &[f32], output: &mut [f32], sample_count: usize) {
        self.render(output, sample_count);
    }
}

impl Instrument for Synth {
    fn note_on(&mut self, note: u8, velocity: u8, channel: u8) {
        if note > MAX_NOTE {
            return;
        }
        if velocity == 0 {
            self.note_off(note, channel);
            return;
        }
        let phase_increment = note_to_frequency(note) / self.sample_rate;
        self.pool.note_on(note, velocity, phase_increment);
    }

    fn note_off(&mut self, note: u8, _channel: u8) {
        self.pool.note_off(note);
    }

    fn control_change(&mut self, cc: u8, value: u8, _channel: u8) {
        let Some(control) = ControlChange::from_midi(cc) else {
            return;
        };
        match control {
            ControlChange::ModWheel => self.performance.set_mod_wheel(value),
            ControlChange::Volume => self.performance.set_master_volume(value),
            ControlChange::FilterCutoff => {
                let cutoff = MIN_CUTOFF + normalize_cc(value) * (MAX_CUTOFF - MIN_CUTOFF);
                self.params.set(PARAM_CUTOFF, cutoff);
            }
            ControlChange::FilterResonance => {
                self.params.set(PARAM_RESONANCE, normalize_cc(value));
            }
            ControlChange::AllNotesOff => self.reset(),
        }
    }

    fn pitch_bend(&mut self, value: u16, _channel: u8) {
        self.performance.set_pitch_bend(value);
    }
}
