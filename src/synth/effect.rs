use super::delayline::DelayBuffer;
use super::filter::{one_pole_alpha, OnePoleLowPass, MAX_CUTOFF, MIN_CUTOFF};
use super::prelude::lerp;
use crate::config::PluginConfig;
use crate::error::{InitError, PresetError};
use crate::params::{ParamSpec, ParameterStore};
use crate::plugin::{interleaved_frames, validate_sample_rate, Plugin, NUM_CHANNELS};

pub const PARAM_GAIN: usize = 0;
pub const PARAM_MIX: usize = 1;
pub const PARAM_CUTOFF: usize = 2;
pub const PARAM_RESONANCE: usize = 3;
pub const NUM_EFFECT_PARAMS: usize = 4;

pub static EFFECT_PARAMS: [ParamSpec; NUM_EFFECT_PARAMS] = [
    ParamSpec::new("gain", 0.0, 2.0, 1.0),
    ParamSpec::new("mix", 0.0, 1.0, 0.5),
    ParamSpec::new("cutoff", MIN_CUTOFF, MAX_CUTOFF, 1000.0),
    // Reserved: the signal path does not read it yet.
    ParamSpec::new("resonance", 0.0, 1.0, 0.5),
];

/// Stereo lowpass effect with dry/wet mix and output gain.
///
/// Until `init` succeeds (and again after `dispose`) the effect has no delay
/// memory and processing copies input to output unchanged.
pub struct FilterEffect {
    config: PluginConfig,
    params: ParameterStore<NUM_EFFECT_PARAMS>,
    filters: [OnePoleLowPass; NUM_CHANNELS],
    delay: Option<DelayBuffer>,
    sample_rate: f32,
    block_size: usize,
}

impl FilterEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PluginConfig) -> Self {
        let config = config.sanitized();
        Self {
            params: ParameterStore::new(&EFFECT_PARAMS),
            filters: Default::default(),
            delay: None,
            sample_rate: config.sample_rate,
            block_size: config.block_size,
            config,
        }
    }

    /// Construction-time settings.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Whether `init` allocated the delay memory and processing is live.
    pub fn is_ready(&self) -> bool {
        self.delay.is_some()
    }

    pub fn delay_buffer(&self) -> Option<&DelayBuffer> {
        self.delay.as_ref()
    }

    pub fn filter_state(&self, channel: usize) -> Option<f32> {
        self.filters.get(channel).map(OnePoleLowPass::state)
    }

    pub fn parameters(&self) -> &ParameterStore<NUM_EFFECT_PARAMS> {
        &self.params
    }

    pub fn preset_json(&self) -> String {
        self.params.to_json()
    }

    pub fn load_preset(&mut self, text: &str) -> Result<(), PresetError> {
        self.params.load_json(text)
    }

    /// Process planar audio: channel `c` occupies `[c * sample_count, (c + 1) * sample_count)`.
    ///
    /// Only the first two channels are processed; further channels are left untouched.
    pub fn process_block(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        sample_count: usize,
        channel_count: usize,
    ) {
        let channels = channel_count.min(NUM_CHANNELS);
        let ready = self.is_ready();
        let (gain, mix, alpha) = self.coefficients();

        for (ch, filter) in self.filters.iter_mut().enumerate().take(channels) {
            let start = ch * sample_count;
            let len = sample_count
                .min(input.len().saturating_sub(start))
                .min(output.len().saturating_sub(start));
            if len == 0 {
                continue;
            }
            let dry = &input[start..start + len];
            let wet = &mut output[start..start + len];
            if !ready {
                wet.copy_from_slice(dry);
                continue;
            }
            for (out, &x) in wet.iter_mut().zip(dry) {
                *out = lerp(x, filter.process(x, alpha), mix) * gain;
            }
        }
    }

    fn coefficients(&self) -> (f32, f32, f32) {
        let gain = self.params.get(PARAM_GAIN);
        let mix = self.params.get(PARAM_MIX);
        let alpha = one_pole_alpha(self.params.get(PARAM_CUTOFF), self.sample_rate);
        (gain, mix, alpha)
    }
}

impl Default for FilterEffect {
    fn default() -> Self {
        Self::with_config(PluginConfig::default())
    }
}

impl Plugin for FilterEffect {
    fn init(&mut self, sample_rate: f32, block_size: usize) -> Result<(), InitError> {
        let sample_rate = match validate_sample_rate(sample_rate) {
            Ok(rate) => rate,
            Err(e) => {
                self.delay = None;
                return Err(e);
            }
        };
        self.sample_rate = sample_rate;
        self.block_size = block_size;
        self.filters.iter_mut().for_each(OnePoleLowPass::reset);

        // One second of memory per channel.
        match DelayBuffer::try_new(sample_rate as usize, NUM_CHANNELS) {
            Ok(delay) => {
                self.delay = Some(delay);
                log::info!("effect init: {} Hz, block {}", sample_rate, block_size);
                Ok(())
            }
            Err(e) => {
                self.delay = None;
                log::error!("effect init failed, running as passthrough: {}", e);
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        if let Some(delay) = self.delay.as_mut() {
            delay.clear();
        }
        self.filters.iter_mut().for_each(OnePoleLowPass::reset);
        log::debug!("effect reset");
    }

    fn dispose(&mut self) {
        self.delay = None;
        log::info!("effect disposed");
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

    /// Interleaved stereo (L0, R0, L1, R1, ...).
    fn process(&mut self, input: &[f32], output: &mut [f32], sample_count: usize) {
        let frames = interleaved_frames(input.len().min(output.len()), sample_count);
        let samples = frames * NUM_CHANNELS;

        if !self.is_ready() {
            output[..samples].copy_from_slice(&input[..samples]);
            return;
        }

        let (gain, mix, alpha) = self.coefficients();
        let frames_in = input[..samples].chunks_exact(NUM_CHANNELS);
        let frames_out = output[..samples].chunks_exact_mut(NUM_CHANNELS);
        for (frame_in, frame_out) in frames_in.zip(frames_out) {
            for ((out, &x), filter) in frame_out
                .iter_mut()
                .zip(frame_in)
                .zip(self.filters.iter_mut())
            {
                *out = lerp(x, filter.process(x, alpha), mix) * gain;
            }
        }
    }
}
