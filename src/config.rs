use serde::{Deserialize, Serialize};

/// Upper bound on the voice pool size accepted from a config.
pub const MAX_POOL_SIZE: usize = 128;

/// How the noise waveform's generator is owned inside one plugin instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// One generator per instance, advanced by every voice in slot order.
    #[default]
    Shared,
    /// Each voice owns a generator seeded from its slot index.
    PerVoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f32,
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_max_voices")]
    pub max_voices: usize,
    #[serde(default)]
    pub noise_mode: NoiseMode,
}

fn default_sample_rate() -> f32 {
    44100.0
}

fn default_block_size() -> usize {
    128
}

fn default_max_voices() -> usize {
    16
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            max_voices: default_max_voices(),
            noise_mode: NoiseMode::Shared,
        }
    }
}

impl PluginConfig {
    /// Parse a config from JSON. Missing fields fall back to their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> String {
        // A struct of plain numbers and a unit enum always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Pool size clamped into `[1, MAX_POOL_SIZE]`.
    pub fn voice_count(&self) -> usize {
        self.max_voices.clamp(1, MAX_POOL_SIZE)
    }

    /// Replace out-of-range fields with usable values.
    pub fn sanitized(mut self) -> Self {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            log::warn!(
                "config: invalid sample rate {}, using {}",
                self.sample_rate,
                default_sample_rate()
            );
            self.sample_rate = default_sample_rate();
        }
        if self.max_voices != self.voice_count() {
            log::warn!(
                "config: max_voices {} out of range, clamped to {}",
                self.max_voices,
                self.voice_count()
            );
            self.max_voices = self.voice_count();
        }
        self
    }
}
