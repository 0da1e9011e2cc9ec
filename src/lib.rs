pub mod config;
pub mod error;
pub mod input;
pub mod params;
pub mod plugin;
pub mod runtime;
pub mod synth;

pub use config::{NoiseMode, PluginConfig};
pub use error::InitError;
pub use plugin::{Instrument, Plugin};
pub use synth::{FilterEffect, Synth};
