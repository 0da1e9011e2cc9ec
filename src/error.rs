use std::collections::TryReserveError;
use thiserror::Error;

/// Failure while bringing a plugin instance up in `init`.
///
/// A plugin that returns one of these stays inert: it keeps answering every
/// entry point, but processing degrades to a passthrough or silence.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid sample rate {0}")]
    InvalidSampleRate(f32),
    #[error("failed to allocate {samples} samples of delay memory: {source}")]
    Allocation {
        samples: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Failure while loading a parameter preset.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("malformed preset: {0}")]
    Parse(#[from] serde_json::Error),
}
