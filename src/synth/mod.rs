pub mod core;
pub mod delayline;
pub mod effect;
pub mod envelope;
pub mod filter;
pub mod note;
pub mod performance;
pub mod pool;
pub mod prelude;
pub mod voice;
pub mod waveform;

pub use self::core::Synth;
pub use self::effect::FilterEffect;
