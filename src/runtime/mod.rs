#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use wasm::{WasmEffect, WasmInstrument};

pub mod native;
pub use native::{HandleEvent, PluginController, PluginEvent, QueuedPlugin};

#[cfg(feature = "native")]
pub mod render;
