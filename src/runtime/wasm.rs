use crate::plugin::{Instrument, Plugin, NUM_CHANNELS};
use crate::synth::{FilterEffect, Synth};
use js_sys::Float32Array;
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            _ => console::log_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls are no-ops.
fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Host-index conversion: negative indices never match a slot.
fn slot(index: i32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

/// Instrument plugin instance for JS hosts (no threads, direct API).
#[wasm_bindgen]
pub struct WasmInstrument {
    synth: Synth,
    temp_buffer: Vec<f32>,
}

#[wasm_bindgen]
impl WasmInstrument {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmInstrument {
        init_logging();
        WasmInstrument {
            synth: Synth::new(),
            temp_buffer: Vec::new(),
        }
    }

    /// Returns `false` if the instance could not be initialized.
    #[wasm_bindgen]
    pub fn init(&mut self, sample_rate: f32, block_size: usize) -> bool {
        self.temp_buffer = vec![0.0; block_size * NUM_CHANNELS];
        match self.synth.init(sample_rate, block_size) {
            Ok(()) => true,
            Err(e) => {
                log::error!("instrument init failed: {}", e);
                false
            }
        }
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.synth.reset();
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.synth.dispose();
        self.temp_buffer = Vec::new();
    }

    #[wasm_bindgen(js_name = getLatency)]
    pub fn latency(&self) -> u32 {
        self.synth.latency()
    }

    #[wasm_bindgen(js_name = getParameterCount)]
    pub fn parameter_count(&self) -> usize {
        self.synth.parameter_count()
    }

    #[wasm_bindgen(js_name = getParameter)]
    pub fn get_parameter(&self, index: i32) -> f32 {
        self.synth.get_parameter(slot(index))
    }

    #[wasm_bindgen(js_name = setParameter)]
    pub fn set_parameter(&mut self, index: i32, value: f32) {
        self.synth.set_parameter(slot(index), value);
    }

    /// Fill `output` (interleaved stereo) with `sample_count` frames.
    #[wasm_bindgen]
    pub fn process(&mut self, input: &[f32], output: &mut [f32], sample_count: usize) {
        self.synth.process(input, output, sample_count);
    }

    /// Render `length` frames into a JS-friendly Float32Array.
    #[wasm_bindgen]
    pub fn render(&mut self, length: usize) -> Float32Array {
        if self.temp_buffer.len() != length * NUM_CHANNELS {
            self.temp_buffer = vec![0.0; length * NUM_CHANNELS];
        }
        self.synth.render(&mut self.temp_buffer, length);
        Float32Array::from(self.temp_buffer.as_slice())
    }

    #[wasm_bindgen(js_name = noteOn)]
    pub fn note_on(&mut self, note: u8, velocity: u8, channel: u8) {
        self.synth.note_on(note, velocity, channel);
    }

    #[wasm_bindgen(js_name = noteOff)]
    pub fn note_off(&mut self, note: u8, channel: u8) {
        self.synth.note_off(note, channel);
    }

    #[wasm_bindgen(js_name = controlChange)]
    pub fn control_change(&mut self, cc: u8, value: u8, channel: u8) {
        self.synth.control_change(cc, value, channel);
    }

    #[wasm_bindgen(js_name = pitchBend)]
    pub fn pitch_bend(&mut self, value: u16, channel: u8) {
        self.synth.pitch_bend(value, channel);
    }

    /// Raw MIDI bytes; returns `false` for unsupported messages.
    #[wasm_bindgen(js_name = midiMessage)]
    pub fn midi_message(&mut self, bytes: &[u8]) -> bool {
        crate::input::dispatch(&mut self.synth, bytes)
    }
}

/// Effect plugin instance for JS hosts.
#[wasm_bindgen]
pub struct WasmEffect {
    effect: FilterEffect,
}

#[wasm_bindgen]
impl WasmEffect {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEffect {
        init_logging();
        WasmEffect {
            effect: FilterEffect::new(),
        }
    }

    /// Returns `false` if the delay memory could not be allocated; the
    /// effect then passes audio through unchanged.
    #[wasm_bindgen]
    pub fn init(&mut self, sample_rate: f32, block_size: usize) -> bool {
        match self.effect.init(sample_rate, block_size) {
            Ok(()) => true,
            Err(e) => {
                log::error!("effect init failed: {}", e);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.effect.is_ready()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.effect.reset();
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.effect.dispose();
    }

    #[wasm_bindgen(js_name = getLatency)]
    pub fn latency(&self) -> u32 {
        self.effect.latency()
    }

    #[wasm_bindgen(js_name = getSampleRate)]
    pub fn sample_rate(&self) -> f32 {
        self.effect.sample_rate()
    }

    #[wasm_bindgen(js_name = getParameterCount)]
    pub fn parameter_count(&self) -> usize {
        self.effect.parameter_count()
    }

    #[wasm_bindgen(js_name = getParameter)]
    pub fn get_parameter(&self, index: i32) -> f32 {
        self.effect.get_parameter(slot(index))
    }

    #[wasm_bindgen(js_name = setParameter)]
    pub fn set_parameter(&mut self, index: i32, value: f32) {
        self.effect.set_parameter(slot(index), value);
    }

    /// Interleaved stereo in and out.
    #[wasm_bindgen]
    pub fn process(&mut self, input: &[f32], output: &mut [f32], sample_count: usize) {
        self.effect.process(input, output, sample_count);
    }

    /// Planar channels in and out.
    #[wasm_bindgen(js_name = processBlock)]
    pub fn process_block(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        sample_count: usize,
        channel_count: usize,
    ) {
        self.effect
            .process_block(input, output, sample_count, channel_count);
    }
}
