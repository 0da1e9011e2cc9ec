use crate::plugin::{Instrument, Plugin};
use crate::synth::{FilterEffect, Synth};
use std::sync::mpsc::{channel, Receiver, Sender};

/// A control-thread call, queued until the next block boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluginEvent {
    SetParameter { index: usize, value: f32 },
    Reset,
    NoteOn { note: u8, velocity: u8, channel: u8 },
    NoteOff { note: u8, channel: u8 },
    ControlChange { cc: u8, value: u8, channel: u8 },
    PitchBend { value: u16, channel: u8 },
}

/// Applies queued events to a plugin.
pub trait HandleEvent {
    fn handle_event(&mut self, event: PluginEvent);
}

impl HandleEvent for Synth {
    fn handle_event(&mut self, event: PluginEvent) {
        match event {
            PluginEvent::SetParameter { index, value } => self.set_parameter(index, value),
            PluginEvent::Reset => Plugin::reset(self),
            PluginEvent::NoteOn {
                note,
                velocity,
                channel,
            } => self.note_on(note, velocity, channel),
            PluginEvent::NoteOff { note, channel } => self.note_off(note, channel),
            PluginEvent::ControlChange { cc, value, channel } => {
                self.control_change(cc, value, channel)
            }
            PluginEvent::PitchBend { value, channel } => self.pitch_bend(value, channel),
        }
    }
}

impl HandleEvent for FilterEffect {
    fn handle_event(&mut self, event: PluginEvent) {
        match event {
            PluginEvent::SetParameter { index, value } => self.set_parameter(index, value),
            PluginEvent::Reset => Plugin::reset(self),
            // Effects have no note inputs.
            _ => {}
        }
    }
}

/// Audio-thread side: owns the plugin and drains events before each block.
pub struct QueuedPlugin<P> {
    plugin: P,
    receiver: Receiver<PluginEvent>,
}

impl<P: Plugin + HandleEvent> QueuedPlugin<P> {
    pub fn new(plugin: P) -> (Self, PluginController) {
        let (sender, receiver) = channel();
        (Self { plugin, receiver }, PluginController { sender })
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn plugin_mut(&mut self) -> &mut P {
        &mut self.plugin
    }

    pub fn into_inner(self) -> P {
        self.plugin
    }

    /// Apply every pending event. Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.plugin.handle_event(event);
            applied += 1;
        }
        applied
    }

    pub fn process(&mut self, input: &[f32], output: &mut [f32], sample_count: usize) {
        self.drain_events();
        self.plugin.process(input, output, sample_count);
    }
}

impl QueuedPlugin<FilterEffect> {
    /// Planar counterpart of [`QueuedPlugin::process`].
    pub fn process_block(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        sample_count: usize,
        channel_count: usize,
    ) {
        self.drain_events();
        self.plugin
            .process_block(input, output, sample_count, channel_count);
    }
}

/// Control-thread side. Cheap to clone; each UI or MIDI thread gets its own.
#[derive(Debug, Clone)]
pub struct PluginController {
    sender: Sender<PluginEvent>,
}

impl PluginController {
    /// Queue an event. Returns `false` once the audio side has been dropped.
    pub fn send(&self, event: PluginEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("plugin event dropped, audio side is gone: {:?}", e.0);
                false
            }
        }
    }

    pub fn set_parameter(&self, index: usize, value: f32) -> bool {
        self.send(PluginEvent::SetParameter { index, value })
    }

    pub fn reset(&self) -> bool {
        self.send(PluginEvent::Reset)
    }

    pub fn note_on(&self, note: u8, velocity: u8, channel: u8) -> bool {
        self.send(PluginEvent::NoteOn {
            note,
            velocity,
            channel,
        })
    }

    pub fn note_off(&self, note: u8, channel: u8) -> bool {
        self.send(PluginEvent::NoteOff { note, channel })
    }

    pub fn control_change(&self, cc: u8, value: u8, channel: u8) -> bool {
        self.send(PluginEvent::ControlChange { cc, value, channel })
    }

    pub fn pitch_bend(&self, value: u16, channel: u8) -> bool {
        self.send(PluginEvent::PitchBend { value, channel })
    }
}
