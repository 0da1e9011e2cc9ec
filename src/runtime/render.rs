use crate::error::{InitError, PresetError};
use crate::plugin::{Instrument, Plugin, NUM_CHANNELS};
use crate::synth::FilterEffect;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("init: {0}")]
    Init(#[from] InitError),
    #[error("preset: {0}")]
    Preset(#[from] PresetError),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}

/// A note held from `start` for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSpan {
    pub note: u8,
    pub velocity: u8,
    pub start: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy)]
enum NoteEvent {
    On { note: u8, velocity: u8 },
    Off { note: u8 },
}

fn seconds_to_frames(seconds: f32, sample_rate: f32) -> usize {
    (seconds.max(0.0) * sample_rate).round() as usize
}

/// Render `seconds` of interleaved stereo from `instrument`, playing `notes`.
///
/// Blocks are split at note boundaries so every event lands on its exact frame.
/// The instrument must already be initialized at `sample_rate`.
pub fn render_instrument<I: Instrument + ?Sized>(
    instrument: &mut I,
    notes: &[NoteSpan],
    seconds: f32,
    sample_rate: f32,
    block_size: usize,
) -> Vec<f32> {
    let total_frames = seconds_to_frames(seconds, sample_rate);
    let block_size = block_size.max(1);

    let mut events: Vec<(usize, NoteEvent)> = Vec::with_capacity(notes.len() * 2);
    for span in notes {
        let on = seconds_to_frames(span.start, sample_rate);
        let off = on + seconds_to_frames(span.duration, sample_rate);
        events.push((
            on,
            NoteEvent::On {
                note: span.note,
                velocity: span.velocity,
            },
        ));
        events.push((off, NoteEvent::Off { note: span.note }));
    }
    // Releases land before strikes on the same frame, so a retriggered note
    // is not cut off by the end of the previous one.
    events.sort_by_key(|(frame, event)| (*frame, matches!(event, NoteEvent::On { .. })));

    let mut output = vec![0.0; total_frames * NUM_CHANNELS];
    let mut frame = 0;
    let mut next = 0;
    while frame < total_frames {
        while let Some(&(at, event)) = events.get(next) {
            if at > frame {
                break;
            }
            match event {
                NoteEvent::On { note, velocity } => instrument.note_on(note, velocity, 0),
                NoteEvent::Off { note } => instrument.note_off(note, 0),
            }
            next += 1;
        }
        let limit = events
            .get(next)
            .map_or(total_frames, |(at, _)| *at)
            .min(total_frames);
        let frames = (limit - frame).min(block_size);
        let block = &mut output[frame * NUM_CHANNELS..(frame + frames) * NUM_CHANNELS];
        instrument.process(&[], block, frames);
        frame += frames;
    }
    log::info!(
        "rendered {} frames ({} note events)",
        total_frames,
        events.len()
    );
    output
}

/// Run interleaved stereo `input` through `effect` in blocks of `block_size` frames.
pub fn render_effect(effect: &mut FilterEffect, input: &[f32], block_size: usize) -> Vec<f32> {
    let block_samples = block_size.max(1) * NUM_CHANNELS;
    let usable = input.len() - input.len() % NUM_CHANNELS;
    let mut output = vec![0.0; usable];
    for (block_in, block_out) in input[..usable]
        .chunks(block_samples)
        .zip(output.chunks_mut(block_samples))
    {
        effect.process(block_in, block_out, block_in.len() / NUM_CHANNELS);
    }
    output
}

/// Write interleaved stereo as 32-bit float WAV.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), RenderError> {
    let spec = hound::WavSpec {
        channels: NUM_CHANNELS as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read a WAV file as interleaved stereo `f32`, returning the samples and rate.
///
/// Mono files are duplicated to both channels; channels past the second are dropped.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), RenderError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let raw: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mut stereo = Vec::with_capacity(raw.len() / channels * NUM_CHANNELS);
    for frame in raw.chunks_exact(channels) {
        let left = frame[0];
        let right = frame.get(1).copied().unwrap_or(left);
        stereo.push(left);
        stereo.push(right);
    }
    Ok((stereo, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::envelope::EnvelopeStage;
    use crate::synth::Synth;

    #[test]
    fn render_length_matches_duration() {
        let mut synth = Synth::new();
        synth.init(8000.0, 64).unwrap();
        let notes = [NoteSpan {
            note: 60,
            velocity: 100,
            start: 0.0,
            duration: 0.1,
        }];
        let out = render_instrument(&mut synth, &notes, 0.25, 8000.0, 64);
        assert_eq!(out.len(), 2000 * NUM_CHANNELS);
        assert!(out.iter().any(|s| s.abs() > 0.0));
    }

    #[test]
    fn retriggered_note_survives_previous_release() {
        let mut synth = Synth::new();
        synth.init(1000.0, 64).unwrap();
        // The later strike is listed first; its start is the earlier one's end.
        let notes = [
            NoteSpan {
                note: 60,
                velocity: 100,
                start: 0.1,
                duration: 1.0,
            },
            NoteSpan {
                note: 60,
                velocity: 100,
                start: 0.0,
                duration: 0.1,
            },
        ];
        render_instrument(&mut synth, &notes, 0.15, 1000.0, 64);

        let stages: Vec<_> = synth
            .pool()
            .voices()
            .iter()
            .filter(|v| v.is_active())
            .map(|v| v.stage())
            .collect();
        // The first strike is releasing; the second is still sounding.
        assert_eq!(stages.len(), 2);
        assert!(stages.iter().any(|stage| *stage != EnvelopeStage::Release));
    }
}
