use plugforge::runtime::{PluginEvent, QueuedPlugin};
use plugforge::synth::effect::{PARAM_GAIN, PARAM_MIX};
use plugforge::{FilterEffect, Plugin, Synth};
use std::thread;

#[test]
fn events_apply_at_the_next_block() {
    let mut synth = Synth::new();
    synth.init(44100.0, 64).unwrap();
    let (mut queued, controller) = QueuedPlugin::new(synth);

    assert!(controller.note_on(60, 100, 0));
    assert!(controller.set_parameter(0, 2.0));
    assert_eq!(queued.plugin().active_voice_count(), 0);

    let mut block = vec![0.0; 64 * 2];
    queued.process(&[], &mut block, 64);
    assert_eq!(queued.plugin().active_voice_count(), 1);
    assert_eq!(queued.plugin().get_parameter(0), 2.0);
}

#[test]
fn controllers_can_live_on_other_threads() {
    let mut synth = Synth::new();
    synth.init(44100.0, 64).unwrap();
    let (mut queued, controller) = QueuedPlugin::new(synth);

    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let controller = controller.clone();
            thread::spawn(move || {
                controller.note_on(60 + i, 100, 0);
                controller.pitch_bend(16383, 0);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(queued.drain_events(), 8);
    assert_eq!(queued.plugin().active_voice_count(), 4);
    assert!(queued.plugin().performance().pitch_bend > 0.99);
}

#[test]
fn effect_ignores_note_events() {
    let mut effect = FilterEffect::new();
    effect.init(44100.0, 64).unwrap();
    let (mut queued, controller) = QueuedPlugin::new(effect);

    controller.send(PluginEvent::NoteOn {
        note: 60,
        velocity: 100,
        channel: 0,
    });
    controller.set_parameter(0, 0.25);
    assert_eq!(queued.drain_events(), 2);
    assert_eq!(queued.plugin().get_parameter(0), 0.25);
}

#[test]
fn reset_event_clears_voices() {
    let mut synth = Synth::new();
    synth.init(44100.0, 64).unwrap();
    let (mut queued, controller) = QueuedPlugin::new(synth);
    controller.note_on(60, 100, 0);
    queued.drain_events();
    controller.reset();
    queued.drain_events();
    assert_eq!(queued.into_inner().active_voice_count(), 0);
}

#[test]
fn sending_after_the_audio_side_is_gone_fails() {
    let (queued, controller) = QueuedPlugin::new(Synth::new());
    drop(queued);
    assert!(!controller.note_off(60, 0));
}

#[test]
fn planar_blocks_see_queued_parameters() {
    let mut effect = FilterEffect::new();
    effect.init(44100.0, 64).unwrap();
    let (mut queued, controller) = QueuedPlugin::new(effect);

    controller.set_parameter(PARAM_MIX, 0.0);
    controller.set_parameter(PARAM_GAIN, 0.5);
    let input = vec![1.0; 64 * 2];
    let mut output = vec![0.0; 64 * 2];
    queued.process_block(&input, &mut output, 64, 2);
    assert!(output.iter().all(|&s| s == 0.5));
}
