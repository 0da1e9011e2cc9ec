use plugforge::synth::envelope::EnvelopeStage;
use plugforge::synth::pool::VoicePool;
use plugforge::{Instrument, Plugin, Synth};

fn render(synth: &mut Synth, frames: usize) {
    let mut block = vec![0.0; 128 * 2];
    let mut remaining = frames;
    while remaining > 0 {
        let n = remaining.min(128);
        synth.process(&[], &mut block, n);
        remaining -= n;
    }
}

fn synth_at_sustain(notes: std::ops::RangeInclusive<u8>) -> Synth {
    let mut synth = Synth::new();
    synth.init(44100.0, 128).unwrap();
    for note in notes {
        synth.note_on(note, 100, 0);
    }
    // attack (441) + decay (4410) samples at the default settings
    render(&mut synth, 6000);
    synth
}

#[test]
fn pool_starts_empty_with_fixed_capacity() {
    let pool = VoicePool::new(16);
    assert_eq!(pool.capacity(), 16);
    assert_eq!(pool.active_count(), 0);
    assert!(pool.voice(16).is_none());
}

#[test]
fn note_on_prefers_free_slots_in_order() {
    let mut pool = VoicePool::new(4);
    assert_eq!(pool.note_on(60, 100, 0.01), 0);
    assert_eq!(pool.note_on(62, 100, 0.01), 1);
    assert_eq!(pool.note_on(64, 100, 0.01), 2);
    assert_eq!(pool.active_count(), 3);
}

#[test]
fn new_voice_is_initialized_from_scratch() {
    let mut pool = VoicePool::new(2);
    let slot = pool.note_on(69, 127, 0.01);
    let voice = pool.voice(slot).unwrap();
    assert!(voice.is_active());
    assert_eq!(voice.note(), 69);
    assert_eq!(voice.velocity(), 1.0);
    assert_eq!(voice.stage(), EnvelopeStage::Attack);
    assert_eq!(voice.level(), 0.0);
    assert_eq!(voice.phase(), 0.0);
    assert_eq!(voice.filter_state(), (0.0, 0.0));
}

#[test]
fn seventeenth_note_steals_and_pool_stays_full() {
    let mut synth = synth_at_sustain(40..=55);
    assert_eq!(synth.active_voice_count(), 16);
    for voice in synth.pool().voices() {
        assert_eq!(voice.stage(), EnvelopeStage::Sustain);
    }

    // Every voice sits at the same sustain level, so the lowest index (the oldest) goes.
    synth.note_on(56, 100, 0);
    assert_eq!(synth.active_voice_count(), 16);
    let stolen = synth.voice(0).unwrap();
    assert_eq!(stolen.note(), 56);
    assert_eq!(stolen.stage(), EnvelopeStage::Attack);
    assert_eq!(stolen.level(), 0.0);
    assert_eq!(stolen.phase(), 0.0);
    assert_eq!(stolen.filter_state(), (0.0, 0.0));
    assert!(synth.pool().voices().iter().all(|v| v.note() != 40));
}

#[test]
fn stealing_picks_the_quietest_voice() {
    let mut synth = synth_at_sustain(40..=55);
    synth.note_off(45, 0);
    render(&mut synth, 1000);
    let releasing = synth.voice(5).unwrap();
    assert!(releasing.is_active());
    assert!(releasing.level() < 0.7);

    synth.note_on(60, 100, 0);
    assert_eq!(synth.voice(5).unwrap().note(), 60);
    assert_eq!(synth.voice(0).unwrap().note(), 40);
}

#[test]
fn note_off_releases_every_layered_copy() {
    let mut synth = Synth::new();
    synth.init(44100.0, 128).unwrap();
    synth.note_on(60, 100, 0);
    synth.note_on(60, 80, 0);
    synth.note_on(64, 100, 0);
    render(&mut synth, 10);

    synth.note_off(60, 0);
    let voices = synth.pool().voices();
    assert_eq!(voices[0].stage(), EnvelopeStage::Release);
    assert_eq!(voices[1].stage(), EnvelopeStage::Release);
    assert_eq!(voices[2].stage(), EnvelopeStage::Attack);
}

#[test]
fn note_off_for_unplayed_note_changes_nothing() {
    let mut pool = VoicePool::new(4);
    pool.note_on(60, 100, 0.01);
    assert_eq!(pool.note_off(61), 0);
    assert_eq!(pool.voice(0).unwrap().stage(), EnvelopeStage::Attack);
}

#[test]
fn zero_velocity_note_on_is_a_note_off() {
    let mut synth = Synth::new();
    synth.init(44100.0, 128).unwrap();
    synth.note_on(60, 100, 0);
    render(&mut synth, 100);
    synth.note_on(60, 0, 0);
    assert_eq!(synth.voice(0).unwrap().stage(), EnvelopeStage::Release);
    assert_eq!(synth.active_voice_count(), 1);
}

#[test]
fn invalid_note_numbers_are_ignored() {
    let mut synth = Synth::new();
    synth.note_on(128, 100, 0);
    synth.note_on(255, 100, 0);
    assert_eq!(synth.active_voice_count(), 0);
}

#[test]
fn active_flag_tracks_idle_stage() {
    let mut synth = Synth::new();
    synth.init(44100.0, 128).unwrap();
    synth.set_parameter(4, 0.01);
    for note in 60..70 {
        synth.note_on(note, 100, 0);
    }
    let mut block = vec![0.0; 256];
    for step in 0..200 {
        if step == 50 {
            for note in 60..65 {
                synth.note_off(note, 0);
            }
        }
        synth.process(&[], &mut block, 128);
        for voice in synth.pool().voices() {
            assert_eq!(voice.is_active(), voice.stage() != EnvelopeStage::Idle);
        }
    }
    assert_eq!(synth.active_voice_count(), 5);
}
