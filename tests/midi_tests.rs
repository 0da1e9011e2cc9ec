use plugforge::input::{dispatch, MidiMessage};
use plugforge::synth::envelope::EnvelopeStage;
use plugforge::{Plugin, Synth};

#[test]
fn parses_note_messages() {
    assert_eq!(
        MidiMessage::parse(&[0x93, 60, 100]),
        Some(MidiMessage::NoteOn {
            channel: 3,
            note: 60,
            velocity: 100
        })
    );
    assert_eq!(
        MidiMessage::parse(&[0x80, 60, 64]),
        Some(MidiMessage::NoteOff {
            channel: 0,
            note: 60
        })
    );
    // Note-on with zero velocity.
    assert_eq!(
        MidiMessage::parse(&[0x91, 61, 0]),
        Some(MidiMessage::NoteOff {
            channel: 1,
            note: 61
        })
    );
}

#[test]
fn parses_controllers_and_bend() {
    assert_eq!(
        MidiMessage::parse(&[0xB0, 74, 127]),
        Some(MidiMessage::ControlChange {
            channel: 0,
            cc: 74,
            value: 127
        })
    );
    assert_eq!(
        MidiMessage::parse(&[0xE0, 0x00, 0x40]),
        Some(MidiMessage::PitchBend {
            channel: 0,
            value: 8192
        })
    );
    assert_eq!(
        MidiMessage::parse(&[0xEF, 0x7F, 0x7F]),
        Some(MidiMessage::PitchBend {
            channel: 15,
            value: 16383
        })
    );
}

#[test]
fn ignores_unsupported_or_broken_input() {
    assert_eq!(MidiMessage::parse(&[]), None);
    assert_eq!(MidiMessage::parse(&[0x90, 60]), None);
    assert_eq!(MidiMessage::parse(&[60, 100, 0]), None); // running status
    assert_eq!(MidiMessage::parse(&[0xF8, 0, 0]), None); // clock
    assert_eq!(MidiMessage::parse(&[0xC0, 5, 0]), None); // program change
}

#[test]
fn dispatch_drives_the_instrument() {
    let mut synth = Synth::new();
    synth.init(44100.0, 128).unwrap();

    assert!(dispatch(&mut synth, &[0x90, 64, 127]));
    assert_eq!(synth.active_voice_count(), 1);
    assert_eq!(synth.voice(0).unwrap().note(), 64);

    assert!(dispatch(&mut synth, &[0xB0, 7, 0]));
    assert_eq!(synth.performance().master_volume, 0.0);

    assert!(dispatch(&mut synth, &[0xE0, 0x7F, 0x7F]));
    assert!(synth.performance().pitch_bend > 0.99);

    assert!(dispatch(&mut synth, &[0x80, 64, 0]));
    assert_eq!(synth.voice(0).unwrap().stage(), EnvelopeStage::Release);

    assert!(!dispatch(&mut synth, &[0xFE]));
}
