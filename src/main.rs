use clap::{Args as ClapArgs, Parser, Subcommand};
use plugforge::runtime::render::{
    read_wav, render_effect, render_instrument, write_wav, NoteSpan, RenderError,
};
use plugforge::synth::core::{PARAM_RELEASE, PARAM_WAVEFORM};
use plugforge::synth::effect::{PARAM_CUTOFF, PARAM_GAIN, PARAM_MIX};
use plugforge::{FilterEffect, Plugin, PluginConfig, Synth};
use std::path::PathBuf;

/// Render the bundled instrument or effect offline to a WAV file
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a chord through the instrument
    Instrument(InstrumentArgs),
    /// Run a WAV file through the filter effect
    Effect(EffectArgs),
}

#[derive(ClapArgs)]
struct InstrumentArgs {
    /// Output WAV path
    #[arg(long, default_value = "instrument.wav")]
    out: PathBuf,
    /// Comma-separated MIDI notes played together
    #[arg(long, value_delimiter = ',', default_value = "60,64,67")]
    notes: Vec<u8>,
    /// Waveform: 0 sine, 1 square, 2 saw, 3 triangle, 4 noise
    #[arg(long, default_value_t = 0.0)]
    waveform: f32,
    #[arg(long, default_value_t = 100)]
    velocity: u8,
    /// Seconds each note is held
    #[arg(long, default_value_t = 1.0)]
    hold: f32,
    /// Release time in seconds
    #[arg(long, default_value_t = 0.3)]
    release: f32,
    /// JSON plugin config (sample rate, block size, voices)
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON parameter preset applied after the command-line values
    #[arg(long)]
    preset: Option<PathBuf>,
}

#[derive(ClapArgs)]
struct EffectArgs {
    /// Input WAV path
    #[arg(long)]
    input: PathBuf,
    /// Output WAV path
    #[arg(long, default_value = "effect.wav")]
    out: PathBuf,
    #[arg(long, default_value_t = 1.0)]
    gain: f32,
    #[arg(long, default_value_t = 0.5)]
    mix: f32,
    #[arg(long, default_value_t = 1000.0)]
    cutoff: f32,
    #[arg(long, default_value_t = 128)]
    block_size: usize,
}

fn load_config(path: Option<&PathBuf>) -> Result<PluginConfig, RenderError> {
    match path {
        Some(path) => Ok(PluginConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(PluginConfig::default()),
    }
}

fn run_instrument(args: InstrumentArgs) -> Result<(), RenderError> {
    let config = load_config(args.config.as_ref())?;
    let sample_rate = config.sample_rate;
    let block_size = config.block_size;

    let mut synth = Synth::with_config(config);
    synth.init(sample_rate, block_size)?;
    synth.set_parameter(PARAM_WAVEFORM, args.waveform);
    synth.set_parameter(PARAM_RELEASE, args.release);
    if let Some(path) = &args.preset {
        synth.load_preset(&std::fs::read_to_string(path)?)?;
    }

    let notes: Vec<NoteSpan> = args
        .notes
        .iter()
        .map(|&note| NoteSpan {
            note,
            velocity: args.velocity,
            start: 0.0,
            duration: args.hold,
        })
        .collect();
    // Leave room for the release tail.
    let seconds = args.hold + synth.get_parameter(PARAM_RELEASE) * 8.0;
    let samples = render_instrument(&mut synth, &notes, seconds, sample_rate, block_size);
    synth.dispose();

    write_wav(&args.out, &samples, sample_rate as u32)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

fn run_effect(args: EffectArgs) -> Result<(), RenderError> {
    let (input, sample_rate) = read_wav(&args.input)?;
    let mut effect = FilterEffect::new();
    effect.init(sample_rate as f32, args.block_size)?;
    effect.set_parameter(PARAM_GAIN, args.gain);
    effect.set_parameter(PARAM_MIX, args.mix);
    effect.set_parameter(PARAM_CUTOFF, args.cutoff);

    let output = render_effect(&mut effect, &input, args.block_size);
    effect.dispose();

    write_wav(&args.out, &output, sample_rate)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Instrument(args) => run_instrument(args)?,
        Commands::Effect(args) => run_effect(args)?,
    }
    Ok(())
}
