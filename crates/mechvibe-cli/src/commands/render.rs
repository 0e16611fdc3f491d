//! Offline rendering to WAV.

use std::path::{Path, PathBuf};

use clap::Args;
use mechvibe_config::load_profile;
use mechvibe_core::{EntropySource, KeyCategory, RandomSource};
use mechvibe_io::{sample_file_name, write_buffer};
use mechvibe_synth::{RenderedBuffer, SwitchProfile, render};

use super::common::resolve_profile;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file, or output directory with --all
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Profile name (built-in or user) or path
    #[arg(short, long, default_value = "tactile")]
    profile: String,

    /// Render a hand-tuned profile file instead of --profile
    #[arg(long, value_name = "PATH")]
    profile_file: Option<PathBuf>,

    /// Key category (default, spacebar, enter, backspace, shift, capslock, tab, modifier, digit, fkey)
    #[arg(short, long, default_value = "default")]
    key: KeyCategory,

    /// Render every category into OUTPUT as a sample bank (key.wav, spacebar.wav, ...)
    #[arg(long)]
    all: bool,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Pitch jitter depth (0-1)
    #[arg(long, default_value = "0.0")]
    pitch_variation: f32,

    /// Seed for noise and jitter (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Bits per sample (16, 24 or 32 float)
    #[arg(long, default_value = "32")]
    bits: u16,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if ![16, 24, 32].contains(&args.bits) {
        anyhow::bail!("Unsupported bit depth {} (use 16, 24 or 32)", args.bits);
    }

    let profile = match &args.profile_file {
        Some(path) => load_profile(path)?,
        None => resolve_profile(&args.profile)?,
    };
    let mut rng = args
        .seed
        .map_or_else(EntropySource::new, EntropySource::seeded);

    if args.all {
        std::fs::create_dir_all(&args.output)?;
        for category in KeyCategory::ALL {
            let path = args.output.join(sample_file_name(category));
            render_one(&profile, category, &args, &mut rng, &path)?;
        }
        println!();
        println!(
            "Use as a sample bank by copying the directory to <samples>/{}/",
            profile.id
        );
    } else {
        render_one(&profile, args.key, &args, &mut rng, &args.output)?;
    }
    Ok(())
}

fn render_one(
    profile: &SwitchProfile,
    category: KeyCategory,
    args: &RenderArgs,
    rng: &mut dyn RandomSource,
    path: &Path,
) -> anyhow::Result<()> {
    let buffer = render(profile, category, args.pitch_variation, args.sample_rate, rng)?;
    write_buffer(path, &buffer, args.bits)?;
    println!("{}", summary(&buffer, path));
    Ok(())
}

fn summary(buffer: &RenderedBuffer, path: &Path) -> String {
    format!(
        "{} {:10} {:6} frames {:.3}s peak {:.3} -> {}",
        buffer.profile(),
        buffer.category(),
        buffer.frames(),
        buffer.duration_secs(),
        buffer.peak(),
        path.display()
    )
}
