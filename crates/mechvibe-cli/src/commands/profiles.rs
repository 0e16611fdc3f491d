//! Switch profile commands.
//!
//! Provides commands to list, show and export switch profiles.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use mechvibe_config::paths::list_profile_files;
use mechvibe_config::{load_profile, profile_to_toml, save_profile, user_profiles_dir};
use mechvibe_core::KeyCategory;
use mechvibe_synth::{Body, ProfileRegistry};

use super::common::resolve_profile;

#[derive(Args)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    command: Option<ProfilesCommand>,
}

#[derive(Subcommand)]
enum ProfilesCommand {
    /// List built-in and user profiles
    List,

    /// Show details of a profile
    Show {
        /// Profile name or path
        name: String,

        /// Print the profile as TOML
        #[arg(long, conflicts_with = "json")]
        toml: bool,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a profile to a TOML file for hand tuning
    Export {
        /// Profile name or path
        name: String,

        /// Output file (defaults to <user profiles>/<name>.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ProfilesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(ProfilesCommand::List) {
        ProfilesCommand::List => list_profiles(),
        ProfilesCommand::Show { name, toml, json } => {
            let format = if json {
                Format::Json
            } else if toml {
                Format::Toml
            } else {
                Format::Text
            };
            show_profile(&name, format)
        }
        ProfilesCommand::Export {
            name,
            output,
            force,
        } => export_profile(&name, output, force),
    }
}

fn list_profiles() -> anyhow::Result<()> {
    println!("Built-in Profiles:");
    println!("==================");
    for descriptor in ProfileRegistry::new().descriptors() {
        println!(
            "  {:12} {:20} - {}",
            descriptor.id, descriptor.name, descriptor.description
        );
    }
    println!();

    println!("User Profiles ({}):", user_profiles_dir().display());
    println!("==============");
    let files = list_profile_files(&user_profiles_dir());
    if files.is_empty() {
        println!("  (none)");
        println!();
        println!("  Create one with: mechvibe profiles export <name>");
    }
    for path in files {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        match load_profile(&path) {
            Ok(profile) => println!(
                "  {:12} {:20} - replaces {}",
                name, profile.metadata.name, profile.id
            ),
            Err(_) => println!("  {:12} (error loading)", name),
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum Format {
    Text,
    Toml,
    Json,
}

fn show_profile(name: &str, format: Format) -> anyhow::Result<()> {
    let profile = resolve_profile(name)?;
    match format {
        Format::Toml => {
            print!("{}", profile_to_toml(&profile)?);
            return Ok(());
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            return Ok(());
        }
        Format::Text => {}
    }

    let meta = &profile.metadata;
    println!("Profile: {} ({})", meta.name, profile.id);
    println!("{}", "=".repeat(12 + meta.name.len() + profile.id.as_str().len()));
    println!();
    println!("{}", meta.description);
    println!("{}", meta.long_description);
    println!();

    let base = &profile.base;
    println!("Sound:");
    println!("  Body:       {}", describe_body(&base.body));
    println!("  Frequency:  {:.0} Hz", base.base_frequency_hz);
    println!(
        "  Envelope:   A {:.3}s  D {:.3}s  S {:.2}  R {:.3}s",
        base.envelope.attack, base.envelope.decay, base.envelope.sustain, base.envelope.release
    );
    println!("  Noise:      {:.2}", base.noise_amount);
    println!("  Filter:     {:.0} Hz", base.filter_cutoff_hz);
    println!();

    let rec = &profile.recommended;
    println!("Recommended Settings:");
    println!(
        "  volume {:.2}  pitch {:.2}  pitch variation {:.2}  overlap {}",
        rec.volume, rec.pitch, rec.pitch_variation, rec.overlap
    );
    println!();

    println!("Keys:");
    println!(
        "  {:10} {:>6} {:>6} {:>8}  Character",
        "Category", "Volume", "Freq", "Duration"
    );
    for category in KeyCategory::ALL {
        let adj = profile.adjustment(category);
        println!(
            "  {:10} {:>6.2} {:>6.2} {:>7.3}s  {}",
            category.as_str(),
            adj.volume,
            adj.frequency_multiplier,
            adj.duration,
            adj.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

fn export_profile(name: &str, output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let profile = resolve_profile(name)?;
    let path = output.unwrap_or_else(|| user_profiles_dir().join(format!("{}.toml", profile.id)));
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }
    save_profile(&profile, &path)?;
    println!("Exported '{}' to {}", profile.id, path.display());
    Ok(())
}

fn describe_body(body: &Body) -> String {
    match body {
        Body::Tonal { waveform } => format!("tonal ({waveform:?})"),
        Body::Mechanical(m) => format!("mechanical (thud {:.0} Hz)", m.thud_hz),
    }
}
