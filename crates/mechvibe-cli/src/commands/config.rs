//! Config file commands.

use std::path::Path;

use clap::{Args, Subcommand};
use mechvibe_config::{Config, Settings, user_profiles_dir};
use mechvibe_core::ProfileId;

use super::common::{config_path, load_config, samples_root};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config file with default settings
    Init {
        /// Start from this profile's recommended settings
        #[arg(short, long)]
        profile: Option<ProfileId>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config as TOML
    Show,

    /// Check the config file for out-of-range values
    Validate,

    /// Show config, profile and sample directories
    Paths,
}

pub fn run(args: ConfigArgs, explicit: Option<&Path>) -> anyhow::Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Init { profile, force } => init(explicit, profile, force),
        ConfigCommand::Show => {
            let config = load_config(explicit)?;
            println!("# {}", config_path(explicit).display());
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigCommand::Validate => {
            let path = config_path(explicit);
            load_config(explicit)?;
            println!("{}: ok", path.display());
            Ok(())
        }
        ConfigCommand::Paths => {
            let config = load_config(explicit)?;
            println!("Config:   {}", config_path(explicit).display());
            println!("Profiles: {}", user_profiles_dir().display());
            match samples_root(&config.engine) {
                Some(root) => println!("Samples:  {}", root.display()),
                None => println!("Samples:  (none, synthesis only)"),
            }
            Ok(())
        }
    }
}

fn init(explicit: Option<&Path>, profile: Option<ProfileId>, force: bool) -> anyhow::Result<()> {
    let path = config_path(explicit);
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let config = Config {
        settings: profile.map_or_else(Settings::default, Settings::recommended_for),
        ..Config::default()
    };
    config.save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
