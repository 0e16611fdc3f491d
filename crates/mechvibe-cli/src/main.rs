//! Mechvibe CLI - Render, inspect and play mechanical keyboard sounds.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mechvibe")]
#[command(author, version, about = "Procedural mechanical keyboard sounds", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render keystroke sounds to WAV files
    Render(commands::render::RenderArgs),

    /// Show how a key is classified and panned
    Classify(commands::classify::ClassifyArgs),

    /// List and inspect switch profiles
    Profiles(commands::profiles::ProfilesArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Play the A, S, D, Space, Enter test sequence
    Demo(commands::demo::DemoArgs),

    /// Type text and hear every keystroke
    Type(commands::typing::TypeArgs),

    /// Create and inspect the config file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Profiles(args) => commands::profiles::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Demo(args) => commands::demo::run(args, config),
        Commands::Type(args) => commands::typing::run(args, config),
        Commands::Config(args) => commands::config::run(args, config),
    }
}
