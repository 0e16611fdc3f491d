//! Audible self-test.

use std::path::Path;
use std::thread;
use std::time::Duration;

use clap::Args;
use mechvibe_config::Settings;
use mechvibe_core::ProfileId;

use super::common::{describe_outcome, load_config, start_engine};

#[derive(Args)]
pub struct DemoArgs {
    /// Switch profile to demo (defaults to the configured one)
    #[arg(short, long)]
    profile: Option<ProfileId>,

    /// Use the profile's recommended settings
    #[arg(long)]
    recommended: bool,

    /// Play every built-in profile in turn
    #[arg(long)]
    all: bool,
}

pub fn run(args: DemoArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(profile) = args.profile {
        config.settings.current_switch = profile;
    }

    let dispatcher = start_engine(&config)?;
    let timeout = config.engine.load_timeout() * 2;

    let profiles: Vec<ProfileId> = if args.all {
        ProfileId::ALL.to_vec()
    } else {
        vec![config.settings.current_switch]
    };

    for profile in profiles {
        let settings = if args.recommended {
            recommended(&config.settings, profile)
        } else {
            config.settings.clone().with_switch(profile)
        };
        dispatcher.apply_settings(settings);
        dispatcher.wait_for_switch(timeout);

        println!(
            "{} ({} audio)",
            dispatcher.active_profile(),
            dispatcher.audio_mode()
        );
        for outcome in dispatcher.play_test_sequence() {
            println!("  {}", describe_outcome(&outcome));
        }
        thread::sleep(Duration::from_millis(600));
    }

    Ok(())
}

fn recommended(base: &Settings, profile: ProfileId) -> Settings {
    Settings {
        enabled: base.enabled,
        stereo_panning: base.stereo_panning,
        ..Settings::recommended_for(profile)
    }
}
