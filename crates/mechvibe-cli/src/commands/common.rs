//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use mechvibe_config::paths::list_profile_files;
use mechvibe_config::{
    Config, EngineConfig, config_file_path, load_named_profile, load_profile, user_profiles_dir,
    user_samples_dir,
};
use mechvibe_core::ProfileId;
use mechvibe_io::{
    BackendStreamConfig, CpalBackend, DirectorySampleProvider, Dispatcher, OutputSink,
    PlayOutcome,
};
use mechvibe_synth::{SoundCache, SwitchProfile, profiles};

/// The config file in use: `--config` if given, else the user config file.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(config_file_path, Path::to_path_buf)
}

/// Load and validate the config, falling back to defaults when the file is absent.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = config_path(explicit);
    let config = Config::load_or_default(&path)?;
    config
        .validate()
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    Ok(config)
}

/// Load a profile by path, user profile name, or built-in name.
///
/// Searches in this order:
/// 1. File path or user profile file (by name)
/// 2. Built-in profiles (by name)
pub fn resolve_profile(name: &str) -> anyhow::Result<SwitchProfile> {
    if let Ok(profile) = load_named_profile(name) {
        return Ok(profile);
    }

    if let Ok(id) = name.parse::<ProfileId>() {
        return Ok(profiles::builtin(id));
    }

    anyhow::bail!(
        "Profile '{}' not found. Use 'mechvibe profiles list' to see available profiles.",
        name
    )
}

/// Register hand-tuned profiles from the user profiles directory.
///
/// Returns how many were registered. Broken files are skipped with a warning.
pub fn register_user_profiles(cache: &SoundCache) -> usize {
    let mut registered = 0;
    for path in list_profile_files(&user_profiles_dir()) {
        match load_profile(&path) {
            Ok(profile) => {
                tracing::info!(profile = %profile.id, path = %path.display(), "using user profile");
                cache.register_profile(profile);
                registered += 1;
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping user profile"),
        }
    }
    registered
}

/// Root of the recorded sample banks, if one is configured or present.
pub fn samples_root(engine: &EngineConfig) -> Option<PathBuf> {
    engine.samples_dir.clone().or_else(|| {
        let dir = user_samples_dir();
        dir.is_dir().then_some(dir)
    })
}

/// Open the default (or configured) output and build a dispatcher on it.
pub fn start_engine(config: &Config) -> anyhow::Result<Dispatcher> {
    let backend = CpalBackend::new();
    let sink = OutputSink::start(&backend, &BackendStreamConfig::from(&config.engine))
        .context("failed to open audio output")?;

    let cache = SoundCache::new(sink.sample_rate());
    register_user_profiles(&cache);

    let mut dispatcher = Dispatcher::new(
        Arc::new(sink),
        Arc::new(cache),
        config.settings.clone(),
        &config.engine,
    );
    match samples_root(&config.engine) {
        Some(root) => {
            tracing::info!(root = %root.display(), "looking for recorded samples");
            dispatcher =
                dispatcher.with_sample_provider(Arc::new(DirectorySampleProvider::new(root)));
            dispatcher.reload();
        }
        None => {
            dispatcher.cache().prewarm(config.settings.current_switch);
        }
    }
    Ok(dispatcher)
}

/// One-line description of a play outcome.
pub fn describe_outcome(outcome: &PlayOutcome) -> String {
    match outcome {
        PlayOutcome::Scheduled(info) => {
            let mut line = format!(
                "{} {} ({:?}) gain {:.2} rate {:.3}",
                info.profile, info.category, info.origin, info.gain, info.rate
            );
            if let Some(pan) = info.pan {
                line.push_str(&format!(" pan {pan:+.1}"));
            }
            line
        }
        PlayOutcome::Throttled => "throttled".to_string(),
        PlayOutcome::Disabled => "disabled in settings".to_string(),
        PlayOutcome::OutputUnavailable(state) => format!("output {state}"),
        PlayOutcome::Silent => "silent".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_profile() {
        let profile = resolve_profile("clicky").unwrap();
        assert_eq!(profile.id, ProfileId::Clicky);
    }

    #[test]
    fn test_resolve_unknown_profile_fails() {
        let err = resolve_profile("no-such-switch").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_resolve_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuned.toml");
        let mut tuned = profiles::builtin(ProfileId::Linear);
        tuned.metadata.name = "Tuned".to_string();
        mechvibe_config::save_profile(&tuned, &path).unwrap();

        let loaded = resolve_profile(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.metadata.name, "Tuned");
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let explicit = Path::new("/tmp/mechvibe-test.toml");
        assert_eq!(config_path(Some(explicit)), explicit);
        assert_eq!(config_path(None), config_file_path());
    }

    #[test]
    fn test_load_config_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(describe_outcome(&PlayOutcome::Throttled), "throttled");
        assert_eq!(
            describe_outcome(&PlayOutcome::OutputUnavailable(
                mechvibe_io::SinkState::Suspended
            )),
            "output suspended"
        );
    }
}
