//! Integration tests for mechvibe-config.
//!
//! Config files and profile files written to a temporary directory and read
//! back through the public API.

use mechvibe_config::{
    Config, ConfigError, Settings, load_profile, paths, save_profile, validate_settings,
};
use mechvibe_core::{KeyCategory, ProfileId};
use mechvibe_synth::{ProfileRegistry, SoundCache, profiles};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// 1. Config file
// ---------------------------------------------------------------------------

#[test]
fn config_save_creates_directories_and_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("mechvibe").join("config.toml");

    let mut config = Config::default();
    config.settings = Settings::recommended_for(ProfileId::Typewriter);
    config.engine.samples_dir = Some(dir.path().join("samples"));
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!loaded.settings.overlap);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_of_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    match Config::load(&path) {
        Err(ConfigError::ReadFile { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ReadFile, got {other:?}"),
    }
}

#[test]
fn hand_edited_config_is_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[settings]\nvolume = 1.4\npitch_variation = 2.0\n\n[engine]\nbuffer_size = 4\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let err = config.validate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("volume"), "got: {msg}");
    assert!(msg.contains("pitch_variation"), "got: {msg}");
    assert!(msg.contains("buffer_size"), "got: {msg}");
}

#[test]
fn recommended_settings_are_valid_for_every_profile() {
    for id in ProfileId::ALL {
        assert!(validate_settings(&Settings::recommended_for(id)).is_ok(), "{id}");
    }
}

// ---------------------------------------------------------------------------
// 2. Profile files
// ---------------------------------------------------------------------------

#[test]
fn saved_profile_is_found_and_renders() {
    let dir = TempDir::new().unwrap();
    let mut profile = profiles::builtin(ProfileId::Linear);
    profile.metadata.name = "Soft Linear".to_string();
    profile.adjustments.default.duration = 0.1;

    let path = dir.path().join("profiles").join("soft-linear.toml");
    save_profile(&profile, &path).unwrap();

    let found = paths::find_profile_in(&dir.path().join("profiles"), "soft-linear").unwrap();
    let loaded = load_profile(found).unwrap();
    assert_eq!(loaded, profile);

    let mut registry = ProfileRegistry::new();
    registry.register(loaded);
    let cache = SoundCache::with_registry(registry, 48000);
    let buf = cache.get(ProfileId::Linear, KeyCategory::Default).unwrap();
    assert_eq!(buf.frames(), 4800);
}

#[test]
fn listing_profiles_sees_saved_files() {
    let dir = TempDir::new().unwrap();
    for profile in profiles::all_builtin() {
        save_profile(&profile, dir.path().join(format!("{}.toml", profile.id))).unwrap();
    }
    let files = paths::list_profile_files(dir.path());
    assert_eq!(files.len(), 4);
    assert!(files[0].ends_with("clicky.toml"));
}
