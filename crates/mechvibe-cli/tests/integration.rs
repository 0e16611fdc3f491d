//! Integration tests for mechvibe-cli.
//!
//! Tests cover the commands that need no audio hardware: classify, profile
//! listing and export, WAV rendering and the config file workflow.

use std::process::Command;

use mechvibe_config::{Config, load_profile, profile_from_toml};
use mechvibe_core::{KeyCategory, ProfileId};
use mechvibe_io::read_wav_stereo;

/// Helper to get the path to the `mechvibe` binary built by cargo.
fn mechvibe_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mechvibe"))
}

fn stdout_of(args: &[&str]) -> String {
    let output = mechvibe_bin()
        .args(args)
        .output()
        .expect("failed to run mechvibe");
    assert!(
        output.status.success(),
        "mechvibe {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// classify / profiles
// ---------------------------------------------------------------------------

#[test]
fn cli_classify_spacebar() {
    let stdout = stdout_of(&["classify", " ", "--code", "Space"]);
    assert!(stdout.contains("Category: spacebar"), "{stdout}");
    assert!(stdout.contains("Gain:     1.2"), "{stdout}");
}

#[test]
fn cli_classify_left_shift_pans_left() {
    let stdout = stdout_of(&["classify", "Shift", "--code", "ShiftLeft"]);
    assert!(stdout.contains("Category: shift"));
    assert!(stdout.contains("Pan:      -0.3"), "{stdout}");
}

#[test]
fn cli_profiles_lists_builtins() {
    let stdout = stdout_of(&["profiles", "list"]);
    for id in ProfileId::ALL {
        assert!(stdout.contains(id.as_str()), "listing should contain '{id}'");
    }
}

#[test]
fn cli_profiles_show_toml_parses_back() {
    let stdout = stdout_of(&["profiles", "show", "typewriter", "--toml"]);
    let profile = profile_from_toml(&stdout).unwrap();
    assert_eq!(profile.id, ProfileId::Typewriter);
}

#[test]
fn cli_profiles_show_json() {
    let stdout = stdout_of(&["profiles", "show", "linear", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["id"], "linear");
    assert!(value["metadata"]["name"].is_string());
}

#[test]
fn cli_profiles_show_lists_every_category() {
    let stdout = stdout_of(&["profiles", "show", "clicky"]);
    assert!(stdout.contains("Recommended Settings"));
    for category in KeyCategory::ALL {
        assert!(stdout.contains(category.as_str()), "missing {category}");
    }
}

#[test]
fn cli_profiles_export_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linear.toml");
    let path_str = path.to_str().unwrap();

    stdout_of(&["profiles", "export", "linear", "--output", path_str]);
    assert_eq!(load_profile(&path).unwrap().id, ProfileId::Linear);

    let again = mechvibe_bin()
        .args(["profiles", "export", "linear", "--output", path_str])
        .output()
        .unwrap();
    assert!(!again.status.success());
    stdout_of(&["profiles", "export", "linear", "--output", path_str, "--force"]);
}

#[test]
fn cli_unknown_profile_fails() {
    let output = mechvibe_bin()
        .args(["profiles", "show", "buckling-spring"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn cli_render_writes_expected_frames() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("space.wav");

    stdout_of(&[
        "render",
        out.to_str().unwrap(),
        "--profile",
        "linear",
        "--key",
        "spacebar",
        "--sample-rate",
        "44100",
        "--seed",
        "7",
    ]);

    let (samples, spec) = read_wav_stereo(&out).unwrap();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.channels, 2);
    assert_eq!(samples.len(), 17640);
    assert!(samples.left.iter().any(|s| s.abs() > 0.0));
}

#[test]
fn cli_render_seed_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let render_seeded = |name: &str, seed: &str| {
        let out = dir.path().join(name);
        stdout_of(&[
            "render",
            out.to_str().unwrap(),
            "--profile",
            "tactile",
            "--pitch-variation",
            "0.2",
            "--seed",
            seed,
        ]);
        read_wav_stereo(&out).unwrap().0
    };

    let a = render_seeded("a.wav", "12345678901");
    let b = render_seeded("b.wav", "12345678901");
    let c = render_seeded("c.wav", "2");
    assert_eq!(a.left, b.left);
    assert_eq!(a.right, b.right);
    assert_ne!(a.left, c.left);
}

#[test]
fn cli_render_all_writes_a_sample_bank() {
    let dir = tempfile::tempdir().unwrap();
    let bank = dir.path().join("clicky");

    stdout_of(&[
        "render",
        bank.to_str().unwrap(),
        "--profile",
        "clicky",
        "--all",
        "--bits",
        "16",
        "--seed",
        "1",
    ]);

    for name in ["key.wav", "spacebar.wav", "enter.wav", "fkey.wav"] {
        let (_, spec) = read_wav_stereo(bank.join(name)).unwrap();
        assert_eq!(spec.bits_per_sample, 16, "{name}");
    }
}

#[test]
fn cli_render_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let profile_path = dir.path().join("short.toml");
    let out = dir.path().join("short.wav");

    stdout_of(&[
        "profiles",
        "export",
        "tactile",
        "--output",
        profile_path.to_str().unwrap(),
    ]);
    let mut tuned = load_profile(&profile_path).unwrap();
    tuned.adjustments.default.duration = 0.05;
    mechvibe_config::save_profile(&tuned, &profile_path).unwrap();

    stdout_of(&[
        "render",
        out.to_str().unwrap(),
        "--profile-file",
        profile_path.to_str().unwrap(),
    ]);
    let (samples, _) = read_wav_stereo(&out).unwrap();
    assert_eq!(samples.len(), 2400);
}

#[test]
fn cli_render_rejects_odd_bit_depth() {
    let dir = tempfile::tempdir().unwrap();
    let output = mechvibe_bin()
        .args(["render", dir.path().join("x.wav").to_str().unwrap(), "--bits", "12"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn cli_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let path_str = path.to_str().unwrap();

    stdout_of(&["--config", path_str, "config", "init", "--profile", "typewriter"]);
    let written = Config::load(&path).unwrap();
    assert_eq!(written.settings.current_switch, ProfileId::Typewriter);
    assert!(!written.settings.overlap);

    let shown = stdout_of(&["--config", path_str, "config", "show"]);
    assert!(shown.contains("current_switch = \"typewriter\""), "{shown}");

    let again = mechvibe_bin()
        .args(["--config", path_str, "config", "init"])
        .output()
        .unwrap();
    assert!(!again.status.success());
}

#[test]
fn cli_config_validate_reports_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[settings]\nvolume = 3.0\n").unwrap();

    let output = mechvibe_bin()
        .args(["--config", path.to_str().unwrap(), "config", "validate"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("volume"));
}
