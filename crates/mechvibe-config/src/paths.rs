//! Platform-specific paths for the config file, profiles and samples.
//!
//! # Directory Structure
//!
//! - **Config file**: `~/.config/mechvibe/config.toml` (Linux), `~/Library/Application Support/mechvibe/config.toml` (macOS), `%APPDATA%\mechvibe\config.toml` (Windows)
//! - **Hand-tuned profiles**: `<config dir>/profiles/*.toml`
//! - **Recorded samples**: `<config dir>/samples/<profile>/<category>.wav`
//!
//! # Example
//!
//! ```rust,no_run
//! use mechvibe_config::paths;
//!
//! println!("Config file: {:?}", paths::config_file_path());
//!
//! if let Some(path) = paths::find_profile_file("soft-tactile") {
//!     println!("Found profile at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "mechvibe";

const CONFIG_FILE: &str = "config.toml";
const PROFILES_SUBDIR: &str = "profiles";
const SAMPLES_SUBDIR: &str = "samples";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the default config file.
pub fn config_file_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Directory holding hand-tuned profile files.
pub fn user_profiles_dir() -> PathBuf {
    user_config_dir().join(PROFILES_SUBDIR)
}

/// Default root of the recorded sample bank.
pub fn user_samples_dir() -> PathBuf {
    user_config_dir().join(SAMPLES_SUBDIR)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Find a profile file by path or name.
///
/// `name` may be a path to an existing file, or a name (with or without
/// `.toml`) looked up in [`user_profiles_dir`].
pub fn find_profile_file(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }
    find_profile_in(&user_profiles_dir(), name)
}

/// Look up `name` (with or without `.toml`) inside `dir`.
pub fn find_profile_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// List the `.toml` files in `dir`, sorted by name.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_profile_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}
