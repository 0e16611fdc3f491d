//! Import and export of switch profiles as TOML.
//!
//! A profile file is a serialized [`SwitchProfile`]. Its `id` decides which
//! built-in slot it replaces once registered.

use std::path::Path;

use mechvibe_synth::SwitchProfile;

use crate::error::ConfigError;
use crate::paths::find_profile_file;

/// Parse a profile from TOML text.
pub fn profile_from_toml(toml_str: &str) -> Result<SwitchProfile, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

/// Serialize a profile to TOML text.
pub fn profile_to_toml(profile: &SwitchProfile) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(profile)?)
}

/// Load a profile file.
pub fn load_profile(path: impl AsRef<Path>) -> Result<SwitchProfile, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    profile_from_toml(&content)
}

/// Load a profile by path or by name from the user profiles directory.
pub fn load_named_profile(name: &str) -> Result<SwitchProfile, ConfigError> {
    let path =
        find_profile_file(name).ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
    load_profile(path)
}

/// Write a profile file, creating its directory if needed.
pub fn save_profile(profile: &SwitchProfile, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }

    let content = profile_to_toml(profile)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
    Ok(())
}
