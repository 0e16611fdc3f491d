//! The on-disk configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::validation::validate_config;

/// Complete configuration: playback settings plus engine options.
///
/// ```toml
/// [settings]
/// volume = 0.5
/// current_switch = "clicky"
///
/// [engine]
/// sample_rate = 44100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playback settings.
    pub settings: Settings,
    /// Audio engine options.
    pub engine: EngineConfig,
}

impl Config {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechvibe_core::ProfileId;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [settings]
            volume = 0.5
            current_switch = "clicky"

            [engine]
            sample_rate = 44100
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.volume, 0.5);
        assert_eq!(config.settings.current_switch, ProfileId::Clicky);
        assert_eq!(config.settings.pitch_variation, 0.1);
        assert_eq!(config.engine.sample_rate, 44100);
        assert_eq!(config.engine.throttle_ms, 10);
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let mut config = Config::default();
        config.settings.stereo_panning = true;
        config.engine.output_device = Some("1".to_string());

        let text = config.to_toml().unwrap();
        assert!(text.contains("[settings]"));
        assert!(text.contains("[engine]"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_switch_is_rejected() {
        let result = Config::from_toml("[settings]\ncurrent_switch = \"buckling\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_validate_reports_out_of_range() {
        let mut config = Config::default();
        config.settings.volume = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }
}
