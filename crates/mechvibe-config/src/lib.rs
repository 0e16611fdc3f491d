//! Configuration for the mechvibe keystroke sound engine.
//!
//! # Features
//!
//! - **Settings**: The playback settings an embedding application supplies
//! - **Engine**: Output device, sample bank and timing options
//! - **Config file**: Load and save both as TOML
//! - **Validation**: Range checks for every numeric option
//! - **Profile files**: Import and export hand-tuned switch profiles
//! - **Paths**: Platform-specific config, profile and sample directories
//!
//! # Example
//!
//! ```rust,no_run
//! use mechvibe_config::{Config, paths};
//!
//! let mut config = Config::load_or_default(paths::config_file_path()).unwrap();
//! config.settings.volume = 0.5;
//! config.validate().unwrap();
//! config.save(paths::config_file_path()).unwrap();
//! ```

mod config;
mod engine;
mod error;
mod profile_file;
mod settings;

/// Platform-specific paths for config, profiles and samples.
pub mod paths;

/// Range validation.
pub mod validation;

pub use config::Config;
pub use engine::EngineConfig;
pub use error::ConfigError;
pub use profile_file::{
    load_named_profile, load_profile, profile_from_toml, profile_to_toml, save_profile,
};
pub use settings::Settings;
pub use validation::{
    ValidationError, ValidationResult, validate_config, validate_engine, validate_settings,
};

pub use paths::{config_file_path, user_config_dir, user_profiles_dir, user_samples_dir};
