//! Range validation for settings and engine configuration.
//!
//! # Example
//!
//! ```rust
//! use mechvibe_config::{Settings, ValidationError, validate_settings};
//!
//! assert!(validate_settings(&Settings::default()).is_ok());
//!
//! let loud = Settings::default().with_volume(1.5);
//! assert!(matches!(
//!     validate_settings(&loud),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use thiserror::Error;

use crate::config::Config;
use crate::engine::EngineConfig;
use crate::settings::Settings;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Volume range.
pub const VOLUME_RANGE: (f32, f32) = (0.0, 1.0);
/// Playback-rate range.
pub const PITCH_RANGE: (f32, f32) = (0.25, 4.0);
/// Pitch jitter range.
pub const PITCH_VARIATION_RANGE: (f32, f32) = (0.0, 1.0);
/// Sample rate range in Hz.
pub const SAMPLE_RATE_RANGE: (f32, f32) = (8000.0, 192_000.0);
/// Buffer size range in frames.
pub const BUFFER_SIZE_RANGE: (f32, f32) = (16.0, 8192.0);
/// Throttle interval range in milliseconds.
pub const THROTTLE_MS_RANGE: (f32, f32) = (0.0, 1000.0);
/// Sample bank timeout range in milliseconds.
pub const LOAD_TIMEOUT_MS_RANGE: (f32, f32) = (1.0, 60_000.0);

fn check(errors: &mut Vec<ValidationError>, param: &str, value: f32, (min, max): (f32, f32)) {
    if !(min..=max).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        });
    }
}

fn finish(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn collect_settings(errors: &mut Vec<ValidationError>, settings: &Settings) {
    check(errors, "volume", settings.volume, VOLUME_RANGE);
    check(errors, "pitch", settings.pitch, PITCH_RANGE);
    check(
        errors,
        "pitch_variation",
        settings.pitch_variation,
        PITCH_VARIATION_RANGE,
    );
}

fn collect_engine(errors: &mut Vec<ValidationError>, engine: &EngineConfig) {
    check(
        errors,
        "sample_rate",
        engine.sample_rate as f32,
        SAMPLE_RATE_RANGE,
    );
    check(
        errors,
        "buffer_size",
        engine.buffer_size as f32,
        BUFFER_SIZE_RANGE,
    );
    check(
        errors,
        "throttle_ms",
        engine.throttle_ms as f32,
        THROTTLE_MS_RANGE,
    );
    check(
        errors,
        "load_timeout_ms",
        engine.load_timeout_ms as f32,
        LOAD_TIMEOUT_MS_RANGE,
    );
}

/// Validate playback settings.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    let mut errors = Vec::new();
    collect_settings(&mut errors, settings);
    finish(errors)
}

/// Validate engine configuration.
pub fn validate_engine(engine: &EngineConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    collect_engine(&mut errors, engine);
    finish(errors)
}

/// Validate a whole configuration, reporting every problem at once.
pub fn validate_config(config: &Config) -> ValidationResult<()> {
    let mut errors = Vec::new();
    collect_settings(&mut errors, &config.settings);
    collect_engine(&mut errors, &config.engine);
    finish(errors)
}
