//! Error types for synthesis.

use mechvibe_core::ProfileId;
use thiserror::Error;

/// Errors that can occur while rendering a keystroke sound.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// A render input was zero, negative or not finite.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Name of the offending input.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The registry has no profile with this id.
    #[error("profile not registered: {0}")]
    UnknownProfile(ProfileId),
}

impl SynthError {
    /// Create an invalid parameter error.
    pub fn invalid(name: &'static str, value: impl Into<f64>) -> Self {
        SynthError::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

/// Convenience result type for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = SynthError::invalid("sample_rate", 0u32);
        assert_eq!(err.to_string(), "invalid parameter 'sample_rate': 0");
    }

    #[test]
    fn unknown_profile_display() {
        let err = SynthError::UnknownProfile(ProfileId::Clicky);
        assert_eq!(err.to_string(), "profile not registered: clicky");
    }
}
