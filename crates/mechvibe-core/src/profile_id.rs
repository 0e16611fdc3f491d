//! Switch profile identifiers.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a switch profile.
///
/// The set is closed; the parameters behind each id are plain data owned by
/// the synth crate's profile registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    /// Smooth, quiet sine-based thock.
    Linear,
    /// Triangle body with a tactile bump.
    #[default]
    Tactile,
    /// Sawtooth body with a sharp click transient.
    Clicky,
    /// Layered mechanical strike with metal ring and paper rustle.
    Typewriter,
}

impl ProfileId {
    /// All shipped profiles.
    pub const ALL: [ProfileId; 4] = [
        ProfileId::Linear,
        ProfileId::Tactile,
        ProfileId::Clicky,
        ProfileId::Typewriter,
    ];

    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileId::Linear => "linear",
            ProfileId::Tactile => "tactile",
            ProfileId::Clicky => "clicky",
            ProfileId::Typewriter => "typewriter",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown profile name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProfileError(pub String);

impl fmt::Display for ParseProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown switch profile: {}", self.0)
    }
}

impl std::error::Error for ParseProfileError {}

impl FromStr for ProfileId {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ProfileId::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| ParseProfileError(s.to_string()))
    }
}
