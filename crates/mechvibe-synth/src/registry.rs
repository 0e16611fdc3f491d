//! Profile registry.
//!
//! Holds one [`SwitchProfile`] per [`ProfileId`]. The registry starts with
//! the built-in profiles; [`ProfileRegistry::register`] replaces a profile's
//! data (for example with a hand-tuned copy loaded from TOML) without any
//! change to the synthesizer.

use mechvibe_core::ProfileId;

use crate::profile::SwitchProfile;
use crate::profiles;

/// Summary of a registered profile for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDescriptor {
    /// Profile identifier.
    pub id: ProfileId,
    /// Display name.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// Number of categories with their own adjustment.
    pub key_overrides: usize,
}

/// Registry of switch profiles, looked up by id.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<SwitchProfile>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileRegistry {
    /// Create a registry with all built-in profiles registered.
    pub fn new() -> Self {
        Self {
            profiles: profiles::all_builtin(),
        }
    }

    /// Create a registry with no profiles.
    pub fn empty() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// Register a profile, replacing any existing one with the same id.
    pub fn register(&mut self, profile: SwitchProfile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Get a profile by id.
    pub fn get(&self, id: ProfileId) -> Option<&SwitchProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// All registered profiles.
    pub fn all(&self) -> &[SwitchProfile] {
        &self.profiles
    }

    /// Descriptors for all registered profiles.
    pub fn descriptors(&self) -> Vec<ProfileDescriptor> {
        self.profiles
            .iter()
            .map(|p| ProfileDescriptor {
                id: p.id,
                name: p.metadata.name.clone(),
                description: p.metadata.description.clone(),
                key_overrides: p.adjustments.keys.len(),
            })
            .collect()
    }

    /// Returns the number of registered profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no profiles are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
