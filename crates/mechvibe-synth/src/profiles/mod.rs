//! The four built-in switch profiles.
//!
//! Each profile is a constructor returning plain [`SwitchProfile`] data; the
//! numbers are tuned by ear and kept exactly as tuned.

use mechvibe_core::ProfileId;

use crate::profile::SwitchProfile;

pub mod clicky;
pub mod linear;
pub mod tactile;
pub mod typewriter;

/// Build the built-in profile for `id`.
pub fn builtin(id: ProfileId) -> SwitchProfile {
    match id {
        ProfileId::Linear => linear::profile(),
        ProfileId::Tactile => tactile::profile(),
        ProfileId::Clicky => clicky::profile(),
        ProfileId::Typewriter => typewriter::profile(),
    }
}

/// All built-in profiles, in [`ProfileId::ALL`] order.
pub fn all_builtin() -> Vec<SwitchProfile> {
    ProfileId::ALL.into_iter().map(builtin).collect()
}
