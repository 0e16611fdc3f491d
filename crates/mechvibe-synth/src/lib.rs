//! Mechvibe Synth - Procedural keystroke synthesis
//!
//! This crate turns switch profiles into short stereo sounds and keeps them
//! cached for low-latency playback.
//!
//! # Core Components
//!
//! ## Profiles
//!
//! - [`SwitchProfile`] - Plain-data description of a switch personality
//! - [`profiles`] - The built-in linear, tactile, clicky and typewriter profiles
//! - [`ProfileRegistry`] - Lookup by [`ProfileId`], with replaceable entries
//!
//! ## Rendering
//!
//! - [`render`] / [`render_with`] - One shared synthesis function for every profile
//! - [`emergency_tone`] - Minimal last-resort tone
//! - [`RenderedBuffer`] - Immutable stereo result
//!
//! ```rust
//! use mechvibe_core::{KeyCategory, ProfileId, Xorshift32};
//! use mechvibe_synth::{profiles, render};
//!
//! let clicky = profiles::builtin(ProfileId::Clicky);
//! let mut rng = Xorshift32::new(7);
//! let buffer = render(&clicky, KeyCategory::Enter, 0.2, 48000, &mut rng).unwrap();
//!
//! assert_eq!(buffer.frames(), 19200);
//! assert!(buffer.is_finite());
//! ```
//!
//! ## Caching
//!
//! - [`SoundCache`] - Single-flight memoization keyed by (profile, category)
//!
//! ```rust
//! use std::sync::Arc;
//! use mechvibe_core::{KeyCategory, ProfileId};
//! use mechvibe_synth::SoundCache;
//!
//! let cache = SoundCache::new(44100);
//! let a = cache.get(ProfileId::Tactile, KeyCategory::Spacebar).unwrap();
//! let b = cache.get(ProfileId::Tactile, KeyCategory::Spacebar).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

pub mod buffer;
pub mod cache;
pub mod error;
pub mod profile;
pub mod profiles;
pub mod registry;
pub mod render;

pub use buffer::{BufferOrigin, RenderedBuffer};
pub use cache::{CacheStats, RngFactory, SoundCache};
pub use error::{Result, SynthError};
pub use profile::{
    BaseConfig, Blend, Body, ChannelDelay, ChannelGains, KeyAdjustment, KeyAdjustments,
    KeyOverride, MechanicalBody, MechanicalMix, NoiseBlend, PaperRustle, ProfileMetadata,
    RecommendedSettings, StereoImage, SwitchProfile, Transient, TransientKind,
};
pub use registry::{ProfileDescriptor, ProfileRegistry};
pub use render::{
    RenderOptions, emergency_tone, emergency_tone_params, frame_count, render, render_with,
};

pub use mechvibe_core::{KeyCategory, ProfileId};
