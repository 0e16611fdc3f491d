//! Mechvibe Core - primitives for procedural keystroke sounds
//!
//! This crate holds the pieces every other mechvibe crate builds on. All of
//! them are pure functions of their explicit inputs: no global state, no
//! allocation in the per-sample path.
//!
//! # Key Classification
//!
//! - [`KeyCategory`] - The closed set of key categories a profile can shape
//! - [`classify`] - Maps a raw key label/code pair to a [`KeyCategory`]
//! - [`key_position_pan`] - Coarse left/right position of a key on the board
//!
//! # Profiles
//!
//! - [`ProfileId`] - Identifier of a switch profile (linear, tactile, clicky, typewriter)
//!
//! # Signal Library
//!
//! - [`Waveform`] with [`sine`], [`triangle`], [`square`], [`sawtooth`]
//! - [`Adsr`] / [`EnvelopeShape`] and the [`envelope`] function
//! - Transient shapes: [`bump_envelope`], [`click_envelope`], [`exp_decay`]
//! - [`lowpass_decay`] - One-pole low-pass tail simulation
//! - [`RandomSource`] - Injected randomness for noise and pitch jitter
//!
//! # Example
//!
//! ```rust
//! use mechvibe_core::{Adsr, EnvelopeShape, KeyCategory, classify, envelope, sine};
//!
//! assert_eq!(classify(" ", "Space"), KeyCategory::Spacebar);
//!
//! let adsr = Adsr::new(0.001, 0.1, 0.3, 0.2);
//! let t = 0.05;
//! let sample = sine(120.0, t) * envelope(t, &adsr, 0.3, EnvelopeShape::Linear);
//! assert!(sample.is_finite());
//! ```

pub mod envelope;
pub mod filter;
pub mod key;
pub mod profile_id;
pub mod random;
pub mod waveform;

pub use envelope::{
    Adsr, EnvelopeShape, bump_envelope, click_envelope, envelope, exp_decay,
};
pub use filter::lowpass_decay;
pub use key::{KeyCategory, ParseCategoryError, classify, key_position_pan};
pub use profile_id::{ParseProfileError, ProfileId};
pub use random::{EntropySource, RandomSource, Silence, Xorshift32};
pub use waveform::{Waveform, sawtooth, sine, square, triangle};
