//! Recorded sample banks.
//!
//! A bank holds one decoded recording per key category for a profile. The
//! default category's file is named `key.wav`; every other category uses its
//! own name (`spacebar.wav`, `enter.wav`, ...). A bank is usable once its
//! `key.wav` decodes; categories without a file fall back to it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mechvibe_core::{KeyCategory, ProfileId};
use mechvibe_synth::{BufferOrigin, RenderedBuffer};

use crate::wav::decode_wav_stereo;

/// Why a recorded sample could not be used.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The provider has no recording for this key.
    #[error("no sample for {profile}/{category}")]
    NotFound {
        /// Requested profile.
        profile: ProfileId,
        /// Requested category.
        category: KeyCategory,
    },

    /// Reading the recording failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a usable WAV file.
    #[error("failed to decode {profile}/{category}: {reason}")]
    Decode {
        /// Requested profile.
        profile: ProfileId,
        /// Requested category.
        category: KeyCategory,
        /// Decoder message.
        reason: String,
    },
}

/// Source of recorded keystroke audio.
///
/// Called from a background loader thread, never from the keystroke path.
pub trait SampleProvider: Send + Sync {
    /// Encoded audio for `(profile, category)`.
    fn fetch(&self, profile: ProfileId, category: KeyCategory) -> Result<Vec<u8>, LoadError>;
}

/// File name of the recording for `category`.
pub fn sample_file_name(category: KeyCategory) -> String {
    match category {
        KeyCategory::Default => "key.wav".to_string(),
        other => format!("{other}.wav"),
    }
}

/// Reads `<root>/<profile>/<category>.wav`.
#[derive(Debug, Clone)]
pub struct DirectorySampleProvider {
    root: PathBuf,
}

impl DirectorySampleProvider {
    /// Provider over a sample root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The sample root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the recording for `(profile, category)` lives.
    pub fn path_for(&self, profile: ProfileId, category: KeyCategory) -> PathBuf {
        self.root
            .join(profile.as_str())
            .join(sample_file_name(category))
    }
}

impl SampleProvider for DirectorySampleProvider {
    fn fetch(&self, profile: ProfileId, category: KeyCategory) -> Result<Vec<u8>, LoadError> {
        let path = self.path_for(profile, category);
        std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound { profile, category }
            } else {
                LoadError::Io { path, source }
            }
        })
    }
}

/// Decoded recordings for one profile.
#[derive(Debug, Clone)]
pub struct SampleBank {
    profile: ProfileId,
    buffers: HashMap<KeyCategory, Arc<RenderedBuffer>>,
}

impl SampleBank {
    /// Fetch and decode every category `provider` has for `profile`.
    ///
    /// Missing or broken categories are skipped. Fails only when the default
    /// `key.wav` recording is unusable.
    pub fn load(provider: &dyn SampleProvider, profile: ProfileId) -> Result<Self, LoadError> {
        let mut buffers = HashMap::new();
        let mut default_error = None;

        for category in KeyCategory::ALL {
            let decoded = provider
                .fetch(profile, category)
                .and_then(|bytes| Self::decode(profile, category, &bytes));
            match decoded {
                Ok(buffer) => {
                    buffers.insert(category, Arc::new(buffer));
                }
                Err(e) => {
                    if matches!(e, LoadError::NotFound { .. }) {
                        tracing::debug!(profile = %profile, category = %category, "no recorded sample");
                    } else {
                        tracing::warn!(profile = %profile, category = %category, error = %e, "recorded sample unusable");
                    }
                    if category == KeyCategory::Default {
                        default_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = default_error {
            return Err(e);
        }
        tracing::debug!(profile = %profile, categories = buffers.len(), "sample bank loaded");
        Ok(Self { profile, buffers })
    }

    /// Decode one recording into a buffer tagged with its key.
    pub fn decode(
        profile: ProfileId,
        category: KeyCategory,
        bytes: &[u8],
    ) -> Result<RenderedBuffer, LoadError> {
        let decode_error = |reason: String| LoadError::Decode {
            profile,
            category,
            reason,
        };
        let (samples, spec) = decode_wav_stereo(bytes).map_err(|e| decode_error(e.to_string()))?;
        if samples.is_empty() || spec.sample_rate == 0 {
            return Err(decode_error("empty recording".to_string()));
        }
        Ok(RenderedBuffer::from_channels(
            profile,
            category,
            spec.sample_rate,
            samples.left,
            samples.right,
            BufferOrigin::Sample,
        ))
    }

    /// Profile the recordings belong to.
    pub fn profile(&self) -> ProfileId {
        self.profile
    }

    /// Recording for exactly `category`.
    pub fn get(&self, category: KeyCategory) -> Option<Arc<RenderedBuffer>> {
        self.buffers.get(&category).cloned()
    }

    /// Recording for `category`, or the bank's `key.wav`.
    pub fn resolve(&self, category: KeyCategory) -> Option<Arc<RenderedBuffer>> {
        self.get(category)
            .or_else(|| self.get(KeyCategory::Default))
    }

    /// Number of decoded categories.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if nothing decoded.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
