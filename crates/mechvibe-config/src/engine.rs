//! Engine configuration: audio device, sample bank and timing.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_sample_rate() -> u32 {
    48000
}

fn default_buffer_size() -> u32 {
    512
}

fn default_throttle_ms() -> u64 {
    10
}

fn default_load_timeout_ms() -> u64 {
    1500
}

/// Settings for the audio engine that the user rarely touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Preferred output buffer size in frames.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: u32,
    /// Output device name or index; system default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_device: Option<String>,
    /// Root of the recorded sample bank (`<root>/<profile>/<category>.wav`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_dir: Option<PathBuf>,
    /// Minimum interval between two sounds of the same key category.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// How long a sample bank may take to load before synthesis takes over.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            buffer_size: default_buffer_size(),
            output_device: None,
            samples_dir: None,
            throttle_ms: default_throttle_ms(),
            load_timeout_ms: default_load_timeout_ms(),
        }
    }
}

impl EngineConfig {
    /// Anti-spam interval as a [`Duration`].
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Sample bank load timeout as a [`Duration`].
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}
