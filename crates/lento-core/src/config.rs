//! Stream configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Shape of the block pipeline, fixed for the lifetime of a stream.
///
/// Field names follow the worker wire format (`numberOfChannels`, `winSize`,
/// `batchSize`, `blockSize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    /// Number of audio channels
    #[serde(rename = "numberOfChannels")]
    pub channels: usize,
    /// Transform analysis window in samples
    #[serde(rename = "winSize")]
    pub window_size: usize,
    /// Blocks delivered per read
    pub batch_size: usize,
    /// Samples per channel per block
    pub block_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channels: 2,
            window_size: 4096,
            batch_size: 4,
            block_size: 4096,
        }
    }
}

impl StreamConfig {
    /// Ratio a freshly initialized transform stretches by.
    pub const DEFAULT_RATIO: f32 = 5.0;

    /// Smallest window the transform can split into two overlapping halves.
    pub const MIN_WINDOW_SIZE: usize = 4;

    pub fn new(channels: usize, window_size: usize, batch_size: usize, block_size: usize) -> Self {
        Self {
            channels,
            window_size,
            batch_size,
            block_size,
        }
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Samples per channel that one full batch holds.
    pub fn batch_samples(&self) -> usize {
        self.batch_size * self.block_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::InvalidConfig(
                "numberOfChannels must be at least 1".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batchSize must be at least 1".into()));
        }
        if self.block_size == 0 {
            return Err(Error::InvalidConfig("blockSize must be at least 1".into()));
        }
        if self.window_size < Self::MIN_WINDOW_SIZE || self.window_size % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "winSize {} must be even and at least {}",
                self.window_size,
                Self::MIN_WINDOW_SIZE
            )));
        }
        Ok(())
    }
}

/// Check a stretch ratio before it reaches a transform.
pub fn validate_ratio(ratio: f32) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRatio(ratio))
    }
}
