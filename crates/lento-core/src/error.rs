//! Error types for lento-core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for pipeline operations.
///
/// Running short of buffered output is not an error: reads report it through
/// [`ReadOutcome::Pending`](crate::ReadOutcome::Pending).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid stretch ratio: {0}. Must be positive and finite")]
    InvalidRatio(f32),

    #[error("Channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    RaggedWrite {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Stream not initialized")]
    NotInitialized,

    #[error("Stream already initialized")]
    AlreadyInitialized,
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
