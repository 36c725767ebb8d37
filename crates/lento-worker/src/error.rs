//! Error types.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Stream protocol error.
    #[error(transparent)]
    Stream(#[from] lento_core::Error),

    /// Invalid worker configuration.
    #[error("Invalid worker config: {0}")]
    InvalidConfig(String),

    /// Failed to spawn the worker thread.
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// Command channel full.
    #[error("Worker command channel full")]
    ChannelFull,

    /// Worker thread has exited.
    #[error("Worker thread not running")]
    Disconnected,

    /// Worker did not answer in time.
    #[error("Timed out waiting for worker")]
    Timeout,
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
