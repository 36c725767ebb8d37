//! Centralized error type for the lento umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Stream(#[from] lento_core::Error),

    #[cfg(feature = "worker")]
    #[error("Worker: {0}")]
    Worker(#[from] lento_worker::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
