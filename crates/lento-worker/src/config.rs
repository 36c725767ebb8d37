//! Worker thread configuration.

use crate::{Error, Result};

/// Configuration for the worker thread and its channels.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Command channel capacity in messages (default: 64)
    pub channel_capacity: usize,
    /// Emit per-message diagnostics at debug level (default: false)
    pub debug: bool,
    /// OS thread name (default: "lento-worker")
    pub thread_name: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            debug: false,
            thread_name: "lento-worker".into(),
        }
    }
}

impl WorkerConfig {
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(Error::InvalidConfig(
                "channel_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
