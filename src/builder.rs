//! Builder for a PaulStretch stream, in-process or on a worker thread.

use crate::core::{validate_ratio, StreamConfig, StreamCoordinator};
use crate::stretch::PaulStretch;
use crate::Result;

#[cfg(feature = "worker")]
use crate::worker::{StretchWorker, WorkerConfig};

/// Collects stream geometry, ratio, and seed, then builds either a
/// [`StreamCoordinator`] driven by the caller or a [`StretchWorker`] that is
/// already initialized.
///
/// # Example
///
/// ```
/// use lento::prelude::*;
///
/// let mut stream = StretchBuilder::new()
///     .channels(1)
///     .window_size(512)
///     .batch_size(2)
///     .block_size(256)
///     .ratio(8.0)
///     .seed(42)
///     .build()?;
///
/// stream.submit_write(&[vec![0.0; 2048]])?;
/// assert!(stream.request_read().is_batch());
/// # Ok::<(), lento::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StretchBuilder {
    config: StreamConfig,
    ratio: f32,
    seed: Option<u64>,

    #[cfg(feature = "worker")]
    worker: WorkerConfig,
}

impl Default for StretchBuilder {
    fn default() -> Self {
        Self {
            config: StreamConfig::default(),
            ratio: StreamConfig::DEFAULT_RATIO,
            seed: None,

            #[cfg(feature = "worker")]
            worker: WorkerConfig::default(),
        }
    }
}

impl StretchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default: 2
    pub fn channels(mut self, channels: usize) -> Self {
        self.config.channels = channels;
        self
    }

    /// Default: 4096
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.config.window_size = window_size;
        self
    }

    /// Default: 4
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Default: 4096
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    /// Default: 5.0
    pub fn ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    /// Fix the phase randomisation seed. Unseeded streams draw from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Log per-message diagnostics at debug level.
    pub fn debug(mut self, enabled: bool) -> Self {
        #[cfg(feature = "worker")]
        {
            self.worker.debug = enabled;
        }
        #[cfg(not(feature = "worker"))]
        let _ = enabled;
        self
    }

    #[cfg(feature = "worker")]
    pub fn worker_config(mut self, config: WorkerConfig) -> Self {
        self.worker = config;
        self
    }

    pub fn stream_config(&self) -> &StreamConfig {
        &self.config
    }

    /// Build an in-process stream.
    pub fn build(self) -> Result<StreamCoordinator<PaulStretch>> {
        self.config.validate()?;
        validate_ratio(self.ratio)?;

        let stretch = make_stretch(&self.config, self.ratio, self.seed);
        let coordinator = StreamCoordinator::new(self.config, stretch)?;

        #[cfg(feature = "worker")]
        let coordinator = coordinator.with_diagnostics(self.worker.debug);

        Ok(coordinator)
    }

    /// Spawn a worker and queue `init` (and `config` if the ratio is not the
    /// default) so it is ready for `write`/`read`.
    #[cfg(feature = "worker")]
    pub fn spawn(self) -> Result<StretchWorker> {
        self.config.validate()?;
        validate_ratio(self.ratio)?;

        let seed = self.seed;
        let worker = StretchWorker::spawn_with(
            self.worker,
            move |config: &StreamConfig, ratio: f32| -> crate::core::Result<PaulStretch> {
                Ok(make_stretch(config, ratio, seed))
            },
        )?;

        worker.init(self.config)?;
        if self.ratio != StreamConfig::DEFAULT_RATIO {
            worker.configure(self.ratio)?;
        }
        Ok(worker)
    }
}

fn make_stretch(config: &StreamConfig, ratio: f32, seed: Option<u64>) -> PaulStretch {
    match seed {
        Some(seed) => PaulStretch::with_seed(config.channels, ratio, config.window_size, seed),
        None => PaulStretch::new(config.channels, ratio, config.window_size),
    }
}
