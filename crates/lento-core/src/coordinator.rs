//! Stream coordinator - batches transform output into fixed-size blocks.
//!
//! Decouples three rates:
//!
//! - **Writers** push arbitrary-length sample batches at any time
//! - **The transform** consumes and emits samples in its own step size
//! - **Readers** want exactly `batch_size` blocks of `block_size` samples
//!
//! ## Drain policies
//!
//! Writes drain the transform until it stops making progress, so output is
//! produced as soon as input allows. Reads only top the output queue back up
//! to one batch, so a reader polling faster than input arrives never forces
//! more work than the next read needs.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::block::{Block, BlockPool};
use crate::config::{validate_ratio, StreamConfig};
use crate::transform::Transform;
use crate::{Error, Result};

/// Result of [`StreamCoordinator::request_read`].
#[derive(Debug, PartialEq)]
pub enum ReadOutcome<'a> {
    /// A full batch, borrowed from the coordinator's pool.
    Batch(&'a [Block]),
    /// Fewer than `batch_size` blocks were buffered; nothing was consumed.
    Pending {
        /// Samples per channel buffered when the read was attempted
        available_samples: usize,
    },
}

impl<'a> ReadOutcome<'a> {
    pub fn is_batch(&self) -> bool {
        matches!(self, ReadOutcome::Batch(_))
    }

    pub fn batch(&self) -> Option<&'a [Block]> {
        match self {
            ReadOutcome::Batch(blocks) => Some(*blocks),
            ReadOutcome::Pending { .. } => None,
        }
    }
}

/// Owns a transform and the reusable output pool for one stream.
///
/// The batch returned by a successful read borrows the pool, so it must be
/// consumed (or copied) before the next call that needs `&mut self`.
pub struct StreamCoordinator<T: Transform> {
    transform: T,
    pool: BlockPool,
    config: StreamConfig,
    diagnostics: bool,
}

impl<T: Transform> StreamCoordinator<T> {
    /// Validate `config` against `transform` and allocate the block pool.
    pub fn new(config: StreamConfig, transform: T) -> Result<Self> {
        config.validate()?;
        if transform.channels() != config.channels {
            return Err(Error::ChannelMismatch {
                expected: config.channels,
                actual: transform.channels(),
            });
        }

        Ok(Self {
            pool: BlockPool::new(config.batch_size, config.channels, config.block_size),
            transform,
            config,
            diagnostics: false,
        })
    }

    /// Emit per-operation `debug!` lines.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn ratio(&self) -> f32 {
        self.transform.ratio()
    }

    pub fn read_queue_length(&self) -> usize {
        self.transform.read_queue_length()
    }

    pub fn write_queue_length(&self) -> usize {
        self.transform.write_queue_length()
    }

    /// Contents of the pool as of the last successful read.
    pub fn pool(&self) -> &[Block] {
        self.pool.blocks()
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn into_transform(self) -> T {
        self.transform
    }

    /// Change the stretch ratio. Buffered samples are kept as they are; only
    /// material processed after this call uses the new ratio.
    pub fn configure(&mut self, ratio: f32) -> Result<()> {
        validate_ratio(ratio)?;
        self.transform.set_ratio(ratio);
        if self.diagnostics {
            debug!("change config, ratio: {}", ratio);
        }
        Ok(())
    }

    /// Deliver one batch if enough whole blocks are buffered, then top the
    /// output queue back up towards one batch.
    pub fn request_read(&mut self) -> ReadOutcome<'_> {
        let block_size = self.config.block_size;
        let available_samples = self.transform.read_queue_length();
        let mut delivered = available_samples / block_size >= self.config.batch_size;

        if delivered {
            for block in self.pool.blocks_mut() {
                if !self.transform.read(block) {
                    warn!(
                        "transform reported {} samples but could not fill a block of {}",
                        available_samples, block_size
                    );
                    delivered = false;
                    break;
                }
            }
            if delivered && self.diagnostics {
                debug!("sent {} blocks", self.config.batch_size);
            }
        } else if self.diagnostics {
            debug!(
                "not enough blocks ready, only {} samples available",
                available_samples
            );
        }

        self.refill();

        if delivered {
            ReadOutcome::Batch(self.pool.blocks())
        } else {
            ReadOutcome::Pending { available_samples }
        }
    }

    /// Append one slice per channel to the input queue, then process until the
    /// transform stops making progress. Returns the number of steps run.
    pub fn submit_write<S: AsRef<[f32]>>(&mut self, channels: &[S]) -> Result<usize> {
        if channels.len() != self.config.channels {
            return Err(Error::ChannelMismatch {
                expected: self.config.channels,
                actual: channels.len(),
            });
        }

        let slices: SmallVec<[&[f32]; 8]> = channels.iter().map(AsRef::as_ref).collect();
        let frames = slices.first().map_or(0, |s| s.len());
        if let Some((channel, ragged)) = slices.iter().enumerate().find(|(_, s)| s.len() != frames)
        {
            return Err(Error::RaggedWrite {
                channel,
                expected: frames,
                actual: ragged.len(),
            });
        }

        self.transform.write(&slices);
        if self.diagnostics {
            debug!(
                "wrote {} samples to input queue, queue length: {}",
                frames,
                self.transform.write_queue_length()
            );
        }

        let mut steps = 0;
        while self.transform.process() != 0 {
            steps += 1;
            if self.diagnostics {
                debug!(
                    "processed batch during write, read queue: {}",
                    self.transform.read_queue_length()
                );
            }
        }
        Ok(steps)
    }

    /// Process until one batch is buffered or the transform runs dry.
    fn refill(&mut self) -> usize {
        let target = self.config.batch_samples();
        let mut steps = 0;
        while self.transform.read_queue_length() < target && self.transform.process() != 0 {
            steps += 1;
            if self.diagnostics {
                debug!(
                    "processed a batch, now {} samples in output queue",
                    self.transform.read_queue_length()
                );
            }
        }
        steps
    }
}

impl<T: Transform> std::fmt::Debug for StreamCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCoordinator")
            .field("config", &self.config)
            .field("ratio", &self.transform.ratio())
            .field("write_queue", &self.transform.write_queue_length())
            .field("read_queue", &self.transform.read_queue_length())
            .finish()
    }
}
