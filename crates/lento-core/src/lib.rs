//! Block pipeline kernel for Lento.
//!
//! Feeds arbitrary-length sample batches into a time-stretch [`Transform`] and
//! hands transformed audio back out in fixed-size blocks, a whole batch at a
//! time.
//!
//! # Example
//!
//! ```
//! use lento_core::{Passthrough, ReadOutcome, StreamConfig, StreamCoordinator};
//!
//! let config = StreamConfig::new(1, 8, 2, 4);
//! let mut stream = StreamCoordinator::new(config, Passthrough::new(1, 4))?;
//!
//! let input: Vec<f32> = (1..=16).map(|v| v as f32).collect();
//! stream.submit_write(&[input])?;
//!
//! match stream.request_read() {
//!     ReadOutcome::Batch(blocks) => assert_eq!(blocks.len(), 2),
//!     ReadOutcome::Pending { .. } => unreachable!(),
//! }
//! assert_eq!(stream.read_queue_length(), 8);
//! # Ok::<(), lento_core::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

mod block;
mod config;
mod coordinator;
mod passthrough;
mod transform;

pub use block::{Block, BlockPool};
pub use config::{validate_ratio, StreamConfig};
pub use coordinator::{ReadOutcome, StreamCoordinator};
pub use passthrough::Passthrough;
pub use transform::Transform;
