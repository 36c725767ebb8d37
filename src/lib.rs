//! # Lento - Streaming Time-Stretch
//!
//! Feeds audio of any length into a time-stretch transform and hands the
//! stretched result back in fixed-size blocks, a batch at a time.
//!
//! ## Architecture
//!
//! Lento is an umbrella crate that coordinates:
//! - **lento-core** - Block pool, stream coordinator, transform contract
//! - **lento-stretch** - PaulStretch extreme time-stretching
//! - **lento-worker** - Message-driven worker thread (init/config/read/write)
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use lento::prelude::*;
//!
//! let worker = StretchBuilder::new().ratio(8.0).spawn()?;
//! worker.write(vec![vec![0.0; 44100], vec![0.0; 44100]])?;
//! worker.read()?;
//!
//! if let Some(Response::Read { data }) = worker.recv_timeout(Duration::from_secs(1)) {
//!     for block in &data {
//!         println!("{} frames", block.len());
//!     }
//! }
//! # Ok::<(), lento::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Worker thread and PaulStretch
//! - `stretch` - PaulStretch transform
//! - `worker` - Worker thread (implies `stretch`)

/// Re-export of lento-core for direct access
pub use lento_core as core;

pub use lento_core::{
    Block, BlockPool, Passthrough, ReadOutcome, StreamConfig, StreamCoordinator, Transform,
};

mod error;
pub use error::{Error, Result};

// PaulStretch
#[cfg(feature = "stretch")]
pub use lento_stretch as stretch;

#[cfg(feature = "stretch")]
pub use lento_stretch::PaulStretch;

// Worker thread
#[cfg(feature = "worker")]
pub use lento_worker as worker;

#[cfg(feature = "worker")]
pub use lento_worker::{Request, Response, StretchWorker, WorkerConfig};

#[cfg(feature = "stretch")]
mod builder;

#[cfg(feature = "stretch")]
pub use builder::StretchBuilder;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::core::{Block, ReadOutcome, StreamConfig, StreamCoordinator, Transform};

    #[cfg(feature = "stretch")]
    pub use crate::{PaulStretch, StretchBuilder};

    #[cfg(feature = "worker")]
    pub use crate::worker::{Request, Response, StretchWorker, WorkerConfig};
}
