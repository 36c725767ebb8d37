//! PaulStretch extreme time-stretching for the Lento block pipeline.
//!
//! Implements [`lento_core::Transform`], so it plugs straight into a
//! [`lento_core::StreamCoordinator`] or the worker thread.
//!
//! # Example
//!
//! ```
//! use lento_core::{StreamConfig, StreamCoordinator};
//! use lento_stretch::PaulStretch;
//!
//! let config = StreamConfig::new(2, 1024, 2, 512);
//! let stretch = PaulStretch::with_seed(2, 8.0, config.window_size, 1);
//! let mut stream = StreamCoordinator::new(config, stretch)?;
//!
//! stream.submit_write(&[vec![0.0; 4096], vec![0.0; 4096]])?;
//! assert!(stream.request_read().is_batch());
//! # Ok::<(), lento_core::Error>(())
//! ```
//!
//! # Features
//!
//! - **Fractional hops**: any positive ratio, carried exactly across steps
//! - **Pre-allocated FFT**: plans and buffers built once per transform
//! - **Reproducible**: [`PaulStretch::with_seed`] for deterministic output

mod paulstretch;
mod spectral;
mod window;

pub use paulstretch::PaulStretch;
pub use spectral::PhaseRandomizer;
pub use window::paul_window;
