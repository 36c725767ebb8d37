//! Message-driven worker for the Lento block pipeline.
//!
//! A host talks to the worker with four messages: `init`, `config`, `read`,
//! and `write`. The worker owns the stream, stretches on its own thread, and
//! answers each satisfiable `read` with one batch of blocks.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use lento_core::StreamConfig;
//! use lento_worker::{Response, StretchWorker, WorkerConfig};
//!
//! let worker = StretchWorker::spawn(WorkerConfig::default())?;
//! worker.init(StreamConfig::default())?;
//! worker.configure(8.0)?;
//! worker.write(vec![vec![0.0; 44100], vec![0.0; 44100]])?;
//! worker.read()?;
//!
//! if let Some(Response::Read { data }) = worker.recv_timeout(Duration::from_secs(1)) {
//!     println!("got {} blocks", data.len());
//! }
//! # Ok::<(), lento_worker::Error>(())
//! ```
//!
//! # Features
//!
//! - **Ordered**: requests are applied one at a time, in send order
//! - **Eager**: every write drains the transform before the next message
//! - **Wire-ready**: [`Request`]/[`Response`] serialize to the host JSON shape

pub mod error;
pub use error::{Error, Result};

mod config;
mod dispatch;
mod message;
mod metrics;
mod thread;

pub use config::WorkerConfig;
pub use dispatch::{paulstretch, Dispatcher, TransformFactory};
pub use message::{Request, Response};
pub use metrics::{WorkerMetrics, WorkerMetricsSnapshot};
pub use thread::StretchWorker;
