//! Message types for worker communication.
//!
//! Requests and responses serialize to the JSON shape hosts already speak:
//!
//! ```json
//! {"type": "init", "numberOfChannels": 2, "winSize": 4096, "batchSize": 4, "blockSize": 4096}
//! {"type": "config", "ratio": 8.0}
//! {"type": "read"}
//! {"type": "write", "data": [[0.0, 0.1], [0.0, -0.1]]}
//! ```

use crossbeam_channel::Sender;
use lento_core::{Block, StreamConfig};
use serde::{Deserialize, Serialize};

/// Inbound message from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Request {
    /// Build the transform and block pool. Valid exactly once.
    Init(StreamConfig),
    /// Change the stretch ratio.
    Config { ratio: f32 },
    /// Ask for one batch of blocks.
    Read,
    /// Append one sample array per channel.
    Write { data: Vec<Vec<f32>> },
}

impl Request {
    /// Wire name of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Init(_) => "init",
            Request::Config { .. } => "config",
            Request::Read => "read",
            Request::Write { .. } => "write",
        }
    }
}

/// Outbound message to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Response {
    /// `batch_size` blocks, oldest first.
    Read { data: Vec<Block> },
    /// A request was rejected; the stream state is unchanged.
    Error { error: lento_core::Error },
}

/// Command sent to the worker thread
pub(crate) enum WorkerCommand {
    /// Host protocol message
    Request(Request),
    /// Acknowledge once every earlier command has been handled
    Barrier(Sender<()>),
    /// Shutdown the worker thread
    Shutdown,
}

impl std::fmt::Debug for WorkerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerCommand::Request(Request::Write { data }) => f
                .debug_struct("Write")
                .field("channels", &data.len())
                .field("frames", &data.first().map_or(0, Vec::len))
                .finish(),
            WorkerCommand::Request(request) => f.debug_tuple("Request").field(request).finish(),
            WorkerCommand::Barrier(_) => write!(f, "Barrier"),
            WorkerCommand::Shutdown => write!(f, "Shutdown"),
        }
    }
}
