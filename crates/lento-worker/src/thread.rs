//! Background thread that owns a stream and answers host requests.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use lento_core::StreamConfig;
use tracing::{debug, warn};

use crate::config::WorkerConfig;
use crate::dispatch::{paulstretch, Dispatcher, TransformFactory};
use crate::message::{Request, Response, WorkerCommand};
use crate::metrics::WorkerMetrics;
use crate::{Error, Result};

/// Stretch worker running on its own OS thread.
///
/// Requests are handled strictly in send order. Responses arrive on
/// [`responses`](Self::responses) in the same order as the requests that
/// produced them.
pub struct StretchWorker {
    command_tx: Sender<WorkerCommand>,
    response_rx: Receiver<Response>,
    thread_handle: Option<JoinHandle<()>>,
    metrics: Arc<WorkerMetrics>,
    config: WorkerConfig,
}

impl StretchWorker {
    /// Spawn a worker that builds a [`PaulStretch`](lento_stretch::PaulStretch) on `init`.
    pub fn spawn(config: WorkerConfig) -> Result<Self> {
        Self::spawn_with(config, paulstretch)
    }

    /// Spawn a worker with a custom transform factory.
    pub fn spawn_with<F>(config: WorkerConfig, factory: F) -> Result<Self>
    where
        F: TransformFactory + 'static,
        F::Output: 'static,
    {
        config.validate()?;

        let (command_tx, command_rx) = bounded(config.channel_capacity);
        let (response_tx, response_rx) = unbounded();
        let metrics = Arc::new(WorkerMetrics::new());

        let dispatcher = Dispatcher::new(factory)
            .with_diagnostics(config.debug)
            .with_metrics(Arc::clone(&metrics));
        let debug = config.debug;

        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker_loop(command_rx, response_tx, dispatcher, debug))?;

        Ok(Self {
            command_tx,
            response_rx,
            thread_handle: Some(handle),
            metrics,
            config,
        })
    }

    /// Queue a request, blocking while the command channel is full.
    pub fn send(&self, request: Request) -> Result<()> {
        self.command_tx
            .send(WorkerCommand::Request(request))
            .map_err(|_| Error::Disconnected)
    }

    /// Queue a request without blocking.
    pub fn try_send(&self, request: Request) -> Result<()> {
        self.command_tx
            .try_send(WorkerCommand::Request(request))
            .map_err(|e| match e {
                TrySendError::Full(_) => Error::ChannelFull,
                TrySendError::Disconnected(_) => Error::Disconnected,
            })
    }

    pub fn init(&self, config: StreamConfig) -> Result<()> {
        self.send(Request::Init(config))
    }

    pub fn configure(&self, ratio: f32) -> Result<()> {
        self.send(Request::Config { ratio })
    }

    pub fn read(&self) -> Result<()> {
        self.send(Request::Read)
    }

    pub fn write(&self, data: Vec<Vec<f32>>) -> Result<()> {
        self.send(Request::Write { data })
    }

    /// Response stream, for hosts that select over several channels.
    pub fn responses(&self) -> &Receiver<Response> {
        &self.response_rx
    }

    pub fn try_recv(&self) -> Option<Response> {
        self.response_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Response> {
        self.response_rx.recv_timeout(timeout).ok()
    }

    /// Block until every request sent so far has been handled.
    ///
    /// Responses to those requests are already queued when this returns.
    pub fn wait_idle(&self, timeout: Duration) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        self.command_tx
            .send_timeout(WorkerCommand::Barrier(ack_tx), timeout)
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::Disconnected
                }
            })?;

        ack_rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => Error::Timeout,
            RecvTimeoutError::Disconnected => Error::Disconnected,
        })
    }

    pub fn metrics(&self) -> Arc<WorkerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the thread after it drains the requests already queued.
    pub fn stop(&mut self) {
        let _ = self.command_tx.send(WorkerCommand::Shutdown);

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StretchWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for StretchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StretchWorker")
            .field("thread_name", &self.config.thread_name)
            .field("running", &self.is_running())
            .field("pending_commands", &self.command_tx.len())
            .field("pending_responses", &self.response_rx.len())
            .finish()
    }
}

fn worker_loop<F: TransformFactory>(
    rx: Receiver<WorkerCommand>,
    tx: Sender<Response>,
    mut dispatcher: Dispatcher<F>,
    debug: bool,
) {
    while let Ok(command) = rx.recv() {
        if debug {
            debug!("worker received {:?}", command);
        }

        match command {
            WorkerCommand::Request(request) => {
                let kind = request.kind();
                let response = match dispatcher.handle(request) {
                    Ok(response) => response,
                    Err(error) => {
                        warn!("rejected {} request: {}", kind, error);
                        Some(Response::Error { error })
                    }
                };

                if let Some(response) = response {
                    if tx.send(response).is_err() {
                        break;
                    }
                }
            }
            WorkerCommand::Barrier(ack) => {
                let _ = ack.send(());
            }
            WorkerCommand::Shutdown => break,
        }
    }
}
