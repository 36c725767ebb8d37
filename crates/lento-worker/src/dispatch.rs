//! Protocol state machine: `Uninitialized` until `init`, then `Ready` for good.

use std::sync::Arc;

use lento_core::{Error, ReadOutcome, Result, StreamConfig, StreamCoordinator, Transform};
use lento_stretch::PaulStretch;
use tracing::debug;

use crate::message::{Request, Response};
use crate::metrics::WorkerMetrics;

/// Builds the transform when `init` arrives, given the stream config and the
/// starting ratio.
pub trait TransformFactory: Send {
    type Output: Transform;

    fn build(&mut self, config: &StreamConfig, ratio: f32) -> Result<Self::Output>;
}

impl<T, F> TransformFactory for F
where
    T: Transform,
    F: FnMut(&StreamConfig, f32) -> Result<T> + Send,
{
    type Output = T;

    fn build(&mut self, config: &StreamConfig, ratio: f32) -> Result<T> {
        self(config, ratio)
    }
}

/// Default factory: PaulStretch seeded from OS entropy.
pub fn paulstretch(config: &StreamConfig, ratio: f32) -> Result<PaulStretch> {
    Ok(PaulStretch::new(config.channels, ratio, config.window_size))
}

enum State<T: Transform> {
    Uninitialized,
    Ready(StreamCoordinator<T>),
}

/// Applies host requests to a stream, one at a time.
///
/// Owns the coordinator once `init` has run. Every request yields at most one
/// response; rejected requests leave the stream untouched.
pub struct Dispatcher<F: TransformFactory> {
    state: State<F::Output>,
    factory: F,
    diagnostics: bool,
    metrics: Arc<WorkerMetrics>,
}

impl<F: TransformFactory> Dispatcher<F> {
    pub fn new(factory: F) -> Self {
        Self {
            state: State::Uninitialized,
            factory,
            diagnostics: false,
            metrics: Arc::new(WorkerMetrics::new()),
        }
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Share counters with an outside observer.
    pub fn with_metrics(mut self, metrics: Arc<WorkerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> Arc<WorkerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    pub fn coordinator(&self) -> Option<&StreamCoordinator<F::Output>> {
        match &self.state {
            State::Ready(coordinator) => Some(coordinator),
            State::Uninitialized => None,
        }
    }

    /// Apply one request. `Ok(None)` means the request has no response.
    pub fn handle(&mut self, request: Request) -> Result<Option<Response>> {
        let result = self.dispatch(request);
        if result.is_err() {
            self.metrics.record_rejected();
        }
        result
    }

    fn dispatch(&mut self, request: Request) -> Result<Option<Response>> {
        match request {
            Request::Init(config) => {
                self.init(config)?;
                Ok(None)
            }
            Request::Config { ratio } => {
                ready(&mut self.state)?.configure(ratio)?;
                Ok(None)
            }
            Request::Read => {
                let coordinator = ready(&mut self.state)?;
                match coordinator.request_read() {
                    ReadOutcome::Batch(blocks) => {
                        self.metrics.record_read(true);
                        Ok(Some(Response::Read {
                            data: blocks.to_vec(),
                        }))
                    }
                    ReadOutcome::Pending { .. } => {
                        self.metrics.record_read(false);
                        Ok(None)
                    }
                }
            }
            Request::Write { data } => {
                let coordinator = ready(&mut self.state)?;
                let steps = coordinator.submit_write(&data)?;
                let frames = data.first().map_or(0, Vec::len);
                self.metrics.record_write(frames, steps);
                Ok(None)
            }
        }
    }

    fn init(&mut self, config: StreamConfig) -> Result<()> {
        if self.is_ready() {
            return Err(Error::AlreadyInitialized);
        }
        config.validate()?;

        let transform = self.factory.build(&config, StreamConfig::DEFAULT_RATIO)?;
        let coordinator =
            StreamCoordinator::new(config, transform)?.with_diagnostics(self.diagnostics);
        if self.diagnostics {
            debug!("initialized {:?}", coordinator);
        }

        self.state = State::Ready(coordinator);
        Ok(())
    }
}

fn ready<T: Transform>(state: &mut State<T>) -> Result<&mut StreamCoordinator<T>> {
    match state {
        State::Ready(coordinator) => Ok(coordinator),
        State::Uninitialized => Err(Error::NotInitialized),
    }
}
