//! PaulStretch transform.
//!
//! ## Algorithm Overview
//!
//! Each step, per channel:
//!
//! 1. **Analysis**: copy the first `window_size` queued samples, apply the window
//! 2. **Smear**: FFT, keep magnitudes, randomise phases, inverse FFT
//! 3. **Synthesis**: window again, overlap-add with the previous step's second half
//! 4. **Advance**: emit `window_size / 2` samples, drop `hop` samples of input
//!
//! with `hop = (window_size / 2) / ratio`. Output grows by half a window per
//! step while input shrinks by `hop`, so output length tends to
//! `input length × ratio`. Fractional hops are carried between steps.

use std::collections::VecDeque;
use std::fmt;

use lento_core::{Block, StreamConfig, Transform};
use rand::{rngs::StdRng, SeedableRng};

use crate::spectral::PhaseRandomizer;
use crate::window::paul_window;

/// Extreme time-stretch transform with per-channel input/output queues.
pub struct PaulStretch {
    window_size: usize,
    ratio: f32,
    hop: f64,
    hop_carry: f64,
    window: Vec<f32>,

    input: Vec<VecDeque<f32>>,
    output: Vec<VecDeque<f32>>,
    /// Second half of the previous synthesis frame, per channel
    overlap: Vec<Vec<f32>>,

    frame: Vec<f32>,
    randomizer: PhaseRandomizer,
    rng: StdRng,
}

impl PaulStretch {
    /// Create a transform seeded from OS entropy.
    ///
    /// `window_size` should be even and at least 4 (see
    /// [`StreamConfig::validate`]); `ratio` must be positive.
    pub fn new(channels: usize, ratio: f32, window_size: usize) -> Self {
        Self::with_rng(channels, ratio, window_size, StdRng::from_entropy())
    }

    /// Create a transform with reproducible phase randomisation.
    pub fn with_seed(channels: usize, ratio: f32, window_size: usize, seed: u64) -> Self {
        Self::with_rng(channels, ratio, window_size, StdRng::seed_from_u64(seed))
    }

    /// Build from a stream config at the default ratio.
    pub fn from_config(config: &StreamConfig) -> Self {
        Self::new(
            config.channels,
            StreamConfig::DEFAULT_RATIO,
            config.window_size,
        )
    }

    fn with_rng(channels: usize, ratio: f32, window_size: usize, rng: StdRng) -> Self {
        let half = window_size / 2;
        let mut stretch = Self {
            window_size,
            ratio,
            hop: 0.0,
            hop_carry: 0.0,
            window: paul_window(window_size),
            input: vec![VecDeque::with_capacity(window_size * 2); channels],
            output: vec![VecDeque::with_capacity(window_size * 2); channels],
            overlap: vec![vec![0.0; half]; channels],
            frame: vec![0.0; window_size],
            randomizer: PhaseRandomizer::new(window_size),
            rng,
        };
        stretch.set_ratio(ratio);
        stretch
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Input samples consumed per step at the current ratio.
    pub fn hop(&self) -> f64 {
        self.hop
    }
}

impl Transform for PaulStretch {
    fn channels(&self) -> usize {
        self.input.len()
    }

    fn write_queue_length(&self) -> usize {
        self.input.first().map_or(0, VecDeque::len)
    }

    fn read_queue_length(&self) -> usize {
        self.output.first().map_or(0, VecDeque::len)
    }

    fn write(&mut self, channels: &[&[f32]]) {
        for (queue, samples) in self.input.iter_mut().zip(channels) {
            queue.extend(samples.iter().copied());
        }
    }

    fn read(&mut self, block: &mut Block) -> bool {
        let len = block.len();
        if self.read_queue_length() < len {
            return false;
        }
        for (queue, dest) in self.output.iter_mut().zip(block.channels_mut()) {
            for (slot, sample) in dest.iter_mut().zip(queue.drain(..len)) {
                *slot = sample;
            }
        }
        true
    }

    fn process(&mut self) -> usize {
        let half = self.window_size / 2;
        let advance = self.hop + self.hop_carry;
        let hop = advance.floor() as usize;

        if self.input.is_empty() || self.write_queue_length() < self.window_size.max(hop) {
            return 0;
        }
        self.hop_carry = advance - hop as f64;

        for ((input, output), overlap) in self
            .input
            .iter_mut()
            .zip(self.output.iter_mut())
            .zip(self.overlap.iter_mut())
        {
            for ((slot, &sample), &w) in self.frame.iter_mut().zip(input.iter()).zip(&self.window) {
                *slot = sample * w;
            }

            self.randomizer.process(&mut self.frame, &mut self.rng);

            for (sample, &w) in self.frame.iter_mut().zip(&self.window) {
                *sample *= w;
            }

            output.extend(
                overlap
                    .iter()
                    .zip(&self.frame[..half])
                    .map(|(prev, cur)| prev + cur),
            );
            overlap.copy_from_slice(&self.frame[half..]);
            input.drain(..hop);
        }

        half
    }

    fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
        self.hop = (self.window_size / 2) as f64 / ratio as f64;
    }

    fn ratio(&self) -> f32 {
        self.ratio
    }
}

impl fmt::Display for PaulStretch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PaulStretch(channels: {}, ratio: {}, window: {})",
            self.channels(),
            self.ratio,
            self.window_size
        )
    }
}

impl fmt::Debug for PaulStretch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaulStretch")
            .field("channels", &self.channels())
            .field("ratio", &self.ratio)
            .field("window_size", &self.window_size)
            .field("write_queue", &self.write_queue_length())
            .field("read_queue", &self.read_queue_length())
            .finish()
    }
}
