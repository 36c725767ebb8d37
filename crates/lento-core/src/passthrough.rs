//! Unity transform.

use std::collections::VecDeque;

use crate::{Block, Transform};

/// Moves samples from input to output unchanged, `step` samples per
/// [`process`](Transform::process) call.
///
/// The ratio is stored and reported but has no effect on the audio, so sample
/// counts are always preserved. Useful for bypass and for exercising the
/// coordinator without DSP.
#[derive(Debug, Clone)]
pub struct Passthrough {
    input: Vec<VecDeque<f32>>,
    output: Vec<VecDeque<f32>>,
    step: usize,
    ratio: f32,
}

impl Passthrough {
    pub fn new(channels: usize, step: usize) -> Self {
        Self {
            input: vec![VecDeque::new(); channels],
            output: vec![VecDeque::new(); channels],
            step: step.max(1),
            ratio: 1.0,
        }
    }
}

impl Transform for Passthrough {
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
        let count = self.write_queue_length().min(self.step);
        if count == 0 {
            return 0;
        }
        for (input, output) in self.input.iter_mut().zip(&mut self.output) {
            output.extend(input.drain(..count));
        }
        count
    }

    fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
    }

    fn ratio(&self) -> f32 {
        self.ratio
    }
}
