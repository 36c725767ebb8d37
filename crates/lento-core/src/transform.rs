//! Queue-based contract between the coordinator and a time-stretch transform.

use crate::Block;

/// A stateful stretch transform with an input queue and an output queue.
///
/// Queue lengths are per channel and uniform across channels. Samples enter
/// through [`write`](Transform::write), move from the input to the output
/// queue only through [`process`](Transform::process), and leave through
/// [`read`](Transform::read).
pub trait Transform: Send {
    /// Number of channels the transform was built for.
    fn channels(&self) -> usize;

    /// Samples waiting to be processed.
    fn write_queue_length(&self) -> usize;

    /// Processed samples waiting to be read.
    fn read_queue_length(&self) -> usize;

    /// Enqueue one slice per channel. Slices have equal length.
    fn write(&mut self, channels: &[&[f32]]);

    /// Dequeue exactly `block.len()` samples per channel into `block`.
    ///
    /// Returns `false` and leaves `block` untouched if the output queue is
    /// shorter than one block.
    fn read(&mut self, block: &mut Block) -> bool;

    /// Run one unit of work. Returns samples emitted per channel; `0` means
    /// no progress is possible with the input buffered so far.
    fn process(&mut self) -> usize;

    /// Change the stretch ratio without touching either queue.
    fn set_ratio(&mut self, ratio: f32);

    fn ratio(&self) -> f32;
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn channels(&self) -> usize {
        (**self).channels()
    }

    fn write_queue_length(&self) -> usize {
        (**self).write_queue_length()
    }

    fn read_queue_length(&self) -> usize {
        (**self).read_queue_length()
    }

    fn write(&mut self, channels: &[&[f32]]) {
        (**self).write(channels)
    }

    fn read(&mut self, block: &mut Block) -> bool {
        (**self).read(block)
    }

    fn process(&mut self) -> usize {
        (**self).process()
    }

    fn set_ratio(&mut self, ratio: f32) {
        (**self).set_ratio(ratio)
    }

    fn ratio(&self) -> f32 {
        (**self).ratio()
    }
}
