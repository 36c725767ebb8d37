//! Stream coordinator integration tests.
//!
//! Exercise the read/write protocol through the umbrella crate with the
//! passthrough transform, where output must equal input exactly.
//!
//! Run with:
//! ```bash
//! cargo test -p lento --test stream_tests
//! ```

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{drain_reads, generate_noise, ramp};
use lento::core::Error;
use lento::{Passthrough, ReadOutcome, StreamConfig, StreamCoordinator, Transform};
use proptest::prelude::*;

fn passthrough_stream(config: StreamConfig, step: usize) -> StreamCoordinator<Passthrough> {
    StreamCoordinator::new(config, Passthrough::new(config.channels, step)).unwrap()
}

// =============================================================================
// Example scenario
// =============================================================================

#[test]
fn test_sixteen_samples_two_blocks_of_four() {
    let mut stream = passthrough_stream(StreamConfig::new(1, 8, 2, 4), 4);
    stream.configure(1.0).unwrap();
    stream.submit_write(&[ramp(1, 17)]).unwrap();
    assert_eq!(stream.read_queue_length(), 16);

    let outcome = stream.request_read();
    let blocks = outcome.batch().expect("batch");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].channel(0), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    assert_eq!(blocks[1].channel(0), Some(&[5.0, 6.0, 7.0, 8.0][..]));
    assert_eq!(stream.read_queue_length(), 8);
}

// =============================================================================
// Thresholds and refill
// =============================================================================

#[test]
fn test_read_below_threshold_leaves_queue_alone() {
    let mut stream = passthrough_stream(StreamConfig::new(2, 8, 3, 4), 4);
    stream.submit_write(&[ramp(0, 8), ramp(100, 108)]).unwrap();

    match stream.request_read() {
        ReadOutcome::Pending { available_samples } => assert_eq!(available_samples, 8),
        ReadOutcome::Batch(_) => panic!("two blocks buffered, batch needs three"),
    }
    assert_eq!(stream.read_queue_length(), 8);
}

#[test]
fn test_partial_block_does_not_count() {
    let mut stream = passthrough_stream(StreamConfig::new(1, 8, 2, 4), 1);
    stream.submit_write(&[ramp(0, 7)]).unwrap();
    assert!(!stream.request_read().is_batch());

    stream.submit_write(&[ramp(7, 8)]).unwrap();
    assert!(stream.request_read().is_batch());
}

#[test]
fn test_read_refills_towards_one_batch() {
    // Refuses to step until armed.
    struct Lazy {
        inner: Passthrough,
        armed: bool,
    }

    impl Transform for Lazy {
        fn channels(&self) -> usize {
            self.inner.channels()
        }
        fn write_queue_length(&self) -> usize {
            self.inner.write_queue_length()
        }
        fn read_queue_length(&self) -> usize {
            self.inner.read_queue_length()
        }
        fn write(&mut self, channels: &[&[f32]]) {
            self.inner.write(channels)
        }
        fn read(&mut self, block: &mut lento::Block) -> bool {
            self.inner.read(block)
        }
        fn process(&mut self) -> usize {
            if self.armed {
                self.inner.process()
            } else {
                0
            }
        }
        fn set_ratio(&mut self, ratio: f32) {
            self.inner.set_ratio(ratio)
        }
        fn ratio(&self) -> f32 {
            self.inner.ratio()
        }
    }

    let config = StreamConfig::new(1, 8, 2, 4);
    let lazy = Lazy {
        inner: Passthrough::new(1, 4),
        armed: false,
    };
    let mut stream = StreamCoordinator::new(config, lazy).unwrap();
    stream.submit_write(&[ramp(0, 32)]).unwrap();
    assert_eq!(stream.write_queue_length(), 32);

    // Arm after the write so only the read path processes.
    let mut transform = stream.into_transform();
    transform.armed = true;
    let mut stream = StreamCoordinator::new(config, transform).unwrap();

    assert!(!stream.request_read().is_batch());
    // Refill stops as soon as one batch is buffered.
    assert_eq!(stream.read_queue_length(), 8);
    assert_eq!(stream.write_queue_length(), 24);

    let outcome = stream.request_read();
    assert_eq!(outcome.batch().unwrap()[0].channel(0), Some(&[0.0, 1.0, 2.0, 3.0][..]));
    assert_eq!(stream.read_queue_length(), 8);
    assert_eq!(stream.write_queue_length(), 16);
}

// =============================================================================
// Ratio changes and errors
// =============================================================================

#[test]
fn test_ratio_change_keeps_buffered_samples() {
    let mut stream = passthrough_stream(StreamConfig::new(1, 8, 1, 4), 4);
    stream.submit_write(&[ramp(0, 6)]).unwrap();
    stream.configure(9.5).unwrap();
    stream.submit_write(&[ramp(6, 12)]).unwrap();

    assert_eq!(stream.ratio(), 9.5);
    let (out, batches) = drain_reads(&mut stream);
    assert_eq!(batches, 3);
    assert_eq!(out[0], ramp(0, 12));
}

#[test]
fn test_rejected_requests_change_nothing() {
    let mut stream = passthrough_stream(StreamConfig::new(2, 8, 1, 4), 4);
    stream.submit_write(&[ramp(0, 4), ramp(0, 4)]).unwrap();

    assert!(matches!(
        stream.submit_write(&[ramp(0, 4)]),
        Err(Error::ChannelMismatch { .. })
    ));
    assert!(matches!(
        stream.submit_write(&[ramp(0, 4), ramp(0, 5)]),
        Err(Error::RaggedWrite { .. })
    ));
    assert_eq!(stream.configure(0.0), Err(Error::InvalidRatio(0.0)));
    assert!(stream.configure(f32::INFINITY).is_err());

    assert_eq!(stream.ratio(), 1.0);
    assert_eq!(stream.read_queue_length(), 4);
    assert_eq!(stream.write_queue_length(), 0);
}

#[test]
fn test_empty_write_is_valid() {
    let mut stream = passthrough_stream(StreamConfig::new(2, 8, 1, 4), 4);
    let empty: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
    assert_eq!(stream.submit_write(&empty), Ok(0));
}

// =============================================================================
// Buffer reuse
// =============================================================================

#[test]
fn test_each_read_overwrites_every_slot() {
    let mut stream = passthrough_stream(StreamConfig::new(1, 8, 2, 4), 4);
    stream.submit_write(&[ramp(0, 16)]).unwrap();

    let first: Vec<Vec<f32>> = stream
        .request_read()
        .batch()
        .unwrap()
        .iter()
        .map(|b| b.channel(0).unwrap().to_vec())
        .collect();
    let second: Vec<Vec<f32>> = stream
        .request_read()
        .batch()
        .unwrap()
        .iter()
        .map(|b| b.channel(0).unwrap().to_vec())
        .collect();

    assert_eq!(first, vec![ramp(0, 4), ramp(4, 8)]);
    assert_eq!(second, vec![ramp(8, 12), ramp(12, 16)]);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Whatever the write sizes, passthrough output is the input, delivered
    /// in whole batches, with less than one batch left over.
    #[test]
    fn prop_lossless_block_aligned(
        channels in 1usize..4,
        batch_size in 1usize..5,
        block_size in 1usize..33,
        step in 1usize..64,
        writes in prop::collection::vec(0usize..200, 1..12),
        seed in any::<u64>(),
    ) {
        let config = StreamConfig::new(channels, 8, batch_size, block_size);
        let mut stream = passthrough_stream(config, step);

        let total: usize = writes.iter().sum();
        let source = generate_noise(total, seed);
        let mut delivered = vec![Vec::new(); channels];
        let mut offset = 0;

        for len in writes {
            let chunk = &source[offset..offset + len];
            let data: Vec<&[f32]> = vec![chunk; channels];
            stream.submit_write(&data).unwrap();
            prop_assert_eq!(stream.write_queue_length(), 0);
            offset += len;

            if let ReadOutcome::Batch(blocks) = stream.request_read() {
                prop_assert_eq!(blocks.len(), batch_size);
                for block in blocks {
                    prop_assert_eq!(block.num_channels(), channels);
                    prop_assert_eq!(block.len(), block_size);
                    for (out, samples) in delivered.iter_mut().zip(block.channels()) {
                        out.extend_from_slice(samples);
                    }
                }
            }
        }

        let (rest, _) = drain_reads(&mut stream);
        for (out, tail) in delivered.iter_mut().zip(rest) {
            out.extend(tail);
        }

        let batch_samples = batch_size * block_size;
        let expected_len = total / batch_samples * batch_samples;
        for out in &delivered {
            prop_assert_eq!(out.len(), expected_len);
            prop_assert_eq!(&out[..], &source[..expected_len]);
        }
        prop_assert_eq!(stream.read_queue_length(), total - expected_len);
    }
}
