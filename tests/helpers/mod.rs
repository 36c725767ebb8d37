//! Test helpers and fixtures for Lento integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact paths (passthrough, silence)
//! - `DSP_EPSILON` (1e-4): Spectral processing
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use lento::{ReadOutcome, StreamCoordinator, Transform};

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Consecutive integers as samples, `start..end`.
pub fn ramp(start: usize, end: usize) -> Vec<f32> {
    (start..end).map(|v| v as f32).collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Assert that a signal is approximately silent (all values near zero).
pub fn assert_silence(samples: &[f32], tolerance: f32) {
    let max = peak(samples);
    assert!(
        max <= tolerance,
        "Expected silence, but peak amplitude was {}",
        max
    );
}

/// Assert that a signal has content (not silent).
pub fn assert_has_audio(samples: &[f32], min_rms: f32) {
    let r = rms(samples);
    assert!(
        r >= min_rms,
        "Expected audio content with RMS >= {}, but RMS was {}",
        min_rms,
        r
    );
}

/// Read batches until the stream reports pending, appending each channel's
/// samples in delivery order. Returns the collected channels and batch count.
pub fn drain_reads<T: Transform>(stream: &mut StreamCoordinator<T>) -> (Vec<Vec<f32>>, usize) {
    let channels = stream.config().channels;
    let mut collected = vec![Vec::new(); channels];
    let mut batches = 0;

    while let ReadOutcome::Batch(blocks) = stream.request_read() {
        for block in blocks {
            for (out, channel) in collected.iter_mut().zip(block.channels()) {
                out.extend_from_slice(channel);
            }
        }
        batches += 1;
    }
    (collected, batches)
}
