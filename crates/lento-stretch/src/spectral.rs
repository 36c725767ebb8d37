//! Spectral phase randomisation.
//!
//! The heart of PaulStretch: keep each bin's magnitude, throw away its phase.
//! A frame treated this way sounds like a smeared, timeless snapshot of the
//! original, which is what lets successive frames be spaced arbitrarily far
//! apart in the input without audible repetition.
//!
//! ## RT-Safety
//!
//! FFT plans and buffers are allocated in [`PhaseRandomizer::new`].
//! [`PhaseRandomizer::process`] performs no allocations.

use std::f32::consts::TAU;
use std::sync::Arc;

use rand::Rng;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

pub struct PhaseRandomizer {
    size: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    spectrum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl PhaseRandomizer {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        Self {
            size,
            forward,
            inverse,
            spectrum: vec![Complex::new(0.0, 0.0); size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Replace `frame` with a signal of the same magnitude spectrum and
    /// random phases. `frame.len()` must equal [`size`](Self::size).
    pub fn process<R: Rng>(&mut self, frame: &mut [f32], rng: &mut R) {
        debug_assert_eq!(frame.len(), self.size);
        let n = self.size;
        let half = n / 2;

        for (bin, &sample) in self.spectrum.iter_mut().zip(frame.iter()) {
            *bin = Complex::new(sample, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        // DC (and Nyquist for even sizes) must stay real for a real output
        self.spectrum[0] = Complex::new(self.spectrum[0].norm(), 0.0);
        for k in 1..n.div_ceil(2) {
            let magnitude = self.spectrum[k].norm();
            let bin = Complex::from_polar(magnitude, rng.gen_range(0.0..TAU));
            self.spectrum[k] = bin;
            self.spectrum[n - k] = bin.conj();
        }
        if n % 2 == 0 && n > 0 {
            self.spectrum[half] = Complex::new(self.spectrum[half].norm(), 0.0);
        }

        self.inverse
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        let scale = 1.0 / n as f32;
        for (sample, bin) in frame.iter_mut().zip(&self.spectrum) {
            *sample = bin.re * scale;
        }
    }
}
