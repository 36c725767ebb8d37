//! Analysis/synthesis window.

/// PaulStretch window: `(1 - x²)^1.25` for `x` sweeping -1..=1.
///
/// Zero at both ends and symmetric. Applied once before the FFT and once
/// after the inverse, so overlapping halves cross-fade smoothly.
pub fn paul_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    let step = 2.0 / (size - 1) as f64;
    (0..size)
        .map(|i| {
            let x = -1.0 + i as f64 * step;
            (1.0 - x * x).max(0.0).powf(1.25) as f32
        })
        .collect()
}
