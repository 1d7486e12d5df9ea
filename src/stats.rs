//! Timing sample statistics
//!
//! Mean and deviation of raw inter-request timing samples, as fed into the
//! think-time parameters of relative behavior models.

/// Arithmetic mean of a non-empty sample sequence.
///
/// Callers are responsible for short-circuiting empty sequences to 0.0.
pub fn mean(samples: &[f64]) -> f64 {
    let sum: f64 = samples.iter().sum();
    sum / samples.len() as f64
}

/// Sample standard deviation of a non-empty sample sequence.
///
/// Uses Bessel's correction (divisor `n - 1`), so a single-element sequence
/// yields 0.0. The same variant is used everywhere think times are reported.
pub fn deviation(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let m = mean(samples);
    let variance: f64 = samples.iter().map(|s| (s - m) * (s - m)).sum::<f64>()
        / (samples.len() - 1) as f64;

    variance.sqrt()
}
