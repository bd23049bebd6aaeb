// Shared mean/variance helpers over ndarray views

use ndarray::ArrayView1;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Sample variance with divisor `n - 1`
///
/// Returns 0 when `n < min_samples`. A threshold below 2 is raised to 2.
pub fn sample_variance(values: &[f64], min_samples: usize) -> f64 {
    if values.len() < min_samples.max(2) {
        return 0.0;
    }
    ArrayView1::from(values).var(1.0)
}
