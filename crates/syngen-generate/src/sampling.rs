use std::f64::consts::PI;

use rand::Rng;

/// Smallest first uniform variate fed to the logarithm.
const MIN_UNIFORM: f64 = 1e-9;

/// Standard normal sample via the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.random::<f64>().max(MIN_UNIFORM);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Index in `0..len` drawn from a normal distribution centered on `len / 2`
/// with a standard deviation of `len / 6` (at least 1), rounded and clamped.
///
/// Returns 0 when `len` is 0.
pub fn gaussian_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mean = len as f64 / 2.0;
    let sigma = (len as f64 / 6.0).max(1.0);
    let value = (standard_normal(rng) * sigma + mean).round();
    if value <= 0.0 {
        0
    } else {
        (value as usize).min(len - 1)
    }
}
