//! Descriptive statistics on measurement slices

use crate::error::{Error, Result};
use statrs::statistics::Statistics;

/// Default replacement for a sigma that is exactly zero
pub const DEFAULT_SIGMA_FLOOR: f64 = 1e-6;

/// Arithmetic mean of a non-empty slice
///
/// # Examples
///
/// ```rust
/// use spc_core::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
/// assert!(mean(&[]).is_err());
/// ```
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptySequence);
    }
    Ok(data.mean())
}

/// Sample standard deviation (N - 1 divisor)
///
/// Two passes: the mean, then the squared deviations from it. Constant data
/// yields exactly `0.0`, so [`clamp_sigma`] can recognise it.
///
/// Fails with [`Error::DegenerateSample`] for fewer than two values.
///
/// # Examples
///
/// ```rust
/// use spc_core::stats::sample_std_dev;
///
/// let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert!((sd - 1.58113883).abs() < 1e-6);
/// ```
pub fn sample_std_dev(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(Error::DegenerateSample { actual: data.len() });
    }
    let center = data.mean();
    let sum_sq: f64 = data.iter().map(|&x| (x - center).powi(2)).sum();
    Ok((sum_sq / (data.len() - 1) as f64).sqrt())
}

/// Minimum and maximum of a non-empty slice
pub fn min_max(data: &[f64]) -> Result<(f64, f64)> {
    let first = *data.first().ok_or(Error::EmptySequence)?;
    Ok(data
        .iter()
        .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))))
}

/// Range (max - min) of a slice, `None` when it has fewer than two values
pub fn range(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    min_max(data).ok().map(|(lo, hi)| hi - lo)
}

/// Replace an exactly-zero sigma with `floor` so it can be used as a divisor
#[inline]
pub fn clamp_sigma(sigma: f64, floor: f64) -> f64 {
    if sigma == 0.0 {
        floor
    } else {
        sigma
    }
}

/// Round to a fixed number of decimal places
///
/// ```rust
/// use spc_core::stats::round_to;
///
/// assert_eq!(round_to(1.23456, 2), 1.23);
/// assert_eq!(round_to(16.135, 1), 16.1);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
