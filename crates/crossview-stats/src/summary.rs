//! Extents and quantiles
//!
//! Non-finite values are treated as missing everywhere in this module.

use thiserror::Error;

/// Errors from statistical helpers
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Probability {0} outside [0, 1]")]
    InvalidProbability(f64),
}

/// Result type for statistical helpers
pub type StatsResult<T> = Result<T, StatsError>;

/// `(min, max)` of the finite values
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The `p`-quantile of the finite values
///
/// Linearly interpolates between the two nearest order statistics
/// (position `(n - 1) * p`). Returns `Ok(None)` when there are no finite
/// values.
pub fn quantile<I: IntoIterator<Item = f64>>(values: I, p: f64) -> StatsResult<Option<f64>> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidProbability(p));
    }

    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Ok(None);
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if p == 0.0 || n < 2 {
        return Ok(Some(sorted[0]));
    }
    if p == 1.0 {
        return Ok(Some(sorted[n - 1]));
    }

    let position = (n - 1) as f64 * p;
    let i0 = position.floor() as usize;
    let lower = sorted[i0];
    let upper = sorted[(i0 + 1).min(n - 1)];
    Ok(Some(lower + (upper - lower) * (position - i0 as f64)))
}
