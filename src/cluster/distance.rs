use crate::error::{Error, Result};

/// Squared Euclidean distance between two vectors of equal length.
///
/// Returns [`Error::DimensionMismatch`] when the lengths differ, so that an
/// invalid pair is never mistaken for two identical vectors.
#[inline]
pub fn distance_squared(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum())
}

/// Euclidean distance (the square root of [`distance_squared`]).
#[inline]
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
    distance_squared(a, b).map(f64::sqrt)
}
