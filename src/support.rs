use crate::error::{MiningError, Result};

/// Checks a ratio threshold lies in (0, 1].
pub fn validate_ratio(name: &'static str, value: f64) -> Result<f64> {
    if value.is_nan() || value <= 0.0 || value > 1.0 {
        return Err(MiningError::InvalidThreshold {
            name,
            range: "(0, 1]",
            value,
        });
    }
    Ok(value)
}

pub fn validate_lift(value: f64) -> Result<f64> {
    if value.is_nan() || value <= 0.0 {
        return Err(MiningError::InvalidThreshold {
            name: "minimum lift",
            range: "(0, inf)",
            value,
        });
    }
    Ok(value)
}

/// Absolute support threshold for `min_support` over `num_transactions`.
///
/// `round` is half-up for the positive products seen here. The result is
/// clamped to 1: an itemset no transaction contains is never frequent.
pub fn min_count(min_support: f64, num_transactions: usize) -> u32 {
    let count = (min_support * num_transactions as f64).round() as u32;
    count.max(1)
}
