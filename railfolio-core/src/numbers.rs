//! Numeric helpers centralizing finite checks and lossy casts.

use num_traits::cast::cast;

/// Return `value` when finite, otherwise `None`.
#[must_use]
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Clamp a progress value into `[0, 1]`, mapping non-finite input to `None`.
#[must_use]
pub fn unit_clamp(value: f64) -> Option<f64> {
    finite(value).map(|v| v.clamp(0.0, 1.0))
}

/// Divide `numerator` by `denominator`, returning `None` for a non-positive
/// denominator or a non-finite quotient.
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.is_nan() || denominator <= 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

/// Convert a millisecond count to seconds while allowing precision loss in a single location.
#[must_use]
pub fn millis_to_secs(ms: u64) -> f64 {
    cast::<u64, f64>(ms).unwrap_or(0.0) / 1000.0
}

/// Convert a millisecond count to f64 without changing units.
#[must_use]
pub fn millis_to_f64(ms: u64) -> f64 {
    cast::<u64, f64>(ms).unwrap_or(0.0)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Floor a non-negative f64 into a usize, returning 0 for NaN or negative values.
#[must_use]
pub fn floor_to_usize(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    cast::<f64, usize>(value.floor()).unwrap_or(usize::MAX)
}

/// Whole milliseconds elapsed between two host clock readings, 0 when the
/// clock went backwards or produced garbage.
#[must_use]
pub fn elapsed_millis(from_ms: f64, to_ms: f64) -> u64 {
    let delta = to_ms - from_ms;
    if !delta.is_finite() || delta <= 0.0 {
        return 0;
    }
    cast::<f64, u64>(delta.floor()).unwrap_or(u64::MAX)
}
