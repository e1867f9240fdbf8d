//! Numeric conversion helpers centralizing the engine's float/int casts.

use num_traits::cast::cast;

/// Truncate a f64 toward zero into the i32 range, returning 0 for NaN values.
#[must_use]
pub fn trunc_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).trunc();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Widen an i32 into f64 (lossless).
#[must_use]
pub fn i32_to_f64(value: i32) -> f64 {
    f64::from(value)
}

/// Convert a mileage into hundreds of miles, as used by the hazard curves.
#[must_use]
pub fn hundreds_of_miles(miles: i32) -> f64 {
    i32_to_f64(miles) / 100.0
}
