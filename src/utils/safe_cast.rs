//! Safe casting utilities for scores and pixel coordinates

/// Round a score to the nearest integer in [0, 100]
///
/// NaN maps to the neutral score.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100 first
pub fn score_to_u8(value: f64) -> u8 {
    crate::utils::clamp_score(value).round() as u8
}

/// Clamp and convert f64 to i64 for pixel coordinates, flooring first
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)] // clamping ensures safe truncation
pub fn f64_floor_clamp(value: f64, min: i64, max: i64) -> i64 {
    // Ensure min <= max
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.floor().clamp(min as f64, max as f64);
    (clamped as i64).clamp(min, max)
}

/// Clamp and convert f64 to i64 for pixel coordinates, rounding up first
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)] // clamping ensures safe truncation
pub fn f64_ceil_clamp(value: f64, min: i64, max: i64) -> i64 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.ceil().clamp(min as f64, max as f64);
    (clamped as i64).clamp(min, max)
}

/// Clamp a float channel value into a byte
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255 first
pub fn f64_to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
