//! Utility functions: summary statistics, numeric casts and image file
//! conversion.

pub mod image_conversion;
pub mod safe_cast;

/// Statistical summary of a set of values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Mean value of the data
    pub mean: f64,
    /// Population variance of the data
    pub variance: f64,
    /// Number of values
    pub count: usize,
}

/// Mean and population variance, or `None` for an empty input
#[allow(clippy::cast_precision_loss)] // sample counts are far below 2^52
pub fn calculate_stats<I>(values: I) -> Option<Statistics>
where
    I: IntoIterator<Item = f64>,
{
    // Welford's single-pass update
    let mut count = 0usize;
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for value in values {
        count += 1;
        let delta = value - mean;
        mean += delta / count as f64;
        m2 += delta * (value - mean);
    }

    if count == 0 {
        return None;
    }

    Some(Statistics {
        mean,
        variance: m2 / count as f64,
        count,
    })
}

/// Clamp a score into [0, 100]
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return crate::constants::NEUTRAL_SCORE;
    }
    value.clamp(crate::constants::SCORE_MIN, crate::constants::SCORE_MAX)
}
