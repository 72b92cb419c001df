//! Redness estimation from red-channel dominance.

use crate::color::Rgb;
use crate::constants::{
    MIN_REGION_SAMPLES, NEUTRAL_SCORE, REDNESS_NOISE_MAX, REDNESS_NOISE_MIN, REDNESS_RANGE_MAX, REDNESS_RANGE_MIN,
    REDNESS_RATIO_WEIGHTS, SCORE_MAX,
};
use crate::utils::{calculate_stats, clamp_score};

/// Map a mean redness ratio from [0.35, 1.4] onto [0, 100]
#[must_use]
pub fn ratio_to_score(ratio: f64) -> f64 {
    clamp_score((ratio - REDNESS_RANGE_MIN) / (REDNESS_RANGE_MAX - REDNESS_RANGE_MIN) * SCORE_MAX)
}

/// Blend of three red-dominance ratios for one pixel
#[must_use]
pub fn blended_ratio(pixel: &Rgb) -> f64 {
    let r = f64::from(pixel.r);
    let g = f64::from(pixel.g);
    let b = f64::from(pixel.b);
    let max = r.max(g).max(b);

    let red_over_rest = r / (g + b + 1.0);
    let red_excess = (r - g) / (r + g + b + 1.0);
    let red_of_max = r / (max + 1.0);

    let [w0, w1, w2] = REDNESS_RATIO_WEIGHTS;
    red_over_rest * w0 + red_excess * w1 + red_of_max * w2
}

/// Single-pass redness: mean R/(G+B+1)
#[must_use]
pub fn basic_redness(samples: &[Rgb]) -> f64 {
    if samples.len() < MIN_REGION_SAMPLES {
        return NEUTRAL_SCORE;
    }
    calculate_stats(
        samples
            .iter()
            .map(|p| f64::from(p.r) / (f64::from(p.g) + f64::from(p.b) + 1.0)),
    )
    .map_or(NEUTRAL_SCORE, |stats| ratio_to_score(stats.mean))
}

/// Blended-ratio redness with noise rejection.
///
/// Samples whose blended ratio falls outside (0.3, 2.0) are discarded; if
/// none survive the score is neutral.
#[must_use]
pub fn enhanced_redness(samples: &[Rgb]) -> f64 {
    if samples.len() < MIN_REGION_SAMPLES {
        return NEUTRAL_SCORE;
    }
    calculate_stats(
        samples
            .iter()
            .map(blended_ratio)
            .filter(|&ratio| ratio > REDNESS_NOISE_MIN && ratio < REDNESS_NOISE_MAX),
    )
    .map_or(NEUTRAL_SCORE, |stats| ratio_to_score(stats.mean))
}
