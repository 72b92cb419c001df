//! Shine estimation from the fraction of highlight pixels.

use crate::color::{Hsv, Rgb};
use crate::constants::{
    HIGHLIGHT_MAX_SATURATION, HIGHLIGHT_MIN_VALUE, MIN_REGION_SAMPLES, NEUTRAL_SCORE, OILY_HUE_MAX, OILY_HUE_MIN,
    OILY_MAX_SATURATION, OILY_MIN_VALUE, SHINE_FRACTION_GAIN, SHINE_FRACTION_OFFSET, SPECULAR_MAX_CHANNEL_SPREAD,
    SPECULAR_MIN_VALUE,
};
use crate::utils::clamp_score;

/// Kind of highlight a pixel represents, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Very bright with near-equal channels
    Specular,
    /// Bright and desaturated
    Plain,
    /// Bright, moderately saturated, yellow-orange hue
    Oily,
}

fn is_plain(hsv: &Hsv) -> bool {
    hsv.value > HIGHLIGHT_MIN_VALUE && hsv.saturation < HIGHLIGHT_MAX_SATURATION
}

fn is_specular(pixel: &Rgb, hsv: &Hsv) -> bool {
    hsv.value > SPECULAR_MIN_VALUE && pixel.channel_spread() < SPECULAR_MAX_CHANNEL_SPREAD
}

fn is_oily(hsv: &Hsv) -> bool {
    hsv.value > OILY_MIN_VALUE && hsv.saturation < OILY_MAX_SATURATION && (OILY_HUE_MIN..=OILY_HUE_MAX).contains(&hsv.hue)
}

/// Bright and desaturated, whatever else the pixel also matches
#[must_use]
pub fn is_plain_highlight(pixel: &Rgb) -> bool {
    is_plain(&pixel.to_hsv())
}

/// Classify a pixel; specular takes precedence over plain, then oily
#[must_use]
pub fn classify_highlight(pixel: &Rgb) -> Option<Highlight> {
    let hsv = pixel.to_hsv();

    if is_specular(pixel, &hsv) {
        Some(Highlight::Specular)
    } else if is_plain(&hsv) {
        Some(Highlight::Plain)
    } else if is_oily(&hsv) {
        Some(Highlight::Oily)
    } else {
        None
    }
}

#[allow(clippy::cast_precision_loss)] // sample counts are small
fn fraction_to_score(highlights: usize, total: usize) -> f64 {
    let fraction = highlights as f64 / total as f64;
    clamp_score((fraction - SHINE_FRACTION_OFFSET) * SHINE_FRACTION_GAIN)
}

/// Single-pass shine: plain highlights only
#[must_use]
pub fn basic_shine(samples: &[Rgb]) -> f64 {
    if samples.len() < MIN_REGION_SAMPLES {
        return NEUTRAL_SCORE;
    }
    let highlights = samples.iter().filter(|p| is_plain_highlight(p)).count();
    fraction_to_score(highlights, samples.len())
}

/// Shine counting plain, specular and oily highlights
#[must_use]
pub fn enhanced_shine(samples: &[Rgb]) -> f64 {
    if samples.len() < MIN_REGION_SAMPLES {
        return NEUTRAL_SCORE;
    }
    let highlights = samples.iter().filter(|p| classify_highlight(p).is_some()).count();
    fraction_to_score(highlights, samples.len())
}
