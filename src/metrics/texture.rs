//! Texture (smoothness) estimation.
//!
//! The enhanced score blends three views of the same region:
//! - local variance of consecutive grayscale samples
//! - a uniform local-binary-pattern ratio over the samples laid out on a
//!   square pseudo-grid
//! - variance of Sobel gradient magnitudes across the region's bounding box
//!
//! Higher scores mean smoother skin.

use crate::color::Rgb;
use crate::constants::{
    GRADIENT_STEP, GRADIENT_VARIANCE_SCALE, LBP_UNIFORM_TRANSITIONS, LOCAL_VARIANCE_SCALE, LOCAL_VARIANCE_WINDOW,
    MIN_REGION_SAMPLES, MIN_TEXTURE_SAMPLES, NEUTRAL_SCORE, SCORE_MAX, TEXTURE_GRADIENT_WEIGHT, TEXTURE_LBP_WEIGHT,
    TEXTURE_VARIANCE_WEIGHT,
};
use crate::frame::FrameBuffer;
use crate::landmarks::Point;
use crate::sampling::PixelBounds;
use crate::utils::{calculate_stats, clamp_score};
use image::{ImageBuffer, Luma};
use imageproc::filter::filter3x3;

/// Single-pass texture score: local variance only
#[must_use]
pub fn basic_texture(samples: &[Rgb]) -> f64 {
    if samples.len() < MIN_REGION_SAMPLES {
        return NEUTRAL_SCORE;
    }
    let gray: Vec<f64> = samples.iter().map(Rgb::grayscale).collect();
    local_variance_score(&gray)
}

/// Blended texture score for a region
#[must_use]
pub fn enhanced_texture(samples: &[Rgb], frame: &FrameBuffer, polygon: &[Point]) -> f64 {
    if samples.len() < MIN_REGION_SAMPLES {
        return NEUTRAL_SCORE;
    }
    let gray: Vec<f64> = samples.iter().map(Rgb::grayscale).collect();

    let variance = local_variance_score(&gray);
    let lbp = lbp_uniformity_score(&gray);
    let gradient = gradient_smoothness_score(frame, polygon);

    clamp_score(variance * TEXTURE_VARIANCE_WEIGHT + lbp * TEXTURE_LBP_WEIGHT + gradient * TEXTURE_GRADIENT_WEIGHT)
}

/// Mean variance over a sliding window of grayscale values, inverted so
/// rough input scores low
#[must_use]
pub fn local_variance_score(gray: &[f64]) -> f64 {
    if gray.len() < MIN_TEXTURE_SAMPLES {
        return NEUTRAL_SCORE;
    }

    let Some(stats) = calculate_stats(
        gray.windows(LOCAL_VARIANCE_WINDOW)
            .filter_map(|window| calculate_stats(window.iter().copied()))
            .map(|s| s.variance),
    ) else {
        return NEUTRAL_SCORE;
    };

    clamp_score(SCORE_MAX - stats.mean * LOCAL_VARIANCE_SCALE)
}

/// Neighbor offsets around the center of a `side`-wide grid, in circular
/// order starting top-left
#[allow(clippy::cast_possible_wrap)] // side is the square root of a slice length
fn lbp_offsets(side: usize) -> [isize; 8] {
    let s = side as isize;
    [-s - 1, -s, -s + 1, 1, s + 1, s, s - 1, -1]
}

/// 8-bit pattern of neighbors at least as bright as the center
fn lbp_pattern(gray: &[f64], center: usize, offsets: &[isize; 8]) -> u8 {
    let value = gray[center];
    offsets.iter().enumerate().fold(0u8, |pattern, (bit, &offset)| {
        let neighbor = gray[center.wrapping_add_signed(offset)];
        if neighbor >= value {
            pattern | (1 << bit)
        } else {
            pattern
        }
    })
}

/// Number of 0/1 changes walking once around the circular pattern
#[must_use]
pub fn circular_transitions(pattern: u8) -> u32 {
    (pattern ^ pattern.rotate_right(1)).count_ones()
}

/// Percentage of interior samples whose local binary pattern is uniform
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn lbp_uniformity_score(gray: &[f64]) -> f64 {
    let n = gray.len();
    if n < MIN_TEXTURE_SAMPLES {
        return NEUTRAL_SCORE;
    }

    let side = (n as f64).sqrt().floor() as usize;
    let offsets = lbp_offsets(side);
    let first = side + 1;
    let last = n - side - 2;

    let mut total = 0usize;
    let mut uniform = 0usize;
    for center in first..=last {
        total += 1;
        if circular_transitions(lbp_pattern(gray, center, &offsets)) <= LBP_UNIFORM_TRANSITIONS {
            uniform += 1;
        }
    }

    if total == 0 {
        return NEUTRAL_SCORE;
    }
    clamp_score(uniform as f64 / total as f64 * SCORE_MAX)
}

/// Single-channel float image
pub type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Grayscale copy of the inclusive rectangle `[x0, x1] x [y0, y1]`
#[allow(clippy::cast_possible_truncation)] // luma is in [0, 255]
fn gray_crop(frame: &FrameBuffer, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayF32 {
    ImageBuffer::from_fn(x1 - x0 + 1, y1 - y0 + 1, |x, y| Luma([frame.luma(x0 + x, y0 + y) as f32]))
}

/// Per-pixel Sobel gradient magnitude; border pixels use clamped
/// neighbors
#[must_use]
pub fn sobel_magnitudes(gray: &GrayF32) -> GrayF32 {
    let gx: GrayF32 = filter3x3(gray, &SOBEL_X);
    let gy: GrayF32 = filter3x3(gray, &SOBEL_Y);
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([gx.get_pixel(x, y)[0].hypot(gy.get_pixel(x, y)[0])])
    })
}

/// Smoothness from the spread of gradient magnitudes over the polygon's
/// bounding box
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // bounds are clamped to the frame
pub fn gradient_smoothness_score(frame: &FrameBuffer, polygon: &[Point]) -> f64 {
    let Some(bounds) = PixelBounds::of_polygon(polygon, frame.width(), frame.height()) else {
        return NEUTRAL_SCORE;
    };

    // Sobel needs a one-pixel margin
    let x0 = bounds.min_x.max(1);
    let y0 = bounds.min_y.max(1);
    let x1 = bounds.max_x.min(i64::from(frame.width()) - 2);
    let y1 = bounds.max_y.min(i64::from(frame.height()) - 2);
    if x0 > x1 || y0 > y1 {
        return NEUTRAL_SCORE;
    }

    // crop keeps the margin so every sampled pixel has real neighbors
    let crop = gray_crop(frame, (x0 - 1) as u32, (y0 - 1) as u32, (x1 + 1) as u32, (y1 + 1) as u32);
    let magnitudes = sobel_magnitudes(&crop);

    let values: Vec<f64> = (1..crop.height() - 1)
        .step_by(GRADIENT_STEP)
        .flat_map(|y| (1..crop.width() - 1).step_by(GRADIENT_STEP).map(move |x| (x, y)))
        .map(|(x, y)| f64::from(magnitudes.get_pixel(x, y)[0]))
        .collect();

    if values.len() < MIN_TEXTURE_SAMPLES {
        return NEUTRAL_SCORE;
    }

    calculate_stats(values).map_or(NEUTRAL_SCORE, |stats| {
        clamp_score(SCORE_MAX - stats.variance * GRADIENT_VARIANCE_SCALE)
    })
}
