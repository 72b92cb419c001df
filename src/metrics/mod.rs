//! Per-region skin metric estimators.
//!
//! Every estimator is a pure function over a sample list, clamps to
//! [0, 100] and answers a neutral 50 when fewer than 30 samples are
//! available. Each metric has a single-pass `basic_*` variant (used by the
//! fallback path) and an `enhanced_*` variant (used per region).

/// Texture estimation: local variance, LBP uniformity, gradient smoothness
pub mod texture;

/// Redness estimation from red-channel dominance
pub mod redness;

/// Shine estimation from HSV highlight detection
pub mod shine;

use crate::color::Rgb;
use crate::constants::{MIN_REGION_SAMPLES, NEUTRAL_SCORE};
use crate::frame::FrameBuffer;
use crate::landmarks::Point;
use crate::utils::safe_cast::score_to_u8;
use log::debug;
use serde::{Deserialize, Serialize};

/// Unrounded texture / redness / shine scores for one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionScores {
    pub texture: f64,
    pub redness: f64,
    pub shine: f64,
}

impl RegionScores {
    /// Scores reported when a region has too few samples
    pub const NEUTRAL: Self = Self {
        texture: NEUTRAL_SCORE,
        redness: NEUTRAL_SCORE,
        shine: NEUTRAL_SCORE,
    };

    pub const fn new(texture: f64, redness: f64, shine: f64) -> Self {
        Self {
            texture,
            redness,
            shine,
        }
    }

    /// Round into the externally visible integer form
    #[must_use]
    pub fn rounded(&self) -> MetricScores {
        MetricScores {
            texture: score_to_u8(self.texture),
            redness: score_to_u8(self.redness),
            shine: score_to_u8(self.shine),
        }
    }
}

/// Integer texture / redness / shine scores in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScores {
    pub texture: u8,
    pub redness: u8,
    pub shine: u8,
}

/// Enhanced scores for one pixel-space region polygon
#[must_use]
pub fn score_region(samples: &[Rgb], frame: &FrameBuffer, polygon: &[Point]) -> RegionScores {
    if samples.len() < MIN_REGION_SAMPLES {
        debug!(
            "Region has {} samples (< {MIN_REGION_SAMPLES}), using neutral scores",
            samples.len()
        );
        return RegionScores::NEUTRAL;
    }

    RegionScores {
        texture: texture::enhanced_texture(samples, frame, polygon),
        redness: redness::enhanced_redness(samples),
        shine: shine::enhanced_shine(samples),
    }
}

/// Single-pass scores for a sample list with no region geometry
#[must_use]
pub fn basic_scores(samples: &[Rgb]) -> RegionScores {
    if samples.len() < MIN_REGION_SAMPLES {
        return RegionScores::NEUTRAL;
    }

    RegionScores {
        texture: texture::basic_texture(samples),
        redness: redness::basic_redness(samples),
        shine: shine::basic_shine(samples),
    }
}
