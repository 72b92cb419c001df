//! Whole-face aggregation of per-region scores into a [`SkinMetrics`]
//! reading.

use crate::confidence::confidence_from_sample_count;
use crate::constants::{
    IDEAL_SHINE, OVERALL_REDNESS_WEIGHT, OVERALL_SHINE_WEIGHT, OVERALL_TEXTURE_WEIGHT, REDNESS_REGION_WEIGHTS,
    SCORE_MAX, SHINE_BALANCE_PENALTY, SHINE_REGION_WEIGHTS, TEXTURE_REGION_WEIGHTS,
};
use crate::fallback::FallbackEstimator;
use crate::frame::FrameBuffer;
use crate::metrics::{score_region, MetricScores, RegionScores};
use crate::roi::{Region, RoiSet};
use crate::sampling::sample_region;
use crate::utils::clamp_score;
use crate::utils::safe_cast::score_to_u8;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which estimation path produced a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricSource {
    /// Landmark regions were available
    Mediapipe,
    /// Center-crop estimate without landmarks
    Fallback,
}

impl fmt::Display for MetricSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mediapipe => f.write_str("mediapipe"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Rounded scores per region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBreakdown {
    pub left_cheek: MetricScores,
    pub right_cheek: MetricScores,
    pub forehead: MetricScores,
}

impl RegionBreakdown {
    #[must_use]
    pub fn get(&self, region: Region) -> &MetricScores {
        match region {
            Region::LeftCheek => &self.left_cheek,
            Region::RightCheek => &self.right_cheek,
            Region::Forehead => &self.forehead,
        }
    }
}

/// One skin reading. Every numeric field is an integer in [0, 100].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinMetrics {
    pub texture: u8,
    pub redness: u8,
    pub shine: u8,
    pub overall: u8,
    pub confidence: u8,
    pub source: MetricSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<RegionBreakdown>,
}

/// Per-call inputs beyond the frame and regions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputeOptions {
    /// Caller-maintained rolling mean of recent confidences
    pub recent_confidence: Option<f64>,
}

/// Unrounded whole-face scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceScores {
    pub texture: f64,
    pub redness: f64,
    pub shine: f64,
}

fn weighted(weights: [f64; 3], values: [f64; 3]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

/// Weight the three regions into whole-face scores.
///
/// Texture leans on the cheeks, redness ignores the forehead, shine leans
/// on the forehead.
#[must_use]
pub fn combine_regions(left: &RegionScores, right: &RegionScores, forehead: &RegionScores) -> FaceScores {
    FaceScores {
        texture: clamp_score(weighted(
            TEXTURE_REGION_WEIGHTS,
            [left.texture, right.texture, forehead.texture],
        )),
        redness: clamp_score(weighted(
            REDNESS_REGION_WEIGHTS,
            [left.redness, right.redness, forehead.redness],
        )),
        shine: clamp_score(weighted(SHINE_REGION_WEIGHTS, [left.shine, right.shine, forehead.shine])),
    }
}

/// Penalise shine on both sides of the modeled ideal
#[must_use]
pub fn shine_balance(shine: f64) -> f64 {
    clamp_score(SCORE_MAX - (shine - IDEAL_SHINE).abs() * SHINE_BALANCE_PENALTY)
}

/// Overall wellness from texture, redness balance and shine balance
#[must_use]
pub fn overall_score(scores: &FaceScores) -> f64 {
    clamp_score(
        scores.texture * OVERALL_TEXTURE_WEIGHT
            + (SCORE_MAX - scores.redness) * OVERALL_REDNESS_WEIGHT
            + shine_balance(scores.shine) * OVERALL_SHINE_WEIGHT,
    )
}

/// Landmark-region path: deterministic for a given frame and regions.
///
/// `rois` holds normalized coordinates; they are scaled to the frame here.
#[must_use]
pub fn analyze_rois(frame: &FrameBuffer, rois: &RoiSet, options: &ComputeOptions) -> SkinMetrics {
    let scaled = rois.scale(frame.width(), frame.height());

    let mut total_samples = 0;
    let [left, right, forehead] = Region::ALL.map(|region| {
        let polygon = scaled.get(region);
        let samples = sample_region(frame, polygon);
        total_samples += samples.len();
        score_region(&samples, frame, polygon)
    });

    let face = combine_regions(&left, &right, &forehead);
    let confidence = confidence_from_sample_count(frame, total_samples, options.recent_confidence);

    SkinMetrics {
        texture: score_to_u8(face.texture),
        redness: score_to_u8(face.redness),
        shine: score_to_u8(face.shine),
        overall: score_to_u8(overall_score(&face)),
        confidence: score_to_u8(confidence),
        source: MetricSource::Mediapipe,
        regions: Some(RegionBreakdown {
            left_cheek: left.rounded(),
            right_cheek: right.rounded(),
            forehead: forehead.rounded(),
        }),
    }
}

/// Chooses between the landmark-region path and the fallback path
#[derive(Debug)]
pub struct Aggregator {
    fallback: FallbackEstimator,
}

impl Aggregator {
    #[must_use]
    pub fn new(fallback: FallbackEstimator) -> Self {
        Self { fallback }
    }

    /// Compute a reading; without regions the fallback estimator answers
    pub fn compute(&mut self, frame: &FrameBuffer, rois: Option<&RoiSet>, options: &ComputeOptions) -> SkinMetrics {
        match rois {
            Some(rois) => analyze_rois(frame, rois, options),
            None => {
                debug!("No regions available, using center-crop fallback");
                self.fallback.estimate(frame)
            }
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(FallbackEstimator::new())
    }
}
