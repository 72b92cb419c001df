//! Confidence estimation for a skin reading.
//!
//! Confidence combines a global exposure heuristic (brightness and
//! contrast of the whole frame, sampled sparsely) with how many usable
//! pixels the regions yielded, optionally damped by the recent average.

use crate::constants::{
    ADEQUATE_SCORE, BASE_CONFIDENCE_WEIGHT, BRIGHTNESS_WEIGHT, CONFIDENCE_MAX_BRIGHTNESS, CONFIDENCE_MIN_BRIGHTNESS,
    CONFIDENCE_MIN_VARIANCE, CONFIDENCE_PIXEL_STRIDE, CONTRAST_WEIGHT, INADEQUATE_BRIGHTNESS_SCORE,
    LOW_CONTRAST_BASE_SCORE, RECENT_CONFIDENCE_WEIGHT, SAMPLE_ADEQUACY_WEIGHT, SCORE_MAX, TARGET_TOTAL_SAMPLES,
};
use crate::frame::FrameBuffer;
use crate::roi::{Region, RoiSet};
use crate::sampling::sample_region;
use crate::utils::{calculate_stats, clamp_score};
use std::collections::VecDeque;

/// Brightness and contrast heuristic over every 16th pixel of the frame
#[must_use]
pub fn global_confidence(frame: &FrameBuffer) -> f64 {
    let Some(stats) = calculate_stats(
        (0..frame.pixel_count())
            .step_by(CONFIDENCE_PIXEL_STRIDE)
            .map(|i| frame.pixel_at_index(i).brightness()),
    ) else {
        return 0.0;
    };

    let brightness_score = if stats.mean > CONFIDENCE_MIN_BRIGHTNESS && stats.mean < CONFIDENCE_MAX_BRIGHTNESS {
        ADEQUATE_SCORE
    } else {
        INADEQUATE_BRIGHTNESS_SCORE
    };

    let contrast_score = if stats.variance > CONFIDENCE_MIN_VARIANCE {
        ADEQUATE_SCORE
    } else {
        LOW_CONTRAST_BASE_SCORE + stats.variance / CONFIDENCE_MIN_VARIANCE * (ADEQUATE_SCORE - LOW_CONTRAST_BASE_SCORE)
    };

    clamp_score(brightness_score * BRIGHTNESS_WEIGHT + contrast_score * CONTRAST_WEIGHT)
}

/// Share of the 200-sample target reached, in [0, 100]
#[must_use]
#[allow(clippy::cast_precision_loss)] // sample counts are small
pub fn sample_adequacy(total_samples: usize) -> f64 {
    clamp_score(total_samples as f64 / TARGET_TOTAL_SAMPLES * SCORE_MAX)
}

/// Blend the global heuristic with sample adequacy and the optional
/// recent average
#[must_use]
pub fn confidence_from_sample_count(frame: &FrameBuffer, total_samples: usize, recent: Option<f64>) -> f64 {
    let base = global_confidence(frame);
    let current = base * BASE_CONFIDENCE_WEIGHT + sample_adequacy(total_samples) * SAMPLE_ADEQUACY_WEIGHT;

    let blended = match recent.filter(|r| r.is_finite()) {
        Some(recent) => current * (1.0 - RECENT_CONFIDENCE_WEIGHT) + clamp_score(recent) * RECENT_CONFIDENCE_WEIGHT,
        None => current,
    };
    clamp_score(blended)
}

/// Confidence for a frame and its pixel-space regions
#[must_use]
pub fn estimate_confidence(frame: &FrameBuffer, scaled_rois: &RoiSet, recent: Option<f64>) -> f64 {
    let total_samples = Region::ALL
        .iter()
        .map(|&region| sample_region(frame, scaled_rois.get(region)).len())
        .sum();
    confidence_from_sample_count(frame, total_samples, recent)
}

/// Rolling window of recently emitted confidences for one stream
#[derive(Debug, Clone)]
pub struct ConfidenceTracker {
    window_size: usize,
    history: VecDeque<f64>,
}

impl ConfidenceTracker {
    /// Create a tracker averaging the last `window_size` confidences
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            history: VecDeque::with_capacity(window_size),
        }
    }

    /// Record a confidence, evicting the oldest beyond the window
    pub fn update(&mut self, confidence: f64) {
        if self.window_size == 0 {
            return;
        }
        if self.history.len() >= self.window_size {
            self.history.pop_front();
        }
        self.history.push_back(confidence);
    }

    /// Mean of the recorded confidences, `None` until one is recorded
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        calculate_stats(self.history.iter().copied()).map(|stats| stats.mean)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Reset the tracker
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
