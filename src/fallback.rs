//! Center-crop estimation for frames without usable landmarks.
//!
//! The fallback never refuses to produce a reading. It samples a fixed
//! square in the middle of the frame, scores it with the single-pass
//! estimators, adds a small time-driven wobble so the reading is not
//! frozen, and reports reduced confidence with no region breakdown.

use crate::aggregator::{MetricSource, SkinMetrics};
use crate::color::Rgb;
use crate::confidence::global_confidence;
use crate::constants::{
    FALLBACK_CONFIDENCE_FLOOR, FALLBACK_CONFIDENCE_SCALE, FALLBACK_CROP_DIVISOR, FALLBACK_MAX_BRIGHTNESS,
    FALLBACK_MIN_BRIGHTNESS, FALLBACK_NOISE_AMPLITUDE, FALLBACK_REDNESS_WEIGHT, FALLBACK_SAMPLE_STEP,
    FALLBACK_SHINE_WEIGHT, FALLBACK_TEXTURE_WEIGHT, FALLBACK_WAVE_AMPLITUDE, FALLBACK_WAVE_FREQUENCIES, SCORE_MAX,
};
use crate::frame::FrameBuffer;
use crate::metrics::{basic_scores, RegionScores};
use crate::sampling::BrightnessWindow;
use crate::utils::clamp_score;
use crate::utils::safe_cast::score_to_u8;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Square crop centered in the frame, side = min(width, height) / 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterCrop {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl CenterCrop {
    #[must_use]
    pub fn of_frame(frame: &FrameBuffer) -> Self {
        let side = frame.width().min(frame.height()) / FALLBACK_CROP_DIVISOR;
        Self {
            x: (frame.width() - side) / 2,
            y: (frame.height() - side) / 2,
            side,
        }
    }
}

/// Sample the center crop at stride 3, keeping brightness in (30, 220)
#[must_use]
pub fn sample_center_crop(frame: &FrameBuffer) -> Vec<Rgb> {
    let crop = CenterCrop::of_frame(frame);
    let window = BrightnessWindow::new(FALLBACK_MIN_BRIGHTNESS, FALLBACK_MAX_BRIGHTNESS);

    (crop.y..crop.y + crop.side)
        .step_by(FALLBACK_SAMPLE_STEP)
        .flat_map(|y| {
            (crop.x..crop.x + crop.side)
                .step_by(FALLBACK_SAMPLE_STEP)
                .map(move |x| (x, y))
        })
        .map(|(x, y)| frame.pixel(x, y))
        .filter(|pixel| window.accepts(pixel))
        .collect()
}

/// Confidence for a fallback reading: scaled-down global heuristic with a
/// floor
#[must_use]
pub fn fallback_confidence(frame: &FrameBuffer) -> f64 {
    clamp_score((global_confidence(frame) * FALLBACK_CONFIDENCE_SCALE).max(FALLBACK_CONFIDENCE_FLOOR))
}

fn unix_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

/// Landmark-free estimator with its own jitter source
#[derive(Debug, Clone)]
pub struct FallbackEstimator {
    rng: StdRng,
    jitter: bool,
}

impl FallbackEstimator {
    /// Entropy-seeded estimator with jitter enabled
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            jitter: true,
        }
    }

    /// Reproducible jitter from a fixed seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            jitter: true,
        }
    }

    /// No jitter: readings depend on the frame only
    #[must_use]
    pub fn without_jitter() -> Self {
        Self {
            rng: StdRng::seed_from_u64(0),
            jitter: false,
        }
    }

    /// Enable or disable jitter
    pub fn set_jitter(&mut self, enabled: bool) {
        self.jitter = enabled;
    }

    /// Estimate using the wall clock as the jitter phase
    pub fn estimate(&mut self, frame: &FrameBuffer) -> SkinMetrics {
        self.estimate_at(frame, unix_seconds())
    }

    /// Estimate with an explicit jitter phase in seconds
    pub fn estimate_at(&mut self, frame: &FrameBuffer, seconds: f64) -> SkinMetrics {
        let samples = sample_center_crop(frame);
        let base = basic_scores(&samples);
        let scores = if self.jitter { self.jittered(base, seconds) } else { base };

        let overall = scores.texture * FALLBACK_TEXTURE_WEIGHT
            + (SCORE_MAX - scores.redness) * FALLBACK_REDNESS_WEIGHT
            + scores.shine * FALLBACK_SHINE_WEIGHT;

        SkinMetrics {
            texture: score_to_u8(scores.texture),
            redness: score_to_u8(scores.redness),
            shine: score_to_u8(scores.shine),
            overall: score_to_u8(overall),
            confidence: score_to_u8(fallback_confidence(frame)),
            source: MetricSource::Fallback,
            regions: None,
        }
    }

    fn jittered(&mut self, base: RegionScores, seconds: f64) -> RegionScores {
        let [wt, wr, ws] = wave_offsets(seconds);
        let mut noise = || self.rng.gen_range(-FALLBACK_NOISE_AMPLITUDE..=FALLBACK_NOISE_AMPLITUDE);

        RegionScores {
            texture: clamp_score(base.texture + wt + noise()),
            redness: clamp_score(base.redness + wr + noise()),
            shine: clamp_score(base.shine + ws + noise()),
        }
    }
}

/// Time-driven part of the jitter for texture, redness and shine
#[must_use]
pub fn wave_offsets(seconds: f64) -> [f64; 3] {
    let [ft, fr, fs] = FALLBACK_WAVE_FREQUENCIES;
    [
        (seconds * ft).sin() * FALLBACK_WAVE_AMPLITUDE,
        (seconds * fr + 1.0).sin() * FALLBACK_WAVE_AMPLITUDE,
        (seconds * fs).cos() * FALLBACK_WAVE_AMPLITUDE,
    ]
}

impl Default for FallbackEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_crop_geometry() {
        let frame = FrameBuffer::filled(300, 150, Rgb::new(128, 128, 128));
        let crop = CenterCrop::of_frame(&frame);
        assert_eq!(crop, CenterCrop { x: 125, y: 50, side: 50 });
    }

    #[test]
    fn test_center_crop_sample_count() {
        let frame = FrameBuffer::filled(90, 90, Rgb::new(128, 128, 128));
        // side 30 at stride 3 -> 10 x 10
        assert_eq!(sample_center_crop(&frame).len(), 100);
    }

    #[test]
    fn test_center_crop_brightness_window() {
        let bright = FrameBuffer::filled(90, 90, Rgb::new(225, 225, 225));
        assert!(sample_center_crop(&bright).is_empty());

        let tiny = FrameBuffer::filled(2, 2, Rgb::new(128, 128, 128));
        assert!(sample_center_crop(&tiny).is_empty());
    }

    #[test]
    fn test_without_jitter_is_stable() {
        let frame = FrameBuffer::filled(120, 120, Rgb::new(128, 128, 128));
        let mut estimator = FallbackEstimator::without_jitter();
        let a = estimator.estimate_at(&frame, 0.0);
        let b = estimator.estimate_at(&frame, 1234.5);
        assert_eq!(a, b);
        assert_eq!(a.texture, 100);
        assert_eq!(a.shine, 0);
        assert_eq!(a.source, MetricSource::Fallback);
        assert!(a.regions.is_none());
    }

    #[test]
    fn test_seeded_jitter_is_reproducible_and_small() {
        let frame = FrameBuffer::filled(120, 120, Rgb::new(128, 128, 128));
        let baseline = FallbackEstimator::without_jitter().estimate_at(&frame, 0.0);

        let mut a = FallbackEstimator::with_seed(42);
        let mut b = FallbackEstimator::with_seed(42);
        for step in 0..20 {
            let t = f64::from(step) * 0.5;
            let ra = a.estimate_at(&frame, t);
            let rb = b.estimate_at(&frame, t);
            assert_eq!(ra, rb);

            let max_jitter = (FALLBACK_WAVE_AMPLITUDE + FALLBACK_NOISE_AMPLITUDE).ceil() as i16;
            assert!((i16::from(ra.redness) - i16::from(baseline.redness)).abs() <= max_jitter);
            assert!(ra.texture <= 100 && ra.shine <= 100);
        }
    }

    #[test]
    fn test_wave_moves_with_phase() {
        let start = wave_offsets(0.0);
        let later = wave_offsets(std::f64::consts::PI);

        // texture: sin(0) vs sin(pi / 2)
        assert!(start[0].abs() < 1e-12);
        assert!((later[0] - FALLBACK_WAVE_AMPLITUDE).abs() < 1e-12);
        // shine: cos(0) vs cos(0.4 pi)
        assert!((start[2] - FALLBACK_WAVE_AMPLITUDE).abs() < 1e-12);
        assert!((start[2] - later[2]).abs() > 1.0);

        for offset in start.iter().chain(later.iter()) {
            assert!(offset.abs() <= FALLBACK_WAVE_AMPLITUDE);
        }
    }

    #[test]
    fn test_jitter_changes_readings() {
        let frame = FrameBuffer::filled(120, 120, Rgb::new(128, 128, 128));
        let baseline = FallbackEstimator::without_jitter().estimate_at(&frame, 0.0);

        let mut estimator = FallbackEstimator::with_seed(42);
        let readings: Vec<SkinMetrics> = (0..10)
            .map(|step| estimator.estimate_at(&frame, f64::from(step) * 0.7))
            .collect();

        assert!(readings.iter().any(|r| r.redness != baseline.redness || r.overall != baseline.overall));
        assert!(readings.windows(2).any(|pair| pair[0] != pair[1]));
        // confidence depends on the frame only
        assert!(readings.iter().all(|r| r.confidence == baseline.confidence));
    }

    #[test]
    fn test_confidence_is_scaled_and_floored() {
        let gray = FrameBuffer::filled(120, 120, Rgb::new(128, 128, 128));
        let global = global_confidence(&gray);
        let confidence = fallback_confidence(&gray);
        assert!(confidence <= global * FALLBACK_CONFIDENCE_SCALE + 1e-9);

        let dark = FrameBuffer::filled(120, 120, Rgb::new(5, 5, 5));
        assert_eq!(fallback_confidence(&dark), FALLBACK_CONFIDENCE_FLOOR);
    }
}
