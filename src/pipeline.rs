//! Per-stream analysis session.
//!
//! A [`SkinAnalyzer`] owns all mutable state for one camera stream: the
//! smoother, the confidence history and the fallback jitter source.
//! Frames must be fed in arrival order. Independent streams need
//! independent analyzers.

use crate::aggregator::{Aggregator, ComputeOptions, SkinMetrics};
use crate::confidence::ConfidenceTracker;
use crate::config::Config;
use crate::fallback::FallbackEstimator;
use crate::filters::MetricsFilter;
use crate::frame::FrameBuffer;
use crate::landmarks::LandmarkSet;
use crate::lighting::normalize_lighting_with;
use crate::roi::extract_rois;
use crate::Result;
use log::{debug, info};

/// Stateful skin analysis for one stream
pub struct SkinAnalyzer {
    config: Config,
    aggregator: Aggregator,
    filter: Box<dyn MetricsFilter>,
    confidence: ConfidenceTracker,
    frames_processed: u64,
}

impl SkinAnalyzer {
    /// Build an analyzer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` or `FilterError` if the configuration is
    /// invalid
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut fallback = match config.fallback.seed {
            Some(seed) => FallbackEstimator::with_seed(seed),
            None => FallbackEstimator::new(),
        };
        fallback.set_jitter(config.fallback.jitter);

        let filter = config.create_filter()?;
        info!(
            "Skin analyzer ready: filter={}, lighting={}, confidence history={}",
            filter.name(),
            config.lighting.enabled,
            config.confidence.use_history
        );

        Ok(Self {
            aggregator: Aggregator::new(fallback),
            filter,
            confidence: ConfidenceTracker::new(config.confidence.history_window),
            frames_processed: 0,
            config,
        })
    }

    /// Replace the smoother, discarding its state
    pub fn set_filter(&mut self, filter: Box<dyn MetricsFilter>) {
        debug!("Switching smoother to {}", filter.name());
        self.filter = filter;
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn filter_name(&self) -> &str {
        self.filter.name()
    }

    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Rolling mean of recent unsmoothed confidences
    #[must_use]
    pub fn recent_confidence(&self) -> Option<f64> {
        self.confidence.average()
    }

    /// Analyze one frame and return the smoothed reading
    pub fn process(&mut self, frame: &FrameBuffer, landmarks: Option<&LandmarkSet>) -> SkinMetrics {
        let raw = self.process_raw(frame, landmarks);
        self.filter.apply(raw)
    }

    /// Analyze one frame without smoothing; confidence history still
    /// advances
    pub fn process_raw(&mut self, frame: &FrameBuffer, landmarks: Option<&LandmarkSet>) -> SkinMetrics {
        self.frames_processed += 1;

        let normalized;
        let frame = if self.config.lighting.enabled {
            let mut copy = frame.clone();
            // window is checked by Config::validate
            if let Err(e) = normalize_lighting_with(&mut copy, self.config.lighting.window) {
                debug!("Skipping lighting normalisation: {}", e);
            }
            normalized = copy;
            &normalized
        } else {
            frame
        };

        let options = ComputeOptions {
            recent_confidence: if self.config.confidence.use_history {
                self.confidence.average()
            } else {
                None
            },
        };

        let rois = extract_rois(landmarks);
        let metrics = self.aggregator.compute(frame, rois.as_ref(), &options);
        self.confidence.update(f64::from(metrics.confidence));
        metrics
    }

    /// Clear all per-stream state
    pub fn reset(&mut self) {
        debug!("Resetting skin analyzer after {} frames", self.frames_processed);
        self.filter.reset();
        self.confidence.reset();
        self.frames_processed = 0;
    }
}
