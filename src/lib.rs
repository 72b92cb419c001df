//! Skin metrics library for on-device facial skin analysis.
//!
//! This library estimates texture, redness and shine of facial skin from a
//! single RGBA frame plus an optional set of face-mesh landmarks:
//! - Region extraction for both cheeks and the forehead
//! - Pixel sampling with a brightness noise gate
//! - Texture, redness and shine estimators per region
//! - A center-crop fallback when no landmarks are available
//! - Temporal smoothing across consecutive frames
//!
//! The estimation pipeline consists of:
//! 1. ROI extraction from normalized landmarks (fails closed)
//! 2. Scaling the regions to pixel space and sampling them
//! 3. Per-region scoring and weighted whole-face aggregation
//! 4. Confidence from exposure, contrast and sample count
//! 5. Optional smoothing of the readings of one stream
//!
//! # Examples
//!
//! ## Single Frame
//!
//! ```no_run
//! use skin_metrics::{aggregator::{Aggregator, ComputeOptions}, roi::extract_rois,
//!                    landmarks::LandmarkSet, utils::image_conversion::load_frame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = load_frame("face.png")?;
//! let landmarks = LandmarkSet::from_file("face_landmarks.json")?;
//!
//! let rois = extract_rois(Some(&landmarks));
//! let mut aggregator = Aggregator::default();
//! let metrics = aggregator.compute(&frame, rois.as_ref(), &ComputeOptions::default());
//!
//! println!("texture={} redness={} shine={} ({})",
//!          metrics.texture, metrics.redness, metrics.shine, metrics.source);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Filters
//!
//! ```
//! use skin_metrics::filters::{MetricsFilter, create_filter};
//! use skin_metrics::aggregator::{MetricSource, SkinMetrics};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut filter = create_filter("exponential:0.25")?;
//!
//! let reading = SkinMetrics {
//!     texture: 70, redness: 30, shine: 40, overall: 65, confidence: 80,
//!     source: MetricSource::Mediapipe, regions: None,
//! };
//!
//! // The first reading passes through unchanged
//! assert_eq!(filter.apply(reading.clone()), reading);
//!
//! filter.reset();
//! # Ok(())
//! # }
//! ```
//!
//! ## Stream Session
//!
//! ```
//! use skin_metrics::{color::Rgb, config::Config, frame::FrameBuffer, pipeline::SkinAnalyzer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut analyzer = SkinAnalyzer::new(Config::default())?;
//! let frame = FrameBuffer::filled(320, 240, Rgb::new(180, 140, 120));
//!
//! // No landmarks: the center-crop fallback answers
//! let metrics = analyzer.process(&frame, None);
//! assert!(metrics.regions.is_none());
//! assert!(metrics.confidence <= 100);
//! # Ok(())
//! # }
//! ```

/// Owned RGBA frame buffer
pub mod frame;

/// Pixel color helpers
pub mod color;

/// Normalized face-mesh landmarks
pub mod landmarks;

/// Region of interest extraction and scaling
pub mod roi;

/// Polygon pixel sampling
pub mod sampling;

/// Texture, redness and shine estimators
pub mod metrics;

/// Confidence estimation
pub mod confidence;

/// Whole-face aggregation
pub mod aggregator;

/// Center-crop fallback estimation
pub mod fallback;

/// Temporal smoothing filters
pub mod filters;

/// Lighting normalisation pre-pass
pub mod lighting;

/// Per-stream analysis session
pub mod pipeline;

/// Utility functions for statistics, casts and image conversion
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use aggregator::{MetricSource, SkinMetrics};
pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use landmarks::LandmarkSet;
pub use pipeline::SkinAnalyzer;
