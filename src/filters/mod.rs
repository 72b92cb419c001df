//! Temporal smoothing of skin readings across consecutive frames.
//!
//! One filter instance belongs to one video stream. Readings must be fed
//! in arrival order: the filters are order-dependent.

/// Exponential moving average, the default smoother
pub mod exponential;

/// Fixed-window mean smoother
pub mod moving_average;

use crate::aggregator::SkinMetrics;
use crate::constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MOVING_AVERAGE_WINDOW};
use crate::utils::safe_cast::score_to_u8;
use crate::{Error, Result};

/// Trait for all reading smoothers
pub trait MetricsFilter: Send + Sync {
    /// Smooth a reading; `source` and `regions` pass through from the input
    fn apply(&mut self, metrics: SkinMetrics) -> SkinMetrics;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// The numeric fields of a reading as floats, in a fixed order:
/// texture, redness, shine, overall, confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricVector(pub [f64; 5]);

impl MetricVector {
    #[must_use]
    pub fn from_metrics(metrics: &SkinMetrics) -> Self {
        Self([
            f64::from(metrics.texture),
            f64::from(metrics.redness),
            f64::from(metrics.shine),
            f64::from(metrics.overall),
            f64::from(metrics.confidence),
        ])
    }

    /// Round the values into `template`, keeping its source and regions
    #[must_use]
    pub fn into_metrics(self, template: SkinMetrics) -> SkinMetrics {
        let [texture, redness, shine, overall, confidence] = self.0.map(score_to_u8);
        SkinMetrics {
            texture,
            redness,
            shine,
            overall,
            confidence,
            ..template
        }
    }

    /// Component-wise `self * (1 - alpha) + other * alpha`
    #[must_use]
    pub fn blend(&self, other: &Self, alpha: f64) -> Self {
        let mut out = [0.0; 5];
        for (o, (a, b)) in out.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *o = a * (1.0 - alpha) + b * alpha;
        }
        Self(out)
    }
}

/// No-op filter that passes readings through unchanged
pub struct NoFilter;

impl MetricsFilter for NoFilter {
    fn apply(&mut self, metrics: SkinMetrics) -> SkinMetrics {
        metrics
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Smoother families, independent of their parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    None,
    Exponential,
    MovingAverage,
}

impl FilterKind {
    /// Resolve a filter name or alias, ignoring case and surrounding space
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" | "nofilter" => Some(Self::None),
            "exponential" | "ema" => Some(Self::Exponential),
            "moving_average" | "movingaverage" => Some(Self::MovingAverage),
            _ => None,
        }
    }
}

fn parse_param<T: std::str::FromStr>(filter: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::FilterError(format!("Invalid parameter '{value}' for {filter} filter")))
}

/// Create a smoother from a string such as `"exponential:0.25"`
///
/// Accepted names: `none`, `exponential[:alpha]`, `moving_average[:window]`.
///
/// # Errors
///
/// Returns `FilterError` for unknown names, extra or unparseable
/// parameters, alpha outside (0, 1], or a zero window
pub fn create_filter(filter_str: &str) -> Result<Box<dyn MetricsFilter>> {
    let filter_str = filter_str.trim().to_lowercase();
    let mut parts = filter_str.split(':');
    let name = parts.next().unwrap_or_default();
    let param = parts.next();
    if parts.next().is_some() {
        return Err(Error::FilterError(format!("Too many parameters in filter string: {filter_str}")));
    }

    match FilterKind::from_name(name) {
        Some(FilterKind::None) => match param {
            None => Ok(Box::new(NoFilter)),
            Some(_) => Err(Error::FilterError("The none filter takes no parameters".to_string())),
        },
        Some(FilterKind::Exponential) => {
            let alpha: f64 = param.map_or(Ok(DEFAULT_EXPONENTIAL_ALPHA), |p| parse_param(name, p))?;
            exponential::ExponentialFilter::validate_alpha(alpha)?;
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        Some(FilterKind::MovingAverage) => {
            let window: usize = param.map_or(Ok(DEFAULT_MOVING_AVERAGE_WINDOW), |p| parse_param(name, p))?;
            if window == 0 {
                return Err(Error::FilterError("Window size must be greater than 0".to_string()));
            }
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        None => Err(Error::FilterError(format!("Unknown filter type: {name}"))),
    }
}
