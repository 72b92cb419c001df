//! Configuration management for the skin metrics pipeline

use crate::constants::{
    DEFAULT_CONFIDENCE_HISTORY, DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_LIGHTING_WINDOW, DEFAULT_MOVING_AVERAGE_WINDOW,
    EXPONENTIAL_ALPHA_MAX, EXPONENTIAL_ALPHA_MIN, LIGHTING_MIN_WINDOW,
};
use crate::filters::{
    exponential::ExponentialFilter, moving_average::MovingAverageFilter, FilterKind, MetricsFilter, NoFilter,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Temporal smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Confidence history configuration
    pub confidence: ConfidenceConfig,

    /// Fallback estimator configuration
    pub fallback: FallbackConfig,

    /// Lighting normalisation configuration
    pub lighting: LightingConfig,
}

/// Temporal smoothing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Smoother type: exponential, moving_average or none
    pub filter: String,

    /// Exponential smoothing factor in (0, 1]
    pub alpha: f64,

    /// Moving average window size
    pub window: usize,
}

/// Confidence history configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Damp confidence with the rolling mean of recent readings
    pub use_history: bool,

    /// Number of recent readings in the rolling mean
    pub history_window: usize,
}

/// Fallback estimator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Add time-driven jitter to fallback readings
    pub jitter: bool,

    /// Fixed seed for reproducible jitter
    pub seed: Option<u64>,
}

/// Lighting normalisation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Normalize lighting before analysis
    pub enabled: bool,

    /// Neighborhood side length, odd
    pub window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            filter: "exponential".to_string(),
            alpha: DEFAULT_EXPONENTIAL_ALPHA,
            window: DEFAULT_MOVING_AVERAGE_WINDOW,
        }
    }
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            use_history: true,
            history_window: DEFAULT_CONFIDENCE_HISTORY,
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { jitter: true, seed: None }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window: DEFAULT_LIGHTING_WINDOW,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Create the configured smoother
    ///
    /// `smoothing.alpha` and `smoothing.window` apply to every alias of
    /// their filter. A parameter written into the filter string itself,
    /// as in `ema:0.4`, takes precedence.
    pub fn create_filter(&self) -> Result<Box<dyn MetricsFilter>> {
        self.validate_smoothing()?;

        match FilterKind::from_name(&self.smoothing.filter) {
            Some(FilterKind::Exponential) => Ok(Box::new(ExponentialFilter::new(self.smoothing.alpha))),
            Some(FilterKind::MovingAverage) => Ok(Box::new(MovingAverageFilter::new(self.smoothing.window))),
            Some(FilterKind::None) => Ok(Box::new(NoFilter)),
            None => crate::filters::create_filter(&self.smoothing.filter),
        }
    }

    fn validate_smoothing(&self) -> Result<()> {
        if !(self.smoothing.alpha > EXPONENTIAL_ALPHA_MIN && self.smoothing.alpha <= EXPONENTIAL_ALPHA_MAX) {
            return Err(Error::ConfigError(
                "Smoothing alpha must be in (0.0, 1.0]".to_string(),
            ));
        }
        if self.smoothing.window == 0 {
            return Err(Error::ConfigError(
                "Moving average window size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate smoother parameters
        self.validate_smoothing()?;
        crate::filters::create_filter(&self.smoothing.filter)
            .map_err(|e| Error::ConfigError(format!("Invalid smoothing filter: {}", e)))?;

        // Validate confidence history
        if self.confidence.history_window == 0 {
            return Err(Error::ConfigError(
                "Confidence history window must be greater than 0".to_string(),
            ));
        }

        // Validate lighting window
        if self.lighting.window < LIGHTING_MIN_WINDOW || self.lighting.window % 2 == 0 {
            return Err(Error::ConfigError(format!(
                "Lighting window must be odd and at least {}",
                LIGHTING_MIN_WINDOW
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Skin Metrics Configuration

# Temporal smoothing
smoothing:
  filter: "exponential"
  alpha: 0.25
  window: 5

# Confidence damping from recent readings
confidence:
  use_history: true
  history_window: 10

# Center-crop fallback when no landmarks are available
fallback:
  jitter: true
  # seed: 42

# Optional lighting normalisation pre-pass
lighting:
  enabled: false
  window: 15
"#;
