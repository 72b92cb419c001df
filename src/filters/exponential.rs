use super::{MetricVector, MetricsFilter};
use crate::aggregator::SkinMetrics;
use crate::constants::{DEFAULT_EXPONENTIAL_ALPHA, EXPONENTIAL_ALPHA_MAX, EXPONENTIAL_ALPHA_MIN};
use crate::{Error, Result};

/// Exponential smoothing filter.
///
/// The previous state is kept unrounded; only emitted readings are rounded.
/// Rounding the state itself would stall one unit short of a constant
/// input.
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<MetricVector>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(
            alpha > EXPONENTIAL_ALPHA_MIN && alpha <= EXPONENTIAL_ALPHA_MAX,
            "Alpha must be in (0, 1]"
        );
        Self { alpha, last: None }
    }

    /// Check an alpha value without constructing a filter
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if alpha is outside (0, 1]
    pub fn validate_alpha(alpha: f64) -> Result<()> {
        if alpha > EXPONENTIAL_ALPHA_MIN && alpha <= EXPONENTIAL_ALPHA_MAX {
            Ok(())
        } else {
            Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")))
        }
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unrounded smoothed state, `None` before the first reading
    #[must_use]
    pub fn state(&self) -> Option<&MetricVector> {
        self.last.as_ref()
    }
}

impl Default for ExponentialFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXPONENTIAL_ALPHA)
    }
}

impl MetricsFilter for ExponentialFilter {
    fn apply(&mut self, metrics: SkinMetrics) -> SkinMetrics {
        let current = MetricVector::from_metrics(&metrics);

        match self.last {
            // First value passes through untouched
            None => {
                self.last = Some(current);
                metrics
            }
            Some(last) => {
                let smoothed = last.blend(&current, self.alpha);
                self.last = Some(smoothed);
                smoothed.into_metrics(metrics)
            }
        }
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::MetricSource;

    fn reading(value: u8) -> SkinMetrics {
        SkinMetrics {
            texture: value,
            redness: value,
            shine: value,
            overall: value,
            confidence: value,
            source: MetricSource::Mediapipe,
            regions: None,
        }
    }

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(0.5);

        // First value passes through
        assert_eq!(filter.apply(reading(10)), reading(10));

        // Second value is smoothed: 0.5 * 20 + 0.5 * 10
        assert_eq!(filter.apply(reading(20)).texture, 15);
    }

    #[test]
    fn test_default_alpha() {
        let mut filter = ExponentialFilter::default();
        assert_eq!(filter.alpha(), 0.25);
        filter.apply(reading(0));
        // 0.75 * 0 + 0.25 * 100
        assert_eq!(filter.apply(reading(100)).overall, 25);
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialFilter::new(0.9);
        filter1.apply(reading(10));
        assert_eq!(filter1.apply(reading(20)).texture, 19); // 0.9 * 20 + 0.1 * 10

        // Low alpha = more smoothing
        let mut filter2 = ExponentialFilter::new(0.1);
        filter2.apply(reading(10));
        assert_eq!(filter2.apply(reading(20)).texture, 11); // 0.1 * 20 + 0.9 * 10
    }

    #[test]
    fn test_state_stays_unrounded() {
        let mut filter = ExponentialFilter::new(0.25);
        filter.apply(reading(0));
        filter.apply(reading(50));
        assert_eq!(filter.state().unwrap().0[0], 12.5);
    }

    #[test]
    fn test_reset() {
        let mut filter = ExponentialFilter::new(0.25);
        filter.apply(reading(0));
        filter.reset();
        assert!(filter.state().is_none());
        assert_eq!(filter.apply(reading(80)), reading(80));
    }

    #[test]
    fn test_validate_alpha() {
        assert!(ExponentialFilter::validate_alpha(1.0).is_ok());
        assert!(ExponentialFilter::validate_alpha(0.0).is_err());
        assert!(ExponentialFilter::validate_alpha(f64::NAN).is_err());
    }
}
