use super::{MetricVector, MetricsFilter};
use crate::aggregator::SkinMetrics;
use std::collections::VecDeque;

/// Moving average filter over the last `window_size` readings
pub struct MovingAverageFilter {
    window_size: usize,
    history: VecDeque<MetricVector>,
}

impl MovingAverageFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            history: VecDeque::with_capacity(window_size),
        }
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl MetricsFilter for MovingAverageFilter {
    #[allow(clippy::cast_precision_loss)] // window sizes are small
    fn apply(&mut self, metrics: SkinMetrics) -> SkinMetrics {
        if self.history.len() >= self.window_size {
            self.history.pop_front();
        }
        self.history.push_back(MetricVector::from_metrics(&metrics));

        let mut sum = [0.0; 5];
        for entry in &self.history {
            for (s, v) in sum.iter_mut().zip(entry.0.iter()) {
                *s += v;
            }
        }
        let count = self.history.len() as f64;
        MetricVector(sum.map(|s| s / count)).into_metrics(metrics)
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
