//! Weighted temporal averaging

use super::history::TemporalHistory;
use crate::common::types::SampleFrame;
use crate::common::{TEMPORAL_WEIGHTS, TIME_SLIDING_WINDOW_SIZE};
use nalgebra::SVector;

pub type TemporalWeights = SVector<f64, TIME_SLIDING_WINDOW_SIZE>;

/// Fixed-coefficient FIR filter across the temporal window, newest scan weighted most.
#[derive(Debug, Clone)]
pub struct WeightedAggregator {
    weights: TemporalWeights,
    divisor: f64,
}

impl Default for WeightedAggregator {
    fn default() -> Self {
        Self::new(TemporalWeights::from(TEMPORAL_WEIGHTS))
    }
}

impl WeightedAggregator {
    /// The normalisation divisor is the weight sum, so the two cannot drift apart.
    pub fn new(weights: TemporalWeights) -> Self {
        WeightedAggregator {
            divisor: weights.sum(),
            weights,
        }
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    /// Combine a full history into one scan
    pub fn aggregate(&self, history: &TemporalHistory) -> SampleFrame {
        debug_assert!(history.is_full());
        let width = history.frames().next().map_or(0, |frame| frame.len());

        let output = (0..width)
            .map(|index| {
                let column = TemporalWeights::from_fn(|age, _| history.sample(age, index));
                column.dot(&self.weights) / self.divisor
            })
            .collect();

        SampleFrame::from_vec_unchecked(output)
    }
}
