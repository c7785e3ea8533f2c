//! Instability metric over the temporal window

use super::history::TemporalHistory;

/// Counts transitions between "no return" and "return" over time.
///
/// The result is the mean number of flips per angular index, so it lies in
/// `[0, capacity - 1]` rather than `[0, 1]`. The controller threshold is
/// tuned against this mean.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlipRateEstimator;

impl FlipRateEstimator {
    pub fn new() -> Self {
        FlipRateEstimator
    }

    /// Flips in one time series: adjacent pairs where exactly one value is zero
    pub fn count_flips(series: &[f64]) -> usize {
        series
            .windows(2)
            .filter(|pair| (pair[0] == 0.0) != (pair[1] == 0.0))
            .count()
    }

    /// Mean flips per angular index across the whole history
    pub fn estimate(&self, history: &TemporalHistory) -> f64 {
        let depth = history.len();
        let width = match history.frames().next() {
            Some(frame) => frame.len(),
            None => return 0.0,
        };

        let mut series = vec![0.0; depth];
        let total_flips: usize = (0..width)
            .map(|index| {
                for (age, slot) in series.iter_mut().enumerate() {
                    *slot = history.sample(age, index);
                }
                Self::count_flips(&series)
            })
            .sum();

        total_flips as f64 / width as f64
    }
}
