//! Per-scan orchestration of the two filter stages
//!
//! Each raw scan is gap-filled with the current window, pushed into the
//! temporal history and, once the history is full, aggregated. The same
//! step feeds the flip rate to the window controller (the new size applies
//! from the next scan) and slides the history by one.

use super::aggregator::WeightedAggregator;
use super::config::NoiseFilterConfig;
use super::flip_rate::FlipRateEstimator;
use super::history::TemporalHistory;
use super::spatial::SpatialInterpolator;
use super::window::WindowController;
use crate::common::types::SampleFrame;
use crate::error::Result;
use crate::perception::sensors::{LaserScanFrame, ScanSink, ScanSource};

/// Whether the pipeline has produced output yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// History not yet full, no output
    WarmingUp,
    /// One output per input
    Steady,
}

/// Adaptive spatial/temporal range filter
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    config: NoiseFilterConfig,
    interpolator: SpatialInterpolator,
    history: TemporalHistory,
    estimator: FlipRateEstimator,
    controller: WindowController,
    aggregator: WeightedAggregator,
    last_flip_rate: Option<f64>,
    frames_processed: u64,
    frames_emitted: u64,
}

impl NoiseFilter {
    /// Create a new filter from a validated configuration
    pub fn new(config: NoiseFilterConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Noise filter window limits [{}, {}], gains +{}/-{}",
            config.window_lower_limit,
            config.window_upper_limit,
            config.positive_gain,
            config.negative_gain
        );

        Ok(NoiseFilter {
            controller: WindowController::new(&config),
            config,
            interpolator: SpatialInterpolator::new(),
            history: TemporalHistory::new(),
            estimator: FlipRateEstimator::new(),
            aggregator: WeightedAggregator::default(),
            last_flip_rate: None,
            frames_processed: 0,
            frames_emitted: 0,
        })
    }

    pub fn config(&self) -> &NoiseFilterConfig {
        &self.config
    }

    /// Window size the next scan will be interpolated with
    pub fn window_size(&self) -> usize {
        self.controller.size()
    }

    pub fn state(&self) -> FilterState {
        if self.frames_emitted == 0 {
            FilterState::WarmingUp
        } else {
            FilterState::Steady
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Flip rate measured on the most recent emission
    pub fn last_flip_rate(&self) -> Option<f64> {
        self.last_flip_rate
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Run one scan through the pipeline. Returns the filtered ranges once
    /// the history is full, `None` while warming up.
    pub fn process(&mut self, raw: &SampleFrame) -> Option<SampleFrame> {
        let interpolated = self.interpolator.interpolate(raw, self.controller.size());
        self.frames_processed += 1;

        if !self.history.push(interpolated) {
            log::trace!(
                "Warming up: {}/{} scans buffered",
                self.history.len(),
                self.history.capacity()
            );
            return None;
        }

        let flip_rate = self.estimator.estimate(&self.history);
        self.controller.adjust(flip_rate);
        self.last_flip_rate = Some(flip_rate);

        let output = self.aggregator.aggregate(&self.history);
        self.history.evict_oldest();
        self.frames_emitted += 1;

        Some(output)
    }

    /// Filter a transport scan, keeping its metadata.
    ///
    /// A scan with the wrong number of ranges is rejected before it touches
    /// any filter state.
    pub fn filter_scan(&mut self, scan: &LaserScanFrame) -> Result<Option<LaserScanFrame>> {
        let raw = SampleFrame::from_f32(&scan.ranges)?;
        Ok(self
            .process(&raw)
            .map(|filtered| scan.with_ranges(filtered.to_f32())))
    }

    /// Drain `source` into `sink`. Returns the number of scans published.
    ///
    /// Scans with a bad length are logged and skipped.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<usize>
    where
        S: ScanSource + ?Sized,
        K: ScanSink + ?Sized,
    {
        let mut published = 0;
        while let Some(scan) = source.next_scan() {
            match self.filter_scan(&scan) {
                Ok(Some(filtered)) => {
                    sink.publish(filtered)?;
                    published += 1;
                }
                Ok(None) => {}
                Err(e) => log::warn!("Dropping scan: {}", e),
            }
        }
        Ok(published)
    }
}
