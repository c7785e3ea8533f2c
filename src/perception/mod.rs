//! Perception module: laser scan noise filtering
pub mod filters;
pub mod sensors;

use self::filters::{NoiseFilter, NoiseFilterConfig};
use self::sensors::LaserScanFrame;
use crate::error::{NoiseFilterError, Result};
use crate::lifecycle::{LifecycleNode, LifecycleNodeBase, State};

/// Lifecycle-managed wrapper around the noise filter
pub struct NoiseFilterStack {
    base: LifecycleNodeBase,
    config: NoiseFilterConfig,
    filter: Option<NoiseFilter>,
}

impl NoiseFilterStack {
    /// Create a new, unconfigured stack
    pub fn new(config: NoiseFilterConfig) -> Self {
        NoiseFilterStack {
            base: LifecycleNodeBase::new("noise_filter_stack"),
            config,
            filter: None,
        }
    }

    pub fn state(&self) -> State {
        self.base.get_state()
    }

    /// The underlying filter, once configured
    pub fn filter(&self) -> Option<&NoiseFilter> {
        self.filter.as_ref()
    }

    /// Filter one scan. Only allowed while active.
    pub fn process(&mut self, scan: &LaserScanFrame) -> Result<Option<LaserScanFrame>> {
        if !self.base.is_active() {
            return Err(NoiseFilterError::NotActive(self.base.get_state()));
        }
        match self.filter.as_mut() {
            Some(filter) => filter.filter_scan(scan),
            None => Err(NoiseFilterError::NotActive(self.base.get_state())),
        }
    }
}

impl LifecycleNode for NoiseFilterStack {
    fn on_configure(&mut self) -> Result<()> {
        log::info!("Configuring noise filter stack");
        self.filter = Some(NoiseFilter::new(self.config)?);
        self.base.set_state(State::Inactive);
        Ok(())
    }

    fn on_activate(&mut self) -> Result<()> {
        if self.filter.is_none() || self.base.get_state() == State::Unconfigured {
            return Err(NoiseFilterError::NotActive(self.base.get_state()));
        }
        log::info!("Activating noise filter stack");
        self.base.set_state(State::Active);
        Ok(())
    }

    fn on_deactivate(&mut self) -> Result<()> {
        log::info!("Deactivating noise filter stack");
        self.base.set_state(State::Inactive);
        Ok(())
    }

    fn on_cleanup(&mut self) -> Result<()> {
        log::info!("Cleaning up noise filter stack");
        if let Some(filter) = self.filter.take() {
            log::info!(
                "Dropping filter state after {} scans ({} emitted)",
                filter.frames_processed(),
                filter.frames_emitted()
            );
        }
        self.base.set_state(State::Unconfigured);
        Ok(())
    }
}
