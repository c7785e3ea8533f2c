//! Adaptive control of the spatial window size

use super::config::NoiseFilterConfig;
use crate::common::{DEFAULT_WINDOW_SIZE, FLIP_RATE_THRESHOLD};

/// Direction of the last adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAdjustment {
    Widened,
    Narrowed,
}

/// Grows the window on unstable data and shrinks it on stable data.
#[derive(Debug, Clone)]
pub struct WindowController {
    size: i64,
    lower_limit: i64,
    upper_limit: i64,
    positive_gain: i64,
    negative_gain: i64,
}

impl WindowController {
    /// Start at the default size, clamped into the configured bounds.
    ///
    /// `config` is expected to have passed [`NoiseFilterConfig::validate`].
    pub fn new(config: &NoiseFilterConfig) -> Self {
        WindowController {
            size: DEFAULT_WINDOW_SIZE.clamp(config.window_lower_limit, config.window_upper_limit),
            lower_limit: config.window_lower_limit,
            upper_limit: config.window_upper_limit,
            positive_gain: config.positive_gain,
            negative_gain: config.negative_gain,
        }
    }

    /// Current window size, in samples
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Apply one control step for the given mean flip count
    pub fn adjust(&mut self, flip_rate: f64) -> WindowAdjustment {
        let previous = self.size;
        let adjustment = if flip_rate > FLIP_RATE_THRESHOLD {
            self.size = self.size.saturating_add(self.positive_gain);
            WindowAdjustment::Widened
        } else {
            self.size = self.size.saturating_sub(self.negative_gain);
            WindowAdjustment::Narrowed
        };
        self.size = self.size.clamp(self.lower_limit, self.upper_limit);

        log::debug!(
            "flip rate {:.4}: window {:?} {} -> {}",
            flip_rate,
            adjustment,
            previous,
            self.size
        );
        adjustment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_default() {
        let controller = WindowController::new(&NoiseFilterConfig::default());
        assert_eq!(controller.size(), 31);
    }

    #[test]
    fn test_initial_size_clamped_into_bounds() {
        let config = NoiseFilterConfig {
            window_lower_limit: 41,
            window_upper_limit: 91,
            ..Default::default()
        };
        assert_eq!(WindowController::new(&config).size(), 41);
    }

    #[test]
    fn test_widens_above_threshold() {
        let mut controller = WindowController::new(&NoiseFilterConfig::default());
        assert_eq!(controller.adjust(0.5), WindowAdjustment::Widened);
        assert_eq!(controller.size(), 51);
        controller.adjust(0.5);
        controller.adjust(0.5);
        assert_eq!(controller.size(), 91);
        controller.adjust(0.5);
        assert_eq!(controller.size(), 101);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut controller = WindowController::new(&NoiseFilterConfig::default());
        controller.adjust(1.0);
        assert_eq!(controller.adjust(FLIP_RATE_THRESHOLD), WindowAdjustment::Narrowed);
        assert_eq!(controller.size(), 48);
    }

    #[test]
    fn test_narrows_down_to_lower_limit() {
        let mut controller = WindowController::new(&NoiseFilterConfig::default());
        controller.adjust(0.0);
        assert_eq!(controller.size(), 31);
    }
}
