//! Noise filter parameters

use crate::error::{NoiseFilterError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Bounds and gains for the adaptive window controller.
///
/// Read once at startup and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoiseFilterConfig {
    pub window_lower_limit: i64,
    pub window_upper_limit: i64,
    pub negative_gain: i64,
    pub positive_gain: i64,
}

impl Default for NoiseFilterConfig {
    fn default() -> Self {
        NoiseFilterConfig {
            window_lower_limit: 31,
            window_upper_limit: 101,
            negative_gain: 3,
            positive_gain: 20,
        }
    }
}

/// Layout of a ROS 2 parameters file: `<node>: ros__parameters: {...}`
#[derive(Debug, Deserialize)]
struct RosParamsSection {
    #[serde(default, rename = "ros__parameters")]
    parameters: NoiseFilterConfig,
}

fn integral(key: &str, value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(NoiseFilterError::Config(format!(
            "{} must be an integer, got {}",
            key, value
        )));
    }
    Ok(value as i64)
}

impl NoiseFilterConfig {
    /// Configure from a parameter map. Unknown keys are ignored.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        if let Some(&lower) = params.get("window_lower_limit") {
            self.window_lower_limit = integral("window_lower_limit", lower)?;
        }

        if let Some(&upper) = params.get("window_upper_limit") {
            self.window_upper_limit = integral("window_upper_limit", upper)?;
        }

        if let Some(&gain) = params.get("negative_gain") {
            self.negative_gain = integral("negative_gain", gain)?;
        }

        if let Some(&gain) = params.get("positive_gain") {
            self.positive_gain = integral("positive_gain", gain)?;
        }

        self.validate()
    }

    /// Check the bounds and gains are usable
    pub fn validate(&self) -> Result<()> {
        if self.window_lower_limit < 0 {
            return Err(NoiseFilterError::Config(
                "window_lower_limit must be non-negative".to_string(),
            ));
        }
        if self.window_lower_limit > self.window_upper_limit {
            return Err(NoiseFilterError::Config(format!(
                "window_lower_limit ({}) exceeds window_upper_limit ({})",
                self.window_lower_limit, self.window_upper_limit
            )));
        }
        if self.negative_gain < 0 {
            return Err(NoiseFilterError::Config(
                "negative_gain must be non-negative".to_string(),
            ));
        }
        if self.positive_gain < 0 {
            return Err(NoiseFilterError::Config(
                "positive_gain must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a flat YAML mapping of parameters
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: NoiseFilterConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the section for `node_name` from a ROS 2 parameters file
    pub fn from_ros_params_str(text: &str, node_name: &str) -> Result<Self> {
        let mut sections: HashMap<String, RosParamsSection> = serde_yaml::from_str(text)?;
        let section = sections.remove(node_name).ok_or_else(|| {
            NoiseFilterError::Config(format!("no parameters for node '{}'", node_name))
        })?;
        section.parameters.validate()?;
        Ok(section.parameters)
    }

    pub fn from_ros_params_file<P: AsRef<Path>>(path: P, node_name: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ros_params_str(&text, node_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NoiseFilterConfig::default();
        assert_eq!(config.window_lower_limit, 31);
        assert_eq!(config.window_upper_limit, 101);
        assert_eq!(config.negative_gain, 3);
        assert_eq!(config.positive_gain, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configure_from_map() {
        let mut config = NoiseFilterConfig::default();
        let mut params = HashMap::new();
        params.insert("window_upper_limit".to_string(), 151.0);
        params.insert("positive_gain".to_string(), 10.0);
        params.insert("lookahead_distance".to_string(), 0.8);

        config.configure(&params).unwrap();
        assert_eq!(config.window_upper_limit, 151);
        assert_eq!(config.positive_gain, 10);
        assert_eq!(config.window_lower_limit, 31);
    }

    #[test]
    fn test_configure_rejects_fractional() {
        let mut config = NoiseFilterConfig::default();
        let mut params = HashMap::new();
        params.insert("negative_gain".to_string(), 2.5);
        assert!(matches!(
            config.configure(&params),
            Err(NoiseFilterError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = NoiseFilterConfig {
            window_lower_limit: 50,
            window_upper_limit: 40,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_lower_limit_floor() {
        let zero = NoiseFilterConfig {
            window_lower_limit: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_ok());

        let negative = NoiseFilterConfig {
            window_lower_limit: -1,
            ..Default::default()
        };
        assert!(matches!(negative.validate(), Err(NoiseFilterError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_negative_gain() {
        let config = NoiseFilterConfig {
            positive_gain: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flat_yaml_fills_missing_with_defaults() {
        let config = NoiseFilterConfig::from_yaml_str("window_upper_limit: 81\n").unwrap();
        assert_eq!(config.window_upper_limit, 81);
        assert_eq!(config.negative_gain, 3);
    }

    #[test]
    fn test_ros_params_file_layout() {
        let text = "\
noise_filter:
  ros__parameters:
    window_lower_limit: 21
    window_upper_limit: 61
    negative_gain: 2
    positive_gain: 15
";
        let config = NoiseFilterConfig::from_ros_params_str(text, "noise_filter").unwrap();
        assert_eq!(
            config,
            NoiseFilterConfig {
                window_lower_limit: 21,
                window_upper_limit: 61,
                negative_gain: 2,
                positive_gain: 15,
            }
        );

        assert!(NoiseFilterConfig::from_ros_params_str(text, "other_node").is_err());
    }
}
