//! Error types for the scan noise filter

use crate::lifecycle::State;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoiseFilterError {
    #[error("Invalid frame length: expected {expected} ranges, got {actual}")]
    InvalidFrameLength { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Noise filter is not active (current state: {0:?})")]
    NotActive(State),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NoiseFilterError>;
