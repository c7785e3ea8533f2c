//! Adaptive noise filter for 2D laser scans.
//!
//! Dropouts are filled from neighbouring returns with a window whose width
//! tracks how unstable the data is, then the last few scans are blended
//! with fixed temporal weights.
pub mod common;
pub mod error;
pub mod lifecycle;
pub mod perception;

pub use crate::common::types::SampleFrame;
pub use crate::error::{NoiseFilterError, Result};
pub use crate::perception::filters::{FilterState, NoiseFilter, NoiseFilterConfig};
pub use crate::perception::sensors::{LaserScanFrame, ScanMeta, ScanSink, ScanSource};
pub use crate::perception::NoiseFilterStack;
