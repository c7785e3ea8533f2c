//! Common utilities and types for the scan noise filter

/// Number of angular samples in one full scan.
pub const RANGES_PER_SCAN: usize = 720;

/// Number of interpolated scans kept for temporal aggregation.
pub const TIME_SLIDING_WINDOW_SIZE: usize = 5;

/// Spatial window used before the controller has made any adjustment.
pub const DEFAULT_WINDOW_SIZE: i64 = 31;

/// Mean flips per angular index above which the window is widened.
pub const FLIP_RATE_THRESHOLD: f64 = 0.08;

/// Temporal weights, oldest scan first.
pub const TEMPORAL_WEIGHTS: [f64; TIME_SLIDING_WINDOW_SIZE] = [1.0, 2.0, 3.0, 4.0, 8.0];

/// Map a possibly out-of-range index onto a circular axis of `len` samples.
///
/// Works for any offset, so neighbourhoods wider than the axis simply wrap
/// more than once.
#[inline]
pub fn wrap_index(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}

/// A sample is a valid return only if it is strictly positive.
#[inline]
pub fn is_valid_range(range: f64) -> bool {
    range > 0.0
}

/// Common types used across the codebase
pub mod types {
    use super::RANGES_PER_SCAN;
    use crate::error::{NoiseFilterError, Result};
    use std::ops::Index;

    /// One full scan of range values on the circular angular axis.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SampleFrame {
        ranges: Vec<f64>,
    }

    impl SampleFrame {
        /// Build a frame, rejecting anything that is not exactly one revolution.
        pub fn new(ranges: Vec<f64>) -> Result<Self> {
            if ranges.len() != RANGES_PER_SCAN {
                return Err(NoiseFilterError::InvalidFrameLength {
                    expected: RANGES_PER_SCAN,
                    actual: ranges.len(),
                });
            }
            Ok(SampleFrame { ranges })
        }

        /// Frame with every sample set to `value`.
        pub fn filled(value: f64) -> Self {
            SampleFrame {
                ranges: vec![value; RANGES_PER_SCAN],
            }
        }

        /// Convert transport ranges into a frame.
        pub fn from_f32(ranges: &[f32]) -> Result<Self> {
            Self::new(ranges.iter().map(|&r| r as f64).collect())
        }

        pub fn len(&self) -> usize {
            self.ranges.len()
        }

        pub fn is_empty(&self) -> bool {
            self.ranges.is_empty()
        }

        pub fn as_slice(&self) -> &[f64] {
            &self.ranges
        }

        pub fn iter(&self) -> std::slice::Iter<'_, f64> {
            self.ranges.iter()
        }

        /// Ranges narrowed back to the transport type.
        pub fn to_f32(&self) -> Vec<f32> {
            self.ranges.iter().map(|&r| r as f32).collect()
        }

        pub(crate) fn from_vec_unchecked(ranges: Vec<f64>) -> Self {
            debug_assert_eq!(ranges.len(), RANGES_PER_SCAN);
            SampleFrame { ranges }
        }
    }

    impl Index<usize> for SampleFrame {
        type Output = f64;

        fn index(&self, index: usize) -> &f64 {
            &self.ranges[index]
        }
    }
}
