//! Spatial gap filling
//!
//! Invalid samples (`<= 0`, or NaN) are replaced by the mean of the valid
//! samples inside a circular neighbourhood of `2 * floor(W / 2) + 1` indices
//! centred on the gap. The mean divides by the number of *valid*
//! contributors, not by the neighbourhood width. A gap with no valid
//! neighbour stays at 0.
//!
//! Negative samples count as zero in the sum instead of adding their raw
//! value, so a filled gap is never negative.

use crate::common::types::SampleFrame;
use crate::common::{is_valid_range, wrap_index};

/// Fills dropouts in a single scan from neighbouring returns
#[derive(Debug, Default, Clone, Copy)]
pub struct SpatialInterpolator;

impl SpatialInterpolator {
    pub fn new() -> Self {
        SpatialInterpolator
    }

    /// Interpolate every invalid sample of `raw` using a window of `window_size` samples.
    pub fn interpolate(&self, raw: &SampleFrame, window_size: usize) -> SampleFrame {
        let ranges = raw.as_slice();
        let half_window = (window_size / 2) as isize;

        let interpolated = ranges
            .iter()
            .enumerate()
            .map(|(i, &range)| {
                if is_valid_range(range) {
                    range
                } else {
                    Self::neighbourhood_mean(ranges, i as isize, half_window)
                }
            })
            .collect();

        SampleFrame::from_vec_unchecked(interpolated)
    }

    fn neighbourhood_mean(ranges: &[f64], center: isize, half_window: isize) -> f64 {
        let mut total = 0.0;
        let mut valid_count = 0usize;

        for offset in -half_window..=half_window {
            let range = ranges[wrap_index(center + offset, ranges.len())];
            // Non-positive samples add nothing, so the mean can never go negative.
            if is_valid_range(range) {
                total += range;
                valid_count += 1;
            }
        }

        if valid_count == 0 {
            0.0
        } else {
            total / valid_count as f64
        }
    }
}
