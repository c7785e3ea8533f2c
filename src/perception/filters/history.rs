//! Sliding window of recent interpolated scans

use crate::common::types::SampleFrame;
use crate::common::TIME_SLIDING_WINDOW_SIZE;
use std::collections::VecDeque;

/// FIFO of the most recent interpolated scans, oldest at the front.
#[derive(Debug, Clone)]
pub struct TemporalHistory {
    frames: VecDeque<SampleFrame>,
    capacity: usize,
}

impl Default for TemporalHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalHistory {
    pub fn new() -> Self {
        TemporalHistory {
            frames: VecDeque::with_capacity(TIME_SLIDING_WINDOW_SIZE),
            capacity: TIME_SLIDING_WINDOW_SIZE,
        }
    }

    /// Append the newest scan. Returns `true` once the window is full.
    ///
    /// Callers must evict after a full push; the window never holds more
    /// than `capacity` scans.
    pub fn push(&mut self, frame: SampleFrame) -> bool {
        debug_assert!(self.frames.len() < self.capacity);
        self.frames.push_back(frame);
        self.is_full()
    }

    /// Drop the oldest scan
    pub fn evict_oldest(&mut self) -> Option<SampleFrame> {
        self.frames.pop_front()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Scans from oldest to newest
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &SampleFrame> + '_ {
        self.frames.iter()
    }

    /// Value at `index` in the scan `age` positions from the front
    pub(crate) fn sample(&self, age: usize, index: usize) -> f64 {
        self.frames[age][index]
    }
}
