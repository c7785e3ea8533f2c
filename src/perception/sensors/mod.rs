//! Sensor-side data model and the seams to the scan transport

use crate::error::Result;
use std::collections::VecDeque;

/// Everything in a laser scan except the ranges. Passed through the filter untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanMeta {
    pub stamp_sec: i32,
    pub stamp_nanosec: u32,
    pub frame_id: String,
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
    pub time_increment: f32,
    pub scan_time: f32,
    pub range_min: f32,
    pub range_max: f32,
    pub intensities: Vec<f32>,
}

/// A laser scan as it travels between the transport and the filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaserScanFrame {
    pub meta: ScanMeta,
    pub ranges: Vec<f32>,
}

impl LaserScanFrame {
    pub fn new(meta: ScanMeta, ranges: Vec<f32>) -> Self {
        LaserScanFrame { meta, ranges }
    }

    /// Same metadata, different ranges
    pub fn with_ranges(&self, ranges: Vec<f32>) -> Self {
        LaserScanFrame {
            meta: self.meta.clone(),
            ranges,
        }
    }
}

/// Producer of raw scans
pub trait ScanSource {
    /// Next available scan, `None` once the source is exhausted
    fn next_scan(&mut self) -> Option<LaserScanFrame>;
}

/// Consumer of filtered scans
pub trait ScanSink {
    fn publish(&mut self, scan: LaserScanFrame) -> Result<()>;
}

/// In-memory source, used for replays and tests
#[derive(Debug, Default)]
pub struct QueuedScanSource {
    scans: VecDeque<LaserScanFrame>,
}

impl QueuedScanSource {
    pub fn new<I: IntoIterator<Item = LaserScanFrame>>(scans: I) -> Self {
        QueuedScanSource {
            scans: scans.into_iter().collect(),
        }
    }
}

impl ScanSource for QueuedScanSource {
    fn next_scan(&mut self) -> Option<LaserScanFrame> {
        self.scans.pop_front()
    }
}

impl ScanSink for Vec<LaserScanFrame> {
    fn publish(&mut self, scan: LaserScanFrame) -> Result<()> {
        self.push(scan);
        Ok(())
    }
}
