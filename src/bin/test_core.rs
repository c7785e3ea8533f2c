use anyhow::{Context, Result};
use scan_noise_filter::common::RANGES_PER_SCAN;
use scan_noise_filter::lifecycle::{bring_up, tear_down};
use scan_noise_filter::perception::sensors::QueuedScanSource;
use scan_noise_filter::{
    LaserScanFrame, NoiseFilterConfig, NoiseFilterStack, ScanMeta, ScanSource,
};

const NODE_NAME: &str = "noise_filter";
const SCAN_COUNT: i32 = 40;

/// A round room of 4 m radius. Early scans lose many returns, later ones almost none.
fn synthetic_scan(seq: i32) -> LaserScanFrame {
    let dropout_period = if seq < SCAN_COUNT / 2 { 5 } else { 97 };
    let ranges = (0..RANGES_PER_SCAN)
        .map(|i| {
            if (i * 7 + seq as usize * 13) % dropout_period == 0 {
                0.0
            } else {
                4.0 + 0.05 * ((i as f32) * 0.1).sin()
            }
        })
        .collect();

    let angle_increment = std::f32::consts::TAU / RANGES_PER_SCAN as f32;
    LaserScanFrame::new(
        ScanMeta {
            stamp_sec: seq,
            frame_id: "laser".to_string(),
            angle_min: 0.0,
            angle_max: std::f32::consts::TAU - angle_increment,
            angle_increment,
            scan_time: 0.1,
            range_min: 0.15,
            range_max: 12.0,
            ..Default::default()
        },
        ranges,
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Initializing noise filter core...");

    // Optional ROS 2 params file as first argument
    let config = match std::env::args().nth(1) {
        Some(path) => NoiseFilterConfig::from_ros_params_file(&path, NODE_NAME)
            .with_context(|| format!("loading parameters from {}", path))?,
        None => NoiseFilterConfig::default(),
    };
    log::info!("Using parameters: {:?}", config);

    let mut stack = NoiseFilterStack::new(config);
    bring_up(&mut stack)?;

    let mut source = QueuedScanSource::new((0..SCAN_COUNT).map(synthetic_scan));
    let mut published = 0;
    while let Some(scan) = source.next_scan() {
        let dropouts = scan.ranges.iter().filter(|&&r| r <= 0.0).count();
        let output = stack.process(&scan)?;

        let filter = stack
            .filter()
            .context("filter missing while the stack is active")?;
        match output {
            Some(filtered) => {
                published += 1;
                let remaining = filtered.ranges.iter().filter(|&&r| r <= 0.0).count();
                log::info!(
                    "scan {:>2}: {:>3} dropouts in, {:>3} out, flip rate {:.4}, next window {}",
                    scan.meta.stamp_sec,
                    dropouts,
                    remaining,
                    filter.last_flip_rate().unwrap_or_default(),
                    filter.window_size()
                );
            }
            None => log::info!(
                "scan {:>2}: warming up ({} buffered)",
                scan.meta.stamp_sec,
                filter.history_len()
            ),
        }
    }

    log::info!("Published {} of {} scans", published, SCAN_COUNT);
    tear_down(&mut stack)?;
    Ok(())
}
