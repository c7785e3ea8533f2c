use anyhow::{anyhow, Error, Result};
use rclrs::{
    Context, CreateBasicExecutor, Node, RclrsErrorFilter, SpinOptions, QOS_PROFILE_DEFAULT,
};
use scan_noise_filter::lifecycle::{bring_up, tear_down};
use scan_noise_filter::{LaserScanFrame, NoiseFilterConfig, NoiseFilterStack, ScanMeta};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use builtin_interfaces::msg::Time;
use sensor_msgs::msg::LaserScan;
use std_msgs::msg::Header;

const DEFAULT_INPUT_TOPIC: &str = "/scan";
const DEFAULT_OUTPUT_TOPIC: &str = "/scan/noise_filter";

/// Wrap `handler` so the callback only holds a weak reference to `target`.
///
/// The node owns its subscription, so a strong reference here would keep the
/// node alive forever and its `Drop` would never run.
fn weak_callback<T, M>(target: &Arc<T>, handler: fn(&T, M)) -> impl Fn(M) + Send + Sync + 'static
where
    T: Send + Sync + 'static,
    M: 'static,
{
    let target: Weak<T> = Arc::downgrade(target);
    move |msg: M| {
        if let Some(target) = target.upgrade() {
            handler(&target, msg);
        }
    }
}

struct NoiseFilterNode {
    stack: Mutex<NoiseFilterStack>,
    node: Arc<Node>,
    scan_publisher: Arc<rclrs::Publisher<LaserScan>>,
    scan_subscription: Mutex<Option<Arc<rclrs::Subscription<LaserScan>>>>,
}

fn scan_from_msg(msg: LaserScan) -> LaserScanFrame {
    LaserScanFrame::new(
        ScanMeta {
            stamp_sec: msg.header.stamp.sec,
            stamp_nanosec: msg.header.stamp.nanosec,
            frame_id: msg.header.frame_id,
            angle_min: msg.angle_min,
            angle_max: msg.angle_max,
            angle_increment: msg.angle_increment,
            time_increment: msg.time_increment,
            scan_time: msg.scan_time,
            range_min: msg.range_min,
            range_max: msg.range_max,
            intensities: msg.intensities,
        },
        msg.ranges,
    )
}

fn msg_from_scan(scan: LaserScanFrame) -> LaserScan {
    let meta = scan.meta;
    LaserScan {
        header: Header {
            stamp: Time {
                sec: meta.stamp_sec,
                nanosec: meta.stamp_nanosec,
            },
            frame_id: meta.frame_id,
        },
        angle_min: meta.angle_min,
        angle_max: meta.angle_max,
        angle_increment: meta.angle_increment,
        time_increment: meta.time_increment,
        scan_time: meta.scan_time,
        range_min: meta.range_min,
        range_max: meta.range_max,
        ranges: scan.ranges,
        intensities: meta.intensities,
    }
}

/// Read the controller parameters declared on the node
fn declare_filter_parameters(node: &Node) -> Result<NoiseFilterConfig> {
    let defaults = NoiseFilterConfig::default();
    let declared = [
        ("window_lower_limit", defaults.window_lower_limit),
        ("window_upper_limit", defaults.window_upper_limit),
        ("negative_gain", defaults.negative_gain),
        ("positive_gain", defaults.positive_gain),
    ];

    let mut params = HashMap::new();
    for (name, default) in declared {
        let parameter = node
            .declare_parameter::<i64>(name)
            .default(default)
            .mandatory()
            .map_err(|e| anyhow!("failed to declare parameter {}: {:?}", name, e))?;
        params.insert(name.to_string(), parameter.get() as f64);
    }

    let mut config = defaults;
    config.configure(&params)?;
    Ok(config)
}

fn declare_topic(node: &Node, name: &str, default: &str) -> Result<String> {
    let parameter = node
        .declare_parameter::<Arc<str>>(name)
        .default(Arc::from(default))
        .mandatory()
        .map_err(|e| anyhow!("failed to declare parameter {}: {:?}", name, e))?;
    Ok(parameter.get().to_string())
}

impl NoiseFilterNode {
    pub fn new(executor: &rclrs::Executor, name: &str) -> Result<Arc<Self>> {
        let node = executor.create_node(name)?;

        let config = declare_filter_parameters(&node)?;
        let input_topic = declare_topic(&node, "input_topic", DEFAULT_INPUT_TOPIC)?;
        let output_topic = declare_topic(&node, "output_topic", DEFAULT_OUTPUT_TOPIC)?;

        log::info!("Using parameters: {:?}", config);
        log::info!("Topics: input={}, output={}", input_topic, output_topic);

        let mut stack = NoiseFilterStack::new(config);
        bring_up(&mut stack)?;

        // Only the newest scan matters, keep queues at depth 1
        let qos = QOS_PROFILE_DEFAULT.keep_last(1);
        let scan_publisher = node.create_publisher::<LaserScan>(&output_topic, qos)?;

        let noise_filter_node = Arc::new(NoiseFilterNode {
            stack: Mutex::new(stack),
            node,
            scan_publisher,
            scan_subscription: None.into(),
        });

        let scan_subscription = noise_filter_node.node.create_subscription::<LaserScan, _>(
            &input_topic,
            qos,
            weak_callback(&noise_filter_node, NoiseFilterNode::scan_callback),
        )?;

        match noise_filter_node.scan_subscription.lock() {
            Ok(mut slot) => *slot = Some(scan_subscription),
            Err(_) => return Err(anyhow!("scan subscription lock poisoned")),
        }

        Ok(noise_filter_node)
    }

    fn scan_callback(&self, msg: LaserScan) {
        let scan = scan_from_msg(msg);

        let output = match self.stack.lock() {
            Ok(mut stack) => stack.process(&scan),
            Err(_) => {
                log::error!("Noise filter lock poisoned, dropping scan");
                return;
            }
        };

        match output {
            Ok(Some(filtered)) => {
                if let Err(e) = self.scan_publisher.publish(&msg_from_scan(filtered)) {
                    log::error!("Failed to publish filtered scan: {}", e);
                }
            }
            Ok(None) => log::debug!("Filter warming up, nothing to publish"),
            Err(e) => log::warn!("Dropping scan: {}", e),
        }
    }
}

impl Drop for NoiseFilterNode {
    fn drop(&mut self) {
        if let Ok(mut stack) = self.stack.lock() {
            if let Err(e) = tear_down(&mut *stack) {
                log::error!("Failed to shut down noise filter: {}", e);
            }
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Initializing noise filter node...");

    let mut executor = Context::default_from_env()?.create_basic_executor();

    let _noise_filter_node = NoiseFilterNode::new(&executor, "noise_filter")?;

    log::info!("Noise filter node initialized. Starting to spin...");
    log::info!("To use with parameters: ros2 run scan_noise_filter noise_filter_node --ros-args --params-file /path/to/scan_noise_filter/config/noise_filter_params.yaml");

    executor
        .spin(SpinOptions::default())
        .first_error()
        .map_err(|err| err.into())
}
