//! Filtering algorithms for laser scan ranges
//!
//! ```text
//! raw scan -> SpatialInterpolator -> TemporalHistory --(full)--> WeightedAggregator -> output
//!                    ^                       |
//!                    |                FlipRateEstimator
//!                    +---- WindowController <-+
//! ```
pub mod aggregator;
pub mod config;
pub mod flip_rate;
pub mod history;
pub mod pipeline;
pub mod spatial;
pub mod window;

pub use aggregator::{TemporalWeights, WeightedAggregator};
pub use config::NoiseFilterConfig;
pub use flip_rate::FlipRateEstimator;
pub use history::TemporalHistory;
pub use pipeline::{FilterState, NoiseFilter};
pub use spatial::SpatialInterpolator;
pub use window::{WindowAdjustment, WindowController};
