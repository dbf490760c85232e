//! Monitor runtime: sampling, the periodic loop and status rendering.

mod monitor;
mod sampler;
mod status;
pub(crate) mod validate;

pub use monitor::{
    AlertRouting, MonitorLoop, MonitorLoopBuilder, MonitorState, SnapshotHandle, DEFAULT_INTERVAL,
    DEFAULT_POLL_INTERVAL,
};
pub use sampler::{trigger_prices, MetricsSampler, SampleReport, DEFAULT_DELTA_PCT};
pub use status::render_status;
pub use validate::{MAX_INTERVAL, MAX_POLL_INTERVAL};
