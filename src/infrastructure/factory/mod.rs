//! Factory functions wiring configuration to adapters.

mod monitor;
mod notifier;
mod source;

pub use monitor::build_monitor;
pub use notifier::build_notifier;
pub use source::{build_sources, Sources};
