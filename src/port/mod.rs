//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (exchanges, chat services, clocks).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │        Runtime          │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Oracle  │            │  Monitored  │              │ Notifier  │
//! │ Source  │            │   Source    │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`PriceSource`], [`DepthSource`], [`MarketSource`] - Market data
//! - [`Notifier`] - Alert delivery (Slack, Telegram, logging)
//! - [`Clock`] - Monotonic time for the monitor loop
//!
//! Note: the `AlertRule` trait lives in `domain::rule` as it's an internal
//! extension point rather than an external dependency port.

mod clock;
mod notifier;
mod source;

pub use clock::{Clock, SystemClock};
pub use notifier::{LogNotifier, Notifier, NotifierRegistry, NullNotifier};
pub use source::{DepthSource, MarketSource, PriceSource};
