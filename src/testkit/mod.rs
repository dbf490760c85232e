//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: [`ScriptedSource`](source::ScriptedSource), a programmable
//!   price and depth source.
//! - [`notifier`]: Recording and failing notifiers.
//! - [`clock`]: [`ManualClock`](clock::ManualClock) for deterministic ticks.
//! - [`domain`]: Builders for pairs and metrics rows.
//! - [`config`]: Canonical TOML snippets.

pub mod clock;
pub mod config;
pub mod domain;
pub mod notifier;
pub mod source;
