//! Infrastructure configuration modules.

pub mod alerts;
pub mod logging;
pub mod monitor;
pub mod rules;
pub mod settings;
pub mod slack;
pub mod sources;
pub mod telegram;

pub use settings::Config;
