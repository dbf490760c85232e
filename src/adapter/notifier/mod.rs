//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for chat backends.

pub mod slack;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use slack::{SlackConfig, SlackNotifier};

#[cfg(feature = "telegram")]
pub use telegram::{TelegramConfig, TelegramNotifier};
