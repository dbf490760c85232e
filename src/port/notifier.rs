//! Notifier port for alert delivery.
//!
//! This module defines the trait for posting human-readable alert text to an
//! operator channel, plus the composite registry and the trivial notifiers.

use tracing::{info, warn};

use crate::error::NotifyError;

/// Trait for notification handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `post` should return quickly; slow I/O belongs on a background task
/// - A returned error is logged by the caller and never retried
pub trait Notifier: Send + Sync {
    /// Post a message. `urgent` asks the channel to get everyone's attention.
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError>;
}

/// Registry of notifiers (composite pattern).
///
/// Posts every message to all registered notifiers.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRegistry {
    /// Attempts every notifier and reports the first failure.
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError> {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.post(text, urgent) {
                warn!(error = %e, "Notifier failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn post(&self, _text: &str, _urgent: bool) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// A logging notifier that writes alerts via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError> {
        if urgent {
            warn!(urgent, "{text}");
        } else {
            info!(urgent, "{text}");
        }
        Ok(())
    }
}
