//! Notifiers that record what they were asked to post.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::NotifyError;
use crate::port::Notifier;

/// One recorded `post` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posted {
    pub text: String,
    pub urgent: bool,
}

/// Records every post. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    posts: Arc<Mutex<Vec<Posted>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> Vec<Posted> {
        self.posts.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.posts.lock().iter().map(|p| p.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError> {
        self.posts.lock().push(Posted {
            text: text.to_string(),
            urgent,
        });
        Ok(())
    }
}

/// Fails the listed call indices (zero-based) and records the rest.
#[derive(Clone, Default)]
pub struct FailingNotifier {
    fail_on: Arc<HashSet<usize>>,
    attempts: Arc<AtomicUsize>,
    delivered: RecordingNotifier,
}

impl FailingNotifier {
    pub fn failing_on(calls: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_on: Arc::new(calls.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Total `post` calls, failed or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// The posts that went through.
    pub fn delivered(&self) -> &RecordingNotifier {
        &self.delivered
    }
}

impl Notifier for FailingNotifier {
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError> {
        let call = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            return Err(NotifyError::Rejected {
                notifier: "failing",
                reason: format!("scripted failure on call {call}"),
            });
        }
        self.delivered.post(text, urgent)
    }
}
