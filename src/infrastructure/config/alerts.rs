//! Alert routing configuration.

use serde::Deserialize;

use crate::runtime::AlertRouting;

/// Alert routing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsConfig {
    /// Rules whose alerts are posted as urgent.
    #[serde(default)]
    pub urgent_rules: Vec<String>,
    /// Post a diagnostic for every pair skipped in a pass.
    #[serde(default)]
    pub notify_skipped_pairs: bool,
}

impl AlertsConfig {
    #[must_use]
    pub fn routing(&self) -> AlertRouting {
        AlertRouting {
            urgent_rules: self.urgent_rules.iter().cloned().collect(),
            notify_skipped_pairs: self.notify_skipped_pairs,
        }
    }
}
