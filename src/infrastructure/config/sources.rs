//! Market data source configuration.

use serde::Deserialize;

use crate::adapter::source::RestSourceConfig;
use crate::error::ConfigError;

/// Oracle and monitored REST endpoints. Both are required to run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    pub oracle: Option<RestSourceConfig>,
    pub monitored: Option<RestSourceConfig>,
}

impl SourcesConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, source) in [
            ("sources.oracle", &self.oracle),
            ("sources.monitored", &self.monitored),
        ] {
            let Some(source) = source else { continue };
            source.depth_url().map_err(|e| ConfigError::InvalidValue {
                field,
                reason: format!("'{}': {e}", source.base_url),
            })?;
            if source.timeout_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "timeout_ms must be greater than 0".to_string(),
                });
            }
            if source.cache_ttl_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "cache_ttl_ms must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The oracle source, or an error naming the missing section.
    pub fn require_oracle(&self) -> Result<&RestSourceConfig, ConfigError> {
        self.oracle.as_ref().ok_or(ConfigError::MissingField {
            field: "sources.oracle",
        })
    }

    /// The monitored source, or an error naming the missing section.
    pub fn require_monitored(&self) -> Result<&RestSourceConfig, ConfigError> {
        self.monitored.as_ref().ok_or(ConfigError::MissingField {
            field: "sources.monitored",
        })
    }
}
