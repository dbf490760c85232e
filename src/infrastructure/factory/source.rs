//! Market data source factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::source::RestBookSource;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{MarketSource, PriceSource};

/// Oracle and monitored sources built from `[sources]`.
pub struct Sources {
    pub oracle: Arc<dyn PriceSource>,
    pub monitored: Arc<dyn MarketSource>,
}

/// Build both REST sources. No requests are issued here.
pub fn build_sources(config: &Config) -> Result<Sources> {
    let oracle_config = config.sources.require_oracle()?.clone();
    let monitored_config = config.sources.require_monitored()?.clone();

    info!(
        oracle = %oracle_config.base_url,
        monitored = %monitored_config.base_url,
        "Configuring market data sources"
    );

    Ok(Sources {
        oracle: Arc::new(RestBookSource::new(oracle_config)?),
        monitored: Arc::new(RestBookSource::new(monitored_config)?),
    })
}
