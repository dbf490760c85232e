//! Handler for the `run` command.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::cli::{output, RunArgs};
use crate::domain::Percent;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::{build_monitor, build_notifier, build_sources};
use crate::port::{Clock, SystemClock};
use crate::runtime::{render_status, SnapshotHandle};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;

    // CLI overrides
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }

    config.init_logging();

    let notifier = build_notifier(&config)?;
    let sources = build_sources(&config)?;
    let monitor = build_monitor(&config, sources, notifier)?;

    info!(
        pairs = ?config.monitor.pairs,
        rules = ?config.rules.enabled,
        interval_secs = config.monitor.interval_secs,
        "marketwatch starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let status_task = args.status_every.filter(|secs| *secs > 0).map(|secs| {
        tokio::spawn(print_status(
            monitor.snapshot_handle(),
            config.monitor.top_price_delta_pct,
            Duration::from_secs(secs),
            shutdown_rx.clone(),
        ))
    });

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let monitor_task = tokio::spawn(monitor.run(clock, shutdown_rx));

    signal::ctrl_c().await?;
    info!("Shutdown signal received");
    // Receivers may already be gone if the monitor task ended.
    let _ = shutdown_tx.send(true);

    if let Err(e) = monitor_task.await {
        error!(error = %e, "Monitor task failed");
    }
    if let Some(task) = status_task {
        task.abort();
    }

    info!("marketwatch stopped");
    Ok(())
}

/// Print the latest snapshot every `every` until shutdown.
async fn print_status(
    snapshot: SnapshotHandle,
    delta_pct: Percent,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(every);
    // The first tick fires immediately, before any pass has completed.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = snapshot.load();
                output::section(&format!(
                    "Status at {}",
                    current.taken_at().format("%Y-%m-%d %H:%M:%S UTC")
                ));
                output::block(&render_status(&current, delta_pct));
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
