//! Tanda Engine
//!
//! Watches one tanda through a ledger snapshot and logs its derived state:
//! - periodic re-read of every ledger query
//! - lifecycle / cycle / standing transitions
//! - live countdown to the next payout

use std::sync::Arc;
use tanda_engine::config::AppConfig;
use tanda_engine::error::{AppError, AppResult};
use tanda_engine::ledger::SnapshotReader;
use tanda_engine::services::{CountdownHandle, CountdownResult, CountdownTimer, SystemClock, TandaWatcher, Urgency};
use tanda_engine::view::{TandaView, ViewContext};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(AppError::Config)?;

    // Initialize tracing/logging with config
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tanda_engine={}", config.log_level).into());
    if config.json_logs() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Tanda engine starting");
    info!("Environment: {}", config.environment);
    info!("Snapshot: {}", config.ledger.snapshot_path.display());
    match &config.ledger.user_address {
        Some(user) => info!("Viewing as {}", user),
        None => warn!("TANDA_USER_ADDRESS not set - actions will not be derived"),
    }

    let reader = Arc::new(SnapshotReader::new(config.ledger.snapshot_path.clone()));
    let ctx = ViewContext {
        user: config.ledger.user_address,
        countdown_policy: config.countdown.policy(),
    };

    let mut watcher = TandaWatcher::new(reader, ctx)
        .with_refresh_interval(config.ledger.refresh_interval())
        .start();
    info!("✓ Watcher started ({}s refresh)", config.ledger.refresh_secs);

    let mut countdown: Option<CountdownHandle> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, shutting down gracefully...");
                break;
            }
            view = watcher.changed() => {
                let Some(view) = view else {
                    error!("Watcher exited unexpectedly");
                    break;
                };
                log_view(&view)?;
                countdown = restart_countdown(countdown, &view, &config);
            }
            result = next_countdown(&mut countdown) => {
                match result {
                    Some(result) => match result.urgency {
                        Urgency::Pending => info!("Next payout in {}", result.display),
                        Urgency::Due => info!("Payout is due now"),
                        Urgency::PastDue => warn!("Payout is past due"),
                    },
                    None => countdown = None,
                }
            }
        }
    }

    watcher.stop();
    if let Some(mut handle) = countdown {
        handle.stop();
    }

    info!("Tanda engine shutdown complete");
    Ok(())
}

fn log_view(view: &TandaView) -> AppResult<()> {
    if view.loading {
        info!("Tanda reads still resolving");
    }
    info!("{}", serde_json::to_string(view)?);
    Ok(())
}

/// Keep the running countdown if the target is unchanged, otherwise replace it
fn restart_countdown(current: Option<CountdownHandle>, view: &TandaView, config: &AppConfig) -> Option<CountdownHandle> {
    let target = view.next_payout_timestamp?;

    match current {
        Some(handle) if handle.target() == target => Some(handle),
        _ => Some(
            CountdownTimer::new(target)
                .with_tick(config.countdown.tick())
                .with_policy(config.countdown.policy())
                .start(SystemClock),
        ),
    }
}

async fn next_countdown(handle: &mut Option<CountdownHandle>) -> Option<CountdownResult> {
    match handle {
        Some(h) => h.changed().await,
        None => futures::future::pending().await,
    }
}
