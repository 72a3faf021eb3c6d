//! Periodic re-read of one tanda.
//!
//! `TandaWatcher` runs a read round on a fixed interval, derives the view and
//! publishes it on a watch channel owned by a `WatcherHandle`.

use crate::ledger::{load_reads, LedgerReader};
use crate::normalizer::normalize_reads;
use crate::services::countdown::{Clock, SystemClock};
use crate::view::{TandaView, ViewContext};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

/// Re-reads a tanda on a fixed interval and publishes the derived view
pub struct TandaWatcher<R: LedgerReader + 'static> {
    reader: Arc<R>,
    ctx: ViewContext,
    clock: Arc<dyn Clock>,
    refresh_interval: Duration,
}

impl<R: LedgerReader + 'static> TandaWatcher<R> {
    /// Create a new watcher
    pub fn new(reader: Arc<R>, ctx: ViewContext) -> Self {
        Self {
            reader,
            ctx,
            clock: Arc::new(SystemClock),
            refresh_interval: Duration::from_secs(12), // Default: roughly one block
        }
    }

    /// Set refresh interval
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set wall-clock source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run one read round and derive the view
    pub async fn refresh(&self) -> TandaView {
        let raw = load_reads(self.reader.as_ref(), self.ctx.user.as_ref()).await;
        let reads = normalize_reads(&raw);
        TandaView::derive(&reads, &self.ctx, self.clock.now())
    }

    /// Start watching in a background task
    pub fn start(self) -> WatcherHandle {
        let (tx, rx) = watch::channel(None);
        let refresh_interval = self.refresh_interval;

        let task = tokio::spawn(async move {
            let mut interval = time::interval(refresh_interval);
            info!("Tanda watcher started, refreshing every {:?}", refresh_interval);

            loop {
                interval.tick().await;

                let next = self.refresh().await;
                let previous = tx.borrow().clone();
                match previous {
                    Some(prev) => {
                        for change in describe_changes(&prev, &next) {
                            info!("{}", change);
                        }
                    }
                    None => info!("Tanda loaded: {} ({})", next.lifecycle_label, next.stats.current_cycle),
                }

                tx.send_if_modified(|current| {
                    if current.as_ref() != Some(&next) {
                        *current = Some(next);
                        true
                    } else {
                        false
                    }
                });

                if tx.is_closed() {
                    debug!("No observers left, tanda watcher exiting");
                    break;
                }
            }
        });

        WatcherHandle { rx, task: Some(task) }
    }
}

/// Owner of a running watcher task
#[derive(Debug)]
pub struct WatcherHandle {
    rx: watch::Receiver<Option<TandaView>>,
    task: Option<JoinHandle<()>>,
}

impl WatcherHandle {
    /// Latest derived view, `None` before the first round completes
    pub fn latest(&self) -> Option<TandaView> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TandaView>> {
        self.rx.clone()
    }

    /// Wait for the next published view; `None` once the watcher has stopped
    pub async fn changed(&mut self) -> Option<TandaView> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }

    /// Cancel the watcher task
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Tanda watcher stopped");
        }
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Human-readable changes between two consecutive views
pub fn describe_changes(prev: &TandaView, next: &TandaView) -> Vec<String> {
    let mut changes = Vec::new();

    if prev.state != next.state {
        match (prev.state, next.state) {
            (Some(from), Some(to)) if from.is_behind(to) => {
                // Independent reads can lag each other; keep the newer snapshot as-is.
                debug!("Lifecycle moved from {:?} to {:?} between reads", from, to);
            }
            _ => changes.push(format!(
                "Lifecycle changed: {} -> {}",
                prev.lifecycle_label, next.lifecycle_label
            )),
        }
    }

    if prev.stats.current_cycle != next.stats.current_cycle {
        changes.push(format!(
            "Cycle advanced: {} -> {}",
            prev.stats.current_cycle, next.stats.current_cycle
        ));
    }

    if prev.cycle.recipient != next.cycle.recipient {
        changes.push(format!("Payout recipient is now {}", next.cycle.recipient));
    }

    if !prev.payout_order_assigned && next.payout_order_assigned {
        changes.push("Payout order assigned".to_string());
    }

    if prev.loading && !next.loading {
        changes.push("All tanda reads resolved".to_string());
    }

    for (before, after) in prev.participants.iter().zip(&next.participants) {
        if before.address == after.address && before.status != after.status {
            changes.push(format!(
                "Participant {} is now {}",
                after.short_address, after.status_label
            ));
        }
    }
    if next.participants.len() > prev.participants.len() {
        changes.push(format!(
            "{} participant(s) joined",
            next.participants.len() - prev.participants.len()
        ));
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TandaState, TandaSummary};
    use crate::normalizer::TandaReads;

    fn view(state: TandaState, current_cycle: u64) -> TandaView {
        let reads = TandaReads {
            summary: Some(TandaSummary {
                state,
                current_cycle,
                participants_count: 3,
                total_funds: 0,
                next_payout_timestamp: 0,
            }),
            ..Default::default()
        };
        TandaView::derive(&reads, &ViewContext::default(), 0)
    }

    #[test]
    fn test_forward_transition_reported() {
        let changes = describe_changes(&view(TandaState::Open, 0), &view(TandaState::Active, 1));
        assert!(changes.contains(&"Lifecycle changed: Open for Participants -> Active".to_string()));
        assert!(changes.contains(&"Cycle advanced: 0 of 3 -> 1 of 3".to_string()));
    }

    #[test]
    fn test_stale_backward_read_not_reported() {
        let changes = describe_changes(&view(TandaState::Active, 1), &view(TandaState::Open, 1));
        assert!(changes.is_empty());
    }

    #[test]
    fn test_skipped_lifecycle_step_reported() {
        let changes = describe_changes(&view(TandaState::Open, 0), &view(TandaState::Completed, 3));
        assert!(changes.contains(&"Lifecycle changed: Open for Participants -> Completed".to_string()));
    }

    #[test]
    fn test_unknown_state_reported() {
        let changes = describe_changes(&view(TandaState::Active, 1), &view(TandaState::Unknown(9), 1));
        assert!(changes.contains(&"Lifecycle changed: Active -> Unknown".to_string()));
    }

    #[test]
    fn test_no_changes() {
        assert!(describe_changes(&view(TandaState::Active, 1), &view(TandaState::Active, 1)).is_empty());
    }
}
