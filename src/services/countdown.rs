//! Countdown to a ledger timestamp.
//!
//! `countdown` is the pure derivation. `CountdownTimer` re-derives it on a
//! fixed tick inside a tokio task and publishes the latest result on a watch
//! channel; the returned `CountdownHandle` owns that task and cancels it on
//! `stop()` or drop.

use crate::models::UnixSeconds;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Seconds past the target after which a payout counts as past due.
/// Policy value, not a property of the ledger.
pub const DEFAULT_PAST_DUE_AFTER_SECS: u64 = 86_400;

/// Default sampling interval of the live countdown
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Urgency of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Pending,
    Due,
    PastDue,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Pending => "pending",
            Urgency::Due => "due",
            Urgency::PastDue => "past-due",
        }
    }
}

/// Human string plus urgency for one sampling instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownResult {
    pub display: String,
    pub urgency: Urgency,
}

/// Thresholds applied when classifying a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownPolicy {
    pub past_due_after_secs: u64,
}

impl Default for CountdownPolicy {
    fn default() -> Self {
        Self {
            past_due_after_secs: DEFAULT_PAST_DUE_AFTER_SECS,
        }
    }
}

/// Derive the countdown for `target` at wall-clock `now` (both Unix seconds)
pub fn countdown(target: UnixSeconds, now: i64, policy: &CountdownPolicy) -> CountdownResult {
    let target = i64::try_from(target).unwrap_or(i64::MAX);
    let diff = target.saturating_sub(now);

    if diff <= 0 {
        let overdue = diff.unsigned_abs();
        let urgency = if overdue > policy.past_due_after_secs {
            Urgency::PastDue
        } else {
            Urgency::Due
        };
        return CountdownResult {
            display: "Now".to_string(),
            urgency,
        };
    }

    let days = diff / 86_400;
    let hours = (diff % 86_400) / 3_600;
    let minutes = (diff % 3_600) / 60;
    let seconds = diff % 60;

    CountdownResult {
        display: format!("{}d {}h {}m {}s", days, hours, minutes, seconds),
        urgency: Urgency::Pending,
    }
}

/// Wall-clock source in Unix seconds
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> i64;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock that only moves when told to; used for replays and tests
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Builder for a live countdown
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    target: UnixSeconds,
    tick: Duration,
    policy: CountdownPolicy,
}

impl CountdownTimer {
    /// Countdown to `target` with the default tick and policy
    pub fn new(target: UnixSeconds) -> Self {
        Self {
            target,
            tick: DEFAULT_TICK,
            policy: CountdownPolicy::default(),
        }
    }

    /// Set sampling interval
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set past-due policy
    pub fn with_policy(mut self, policy: CountdownPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Spawn the ticking task. Must be called from within a tokio runtime.
    pub fn start<C: Clock>(self, clock: C) -> CountdownHandle {
        let CountdownTimer { target, tick, policy } = self;
        let (tx, rx) = watch::channel(countdown(target, clock.now(), &policy));

        let task = tokio::spawn(async move {
            let mut interval = time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            debug!("Countdown to {} started, ticking every {:?}", target, tick);

            loop {
                interval.tick().await;

                let next = countdown(target, clock.now(), &policy);
                let changed_urgency = tx.borrow().urgency != next.urgency;
                if changed_urgency {
                    info!("Countdown to {} is now {}", target, next.urgency.as_str());
                }

                tx.send_if_modified(|current| {
                    if *current != next {
                        *current = next;
                        true
                    } else {
                        false
                    }
                });

                if tx.is_closed() {
                    break;
                }
            }
        });

        CountdownHandle {
            target,
            rx,
            task: Some(task),
        }
    }
}

/// Owner of a running countdown task
#[derive(Debug)]
pub struct CountdownHandle {
    target: UnixSeconds,
    rx: watch::Receiver<CountdownResult>,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    pub fn target(&self) -> UnixSeconds {
        self.target
    }

    /// Latest published result
    pub fn current(&self) -> CountdownResult {
        self.rx.borrow().clone()
    }

    /// Independent receiver for another observer
    pub fn subscribe(&self) -> watch::Receiver<CountdownResult> {
        self.rx.clone()
    }

    /// Wait for the next change and return it; `None` once the task has stopped
    pub async fn changed(&mut self) -> Option<CountdownResult> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    /// Cancel the ticking task
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Countdown to {} stopped", self.target);
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: CountdownPolicy = CountdownPolicy {
        past_due_after_secs: DEFAULT_PAST_DUE_AFTER_SECS,
    };

    #[test]
    fn test_pending_breakdown() {
        let now = 1_000_000;
        let target = (now + 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5) as u64;
        let result = countdown(target, now, &POLICY);
        assert_eq!(result.urgency, Urgency::Pending);
        assert_eq!(result.display, "2d 3h 4m 5s");

        let result = countdown(1_000_001, 1_000_000, &POLICY);
        assert_eq!(result.display, "0d 0h 0m 1s");
    }

    #[test]
    fn test_due_window() {
        let target = 1_000_000u64;
        assert_eq!(countdown(target, 1_000_000, &POLICY).urgency, Urgency::Due);
        assert_eq!(countdown(target, 1_000_000 + 86_400, &POLICY).urgency, Urgency::Due);
        assert_eq!(countdown(target, 1_000_000 + 86_401, &POLICY).urgency, Urgency::PastDue);
        assert_eq!(countdown(target, 1_000_000 + 86_401, &POLICY).display, "Now");
    }

    #[test]
    fn test_custom_policy() {
        let policy = CountdownPolicy { past_due_after_secs: 60 };
        assert_eq!(countdown(100, 160, &policy).urgency, Urgency::Due);
        assert_eq!(countdown(100, 161, &policy).urgency, Urgency::PastDue);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(countdown(5_000, 4_000, &POLICY), countdown(5_000, 4_000, &POLICY));
    }

    #[test]
    fn test_urgency_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Urgency::PastDue).unwrap(), "\"past-due\"");
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_countdown_reaches_due() {
        let clock = ManualClock::new(1_000);
        let mut handle = CountdownTimer::new(1_005).start(clock.clone());
        assert_eq!(handle.current().urgency, Urgency::Pending);
        assert_eq!(handle.current().display, "0d 0h 0m 5s");

        clock.set(1_006);
        let next = handle.changed().await.unwrap();
        assert_eq!(next.urgency, Urgency::Due);
        assert_eq!(next.display, "Now");

        handle.stop();
        assert!(handle.changed().await.is_none());
    }
}
