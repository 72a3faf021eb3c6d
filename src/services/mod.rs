pub mod actions;
pub mod classifier;
pub mod countdown;
pub mod schedule;
pub mod watcher;

pub use actions::{available_actions, Action, ActionContext, ActionKind};
pub use classifier::{
    can_trigger_payout, cycles_remaining, cycles_remaining_for, effective_cycle, is_current_recipient,
    lifecycle_label, membership_badge, participant_status,
};
pub use countdown::{
    countdown, Clock, CountdownHandle, CountdownPolicy, CountdownResult, CountdownTimer, ManualClock, SystemClock,
    Urgency,
};
pub use schedule::{build_schedule, current_row, CompletionState, Recipient, ScheduleRow};
pub use watcher::{describe_changes, TandaWatcher, WatcherHandle};
