//! Payout schedule reconstruction from the ledger's payout-order index array

use crate::format::format_timestamp;
use crate::models::{Address, Amount, Participant, PayoutOrder, TandaSummary};
use serde::Serialize;

/// Where a cycle sits relative to the running one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionState {
    Completed,
    Current,
    Upcoming,
}

impl CompletionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionState::Completed => "Completed",
            CompletionState::Current => "Current",
            CompletionState::Upcoming => "Upcoming",
        }
    }

    fn for_cycle(display_cycle: u64, current_cycle: u64) -> Self {
        use std::cmp::Ordering;
        match display_cycle.cmp(&current_cycle) {
            Ordering::Less => CompletionState::Completed,
            Ordering::Equal => CompletionState::Current,
            Ordering::Greater => CompletionState::Upcoming,
        }
    }
}

/// Recipient of a cycle's payout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "address", rename_all = "lowercase")]
pub enum Recipient {
    Resolved(Address),
    /// The payout order referenced an index outside the participant list
    Unresolved,
}

impl Recipient {
    pub fn address(&self) -> Option<&Address> {
        match self {
            Recipient::Resolved(a) => Some(a),
            Recipient::Unresolved => None,
        }
    }

    /// Short address, or `"-"` placeholder
    pub fn display(&self) -> String {
        match self {
            Recipient::Resolved(a) => a.short(),
            Recipient::Unresolved => "-".to_string(),
        }
    }
}

/// One cycle of the payout schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    /// 0-based position in the payout order
    pub cycle_index: usize,
    /// 1-based cycle number shown to users
    pub display_cycle: u64,
    pub recipient: Recipient,
    pub completion: CompletionState,
    /// Pooled payout; `None` until the contribution amount resolves
    pub payout_amount: Option<Amount>,
    pub due_label: String,
}

/// Rebuild the per-cycle payout schedule.
///
/// Empty until the payout order is assigned. Indices outside `participants`
/// (or a missing participant list) yield `Recipient::Unresolved` rows.
pub fn build_schedule(
    payout_order: Option<&PayoutOrder>,
    participants: Option<&[Participant]>,
    summary: &TandaSummary,
    contribution_amount: Option<Amount>,
) -> Vec<ScheduleRow> {
    let order = match payout_order {
        Some(order) => order,
        None => return Vec::new(),
    };

    let payout_amount = contribution_amount.map(|c| c.saturating_mul(Amount::from(summary.participants_count)));

    order
        .indices()
        .iter()
        .enumerate()
        .map(|(cycle_index, participant_index)| {
            let display_cycle = cycle_index as u64 + 1;
            let completion = CompletionState::for_cycle(display_cycle, summary.current_cycle);

            let recipient = usize::try_from(*participant_index)
                .ok()
                .and_then(|i| participants.and_then(|list| list.get(i)))
                .map(|p| Recipient::Resolved(p.address))
                .unwrap_or(Recipient::Unresolved);

            let due_label = match completion {
                CompletionState::Completed => "Paid out".to_string(),
                CompletionState::Current => {
                    format!("Due: {}", format_timestamp(Some(summary.next_payout_timestamp)))
                }
                CompletionState::Upcoming => "Upcoming".to_string(),
            };

            ScheduleRow {
                cycle_index,
                display_cycle,
                recipient,
                completion,
                payout_amount,
                due_label,
            }
        })
        .collect()
}

/// Row for the running cycle, if the schedule has one
pub fn current_row(schedule: &[ScheduleRow]) -> Option<&ScheduleRow> {
    schedule.iter().find(|row| row.completion == CompletionState::Current)
}
