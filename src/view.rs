//! Aggregate view of one tanda, derived from whatever reads resolved.

use crate::format::{format_count, format_days, format_timestamp, format_usdc};
use crate::models::{Address, Participant, ParticipantStatus, TandaState, UnixSeconds};
use crate::normalizer::TandaReads;
use crate::services::actions::{available_actions, Action, ActionContext};
use crate::services::classifier::{
    effective_cycle, is_current_recipient, lifecycle_label, membership_badge, participant_status,
};
use crate::services::countdown::{countdown, CountdownPolicy, CountdownResult};
use crate::services::schedule::{build_schedule, ScheduleRow};
use serde::Serialize;

/// Caller-side context passed explicitly into every derivation
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    /// Connected wallet, if any
    pub user: Option<Address>,
    pub countdown_policy: CountdownPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub contribution: String,
    pub current_cycle: String,
    pub total_funds: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleView {
    pub next_payout: String,
    pub recipient: String,
    pub is_current_recipient: bool,
    pub payout_interval_days: String,
    pub grace_period_days: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantRow {
    pub address: Address,
    pub short_address: String,
    pub status: ParticipantStatus,
    pub status_label: String,
    pub paid_until: String,
    pub payout_position: String,
    pub joined: String,
    pub is_user: bool,
}

/// Everything the detail page shows for one tanda
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TandaView {
    pub state: Option<TandaState>,
    pub lifecycle_label: String,
    pub membership_badge: Option<String>,
    pub stats: StatsView,
    pub cycle: CycleView,
    pub participants: Vec<ParticipantRow>,
    pub payout_order_assigned: bool,
    pub schedule: Vec<ScheduleRow>,
    pub actions: Vec<Action>,
    /// Raw next-payout target, `None` while unset or unresolved
    pub next_payout_timestamp: Option<UnixSeconds>,
    pub countdown: Option<CountdownResult>,
    /// Summary or participant list has not resolved yet
    pub loading: bool,
}

impl TandaView {
    /// Derive the view at wall-clock `now` (Unix seconds).
    ///
    /// Never fails: every section that depends on an unresolved read falls
    /// back to its placeholder.
    pub fn derive(reads: &TandaReads, ctx: &ViewContext, now: i64) -> Self {
        let summary = reads.summary.as_ref();
        let user = ctx.user.as_ref();
        let contribution = reads.configuration.contribution_amount;
        let current_cycle = effective_cycle(summary);
        let order_assigned = reads.payout_order.is_some();

        let stats = StatsView {
            contribution: format_usdc(contribution),
            current_cycle: format!(
                "{} of {}",
                format_count(summary.map(|s| s.current_cycle)),
                format_count(summary.map(|s| s.participants_count))
            ),
            total_funds: format_usdc(summary.map(|s| s.total_funds)),
        };

        let cycle = CycleView {
            next_payout: format_timestamp(summary.map(|s| s.next_payout_timestamp)),
            recipient: reads
                .cycle_info
                .as_ref()
                .and_then(|c| c.recipient())
                .map(Address::short)
                .unwrap_or_else(|| "Not assigned yet".to_string()),
            is_current_recipient: is_current_recipient(reads.cycle_info.as_ref(), user),
            payout_interval_days: format_days(reads.configuration.payout_interval),
            grace_period_days: format_days(reads.configuration.grace_period),
        };

        let participants = reads
            .participants
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|p| participant_row(p, current_cycle, order_assigned, user))
            .collect();

        // The schedule is only meaningful while cycles are running
        let schedule = summary
            .filter(|s| s.is_active())
            .map(|s| {
                build_schedule(
                    reads.payout_order.as_ref(),
                    reads.participants.as_deref(),
                    s,
                    contribution,
                )
            })
            .unwrap_or_default();

        let actions = summary
            .map(|s| {
                available_actions(&ActionContext {
                    summary: s,
                    participants: reads.participants.as_deref(),
                    cycle_info: reads.cycle_info.as_ref(),
                    contribution_amount: contribution,
                    is_participant: reads.is_participant,
                    user,
                })
            })
            .unwrap_or_default();

        let next_payout_timestamp = summary.map(|s| s.next_payout_timestamp).filter(|ts| *ts > 0);
        let countdown = next_payout_timestamp.map(|ts| countdown(ts, now, &ctx.countdown_policy));

        Self {
            state: summary.map(|s| s.state),
            lifecycle_label: lifecycle_label(summary.map(|s| s.state)).to_string(),
            membership_badge: membership_badge(reads.is_participant, reads.is_in_good_standing).map(str::to_string),
            stats,
            cycle,
            participants,
            payout_order_assigned: order_assigned,
            schedule,
            actions,
            next_payout_timestamp,
            countdown,
            loading: summary.is_none() || reads.participants.is_none(),
        }
    }
}

fn participant_row(p: &Participant, current_cycle: u64, order_assigned: bool, user: Option<&Address>) -> ParticipantRow {
    let status = participant_status(p, current_cycle);
    ParticipantRow {
        address: p.address,
        short_address: p.address.short(),
        status,
        status_label: status.as_str().to_string(),
        paid_until: format!("Cycle {}", p.paid_until_cycle),
        payout_position: if order_assigned {
            format!("#{}", p.payout_order.saturating_add(1))
        } else {
            "--".to_string()
        },
        joined: format_timestamp(Some(p.join_timestamp)),
        is_user: user == Some(&p.address),
    }
}
