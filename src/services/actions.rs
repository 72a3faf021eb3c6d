//! Preconditions for the state-changing actions a user may initiate.
//!
//! Only availability and cost are derived here; building and signing the
//! transaction belongs to the wallet layer.

use super::classifier::{can_trigger_payout, cycles_remaining_for, is_current_recipient};
use crate::format::{format_timestamp, format_usdc};
use crate::models::{Address, Amount, CycleInfo, Participant, TandaSummary};
use serde::Serialize;

/// Action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Join,
    PayOneCycle,
    PayAllRemaining,
    TriggerPayout,
}

/// An action the user may initiate right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub label: String,
    /// Cycles paid by this action, for payment actions
    pub cycles: Option<u64>,
    /// Token amount the user must approve, when known
    pub cost: Option<Amount>,
}

/// Inputs needed to decide which actions are available
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub summary: &'a TandaSummary,
    pub participants: Option<&'a [Participant]>,
    pub cycle_info: Option<&'a CycleInfo>,
    pub contribution_amount: Option<Amount>,
    pub is_participant: Option<bool>,
    /// Connected wallet, if any
    pub user: Option<&'a Address>,
}

/// Actions available to the connected user, in display order
pub fn available_actions(ctx: &ActionContext<'_>) -> Vec<Action> {
    let user = match ctx.user {
        Some(user) => user,
        None => return Vec::new(),
    };
    let is_participant = ctx.is_participant == Some(true);
    let mut actions = Vec::new();

    if ctx.summary.is_open() && !is_participant {
        actions.push(Action {
            kind: ActionKind::Join,
            label: "Join Tanda".to_string(),
            cycles: None,
            cost: ctx.contribution_amount,
        });
    }

    if ctx.summary.is_active() && is_participant {
        actions.push(Action {
            kind: ActionKind::PayOneCycle,
            label: format!("Pay 1 Cycle ({} USDC)", format_usdc(ctx.contribution_amount)),
            cycles: Some(1),
            cost: ctx.contribution_amount,
        });

        let remaining = cycles_remaining_for(Some(ctx.summary), ctx.participants, Some(user));
        let cost = ctx
            .contribution_amount
            .map(|c| c.saturating_mul(Amount::from(remaining)));
        actions.push(Action {
            kind: ActionKind::PayAllRemaining,
            label: format!("Pay All Remaining ({} USDC)", format_usdc(cost)),
            cycles: Some(remaining),
            cost,
        });
    }

    if can_trigger_payout(Some(ctx.summary)) && is_participant {
        actions.push(Action {
            kind: ActionKind::TriggerPayout,
            label: trigger_label(ctx.summary, ctx.cycle_info, user),
            cycles: None,
            cost: None,
        });
    }

    actions
}

fn trigger_label(summary: &TandaSummary, cycle_info: Option<&CycleInfo>, user: &Address) -> String {
    let starting = format_timestamp(Some(summary.next_payout_timestamp));
    if is_current_recipient(cycle_info, Some(user)) {
        format!("You can claim your payout starting {}.", starting)
    } else {
        let recipient = cycle_info
            .and_then(CycleInfo::recipient)
            .map(Address::short)
            .unwrap_or_else(|| "-".to_string());
        format!("You can trigger the payout for {} starting {}.", recipient, starting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TandaState;

    fn summary(state: TandaState) -> TandaSummary {
        TandaSummary {
            state,
            current_cycle: 1,
            participants_count: 4,
            total_funds: 40_000_000,
            next_payout_timestamp: 1_700_000_000,
        }
    }

    fn kinds(actions: &[Action]) -> Vec<ActionKind> {
        actions.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_no_wallet_no_actions() {
        let s = summary(TandaState::Open);
        let ctx = ActionContext {
            summary: &s,
            participants: None,
            cycle_info: None,
            contribution_amount: Some(10_000_000),
            is_participant: None,
            user: None,
        };
        assert!(available_actions(&ctx).is_empty());
    }

    #[test]
    fn test_join_when_open() {
        let s = summary(TandaState::Open);
        let user = Address::from_bytes([3u8; 20]);
        let ctx = ActionContext {
            summary: &s,
            participants: None,
            cycle_info: None,
            contribution_amount: Some(10_000_000),
            is_participant: Some(false),
            user: Some(&user),
        };
        let actions = available_actions(&ctx);
        assert_eq!(kinds(&actions), vec![ActionKind::Join]);
        assert_eq!(actions[0].cost, Some(10_000_000));

        let ctx = ActionContext {
            is_participant: Some(true),
            ..ctx
        };
        assert!(available_actions(&ctx).is_empty());
    }

    #[test]
    fn test_active_participant_actions() {
        let s = summary(TandaState::Active);
        let user = Address::from_bytes([3u8; 20]);
        let me = Participant {
            address: user,
            has_paid: true,
            paid_until_cycle: 1,
            is_active: true,
            payout_order: 0,
            join_timestamp: 1,
        };
        let participants = vec![me];
        let info = CycleInfo {
            cycle_number: 1,
            payout_address: user,
            payout_amount: 40_000_000,
        };
        let ctx = ActionContext {
            summary: &s,
            participants: Some(&participants),
            cycle_info: Some(&info),
            contribution_amount: Some(10_000_000),
            is_participant: Some(true),
            user: Some(&user),
        };

        let actions = available_actions(&ctx);
        assert_eq!(
            kinds(&actions),
            vec![ActionKind::PayOneCycle, ActionKind::PayAllRemaining, ActionKind::TriggerPayout]
        );
        assert_eq!(actions[0].label, "Pay 1 Cycle (10 USDC)");
        assert_eq!(actions[1].cycles, Some(3));
        assert_eq!(actions[1].label, "Pay All Remaining (30 USDC)");
        assert_eq!(
            actions[2].label,
            "You can claim your payout starting 2023-11-14 22:13:20 UTC."
        );
    }

    #[test]
    fn test_trigger_for_someone_else() {
        let s = summary(TandaState::Active);
        let user = Address::from_bytes([3u8; 20]);
        let recipient: Address = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359".parse().unwrap();
        let info = CycleInfo {
            cycle_number: 1,
            payout_address: recipient,
            payout_amount: 40_000_000,
        };
        let ctx = ActionContext {
            summary: &s,
            participants: None,
            cycle_info: Some(&info),
            contribution_amount: None,
            is_participant: Some(true),
            user: Some(&user),
        };
        let actions = available_actions(&ctx);
        // Unresolvable participant record still pays at least one cycle
        assert_eq!(actions[1].cycles, Some(1));
        assert_eq!(actions[1].cost, None);
        assert_eq!(
            actions[2].label,
            "You can trigger the payout for 0xfB69...d359 starting 2023-11-14 22:13:20 UTC."
        );
    }

    #[test]
    fn test_completed_has_no_actions() {
        let s = summary(TandaState::Completed);
        let user = Address::from_bytes([3u8; 20]);
        let ctx = ActionContext {
            summary: &s,
            participants: None,
            cycle_info: None,
            contribution_amount: Some(10_000_000),
            is_participant: Some(true),
            user: Some(&user),
        };
        assert!(available_actions(&ctx).is_empty());
    }
}
