//! Lifecycle and standing classification over normalized reads.
//!
//! All functions are total over their optional inputs.

use crate::models::{find_participant, Address, CycleInfo, Participant, ParticipantStatus, TandaState, TandaSummary};

/// Header label for a tanda's lifecycle state
pub fn lifecycle_label(state: Option<TandaState>) -> &'static str {
    match state {
        Some(TandaState::Open) => "Open for Participants",
        Some(TandaState::Active) => "Active",
        Some(TandaState::Completed) => "Completed",
        Some(TandaState::Unknown(_)) | None => "Unknown",
    }
}

/// Standing of `participant` at `current_cycle`.
///
/// Removal wins over any payment state.
pub fn participant_status(participant: &Participant, current_cycle: u64) -> ParticipantStatus {
    if !participant.is_active {
        ParticipantStatus::Removed
    } else if participant.has_paid && participant.paid_until_cycle > current_cycle {
        ParticipantStatus::InGoodStanding
    } else if participant.has_paid {
        ParticipantStatus::Paid
    } else {
        ParticipantStatus::PendingPayment
    }
}

/// Current cycle to classify against; 0 while the summary is unresolved
pub fn effective_cycle(summary: Option<&TandaSummary>) -> u64 {
    summary.map(|s| s.current_cycle).unwrap_or(0)
}

/// Whether `user` receives the payout of the running cycle
pub fn is_current_recipient(cycle_info: Option<&CycleInfo>, user: Option<&Address>) -> bool {
    match (cycle_info.and_then(CycleInfo::recipient), user) {
        (Some(recipient), Some(user)) => recipient == user,
        _ => false,
    }
}

/// Payouts can be triggered only while the tanda is active
pub fn can_trigger_payout(summary: Option<&TandaSummary>) -> bool {
    summary.map(TandaSummary::is_active).unwrap_or(false)
}

/// Cycles the participant still owes.
///
/// Falls back to 1 when either side cannot be resolved, so a "pay all"
/// action always covers at least one cycle.
pub fn cycles_remaining(summary: Option<&TandaSummary>, participant: Option<&Participant>) -> u64 {
    match (summary, participant) {
        (Some(s), Some(p)) => s.participants_count.saturating_sub(p.paid_until_cycle),
        _ => 1,
    }
}

/// `cycles_remaining` for the connected user's record
pub fn cycles_remaining_for(
    summary: Option<&TandaSummary>,
    participants: Option<&[Participant]>,
    user: Option<&Address>,
) -> u64 {
    let me = match (participants, user) {
        (Some(list), Some(addr)) => find_participant(list, addr),
        _ => None,
    };
    cycles_remaining(summary, me)
}

/// Header badge for a participant: `None` when the user is not (known to be) a participant
pub fn membership_badge(is_participant: Option<bool>, is_in_good_standing: Option<bool>) -> Option<&'static str> {
    if is_participant != Some(true) {
        return None;
    }
    if is_in_good_standing == Some(true) {
        Some("In Good Standing")
    } else {
        Some("Payment Needed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(is_active: bool, has_paid: bool, paid_until_cycle: u64) -> Participant {
        Participant {
            address: Address::from_bytes([7u8; 20]),
            has_paid,
            paid_until_cycle,
            is_active,
            payout_order: 0,
            join_timestamp: 1_700_000_000,
        }
    }

    fn summary(state: TandaState, current_cycle: u64, participants_count: u64) -> TandaSummary {
        TandaSummary {
            state,
            current_cycle,
            participants_count,
            total_funds: 0,
            next_payout_timestamp: 0,
        }
    }

    #[test]
    fn test_lifecycle_label_total() {
        assert_eq!(lifecycle_label(Some(TandaState::Open)), "Open for Participants");
        assert_eq!(lifecycle_label(Some(TandaState::Active)), "Active");
        assert_eq!(lifecycle_label(Some(TandaState::Completed)), "Completed");
        assert_eq!(lifecycle_label(Some(TandaState::Unknown(7))), "Unknown");
        assert_eq!(lifecycle_label(None), "Unknown");
    }

    #[test]
    fn test_removed_wins_over_payment() {
        for has_paid in [true, false] {
            for paid_until in [0, 1, 5, 100] {
                for cycle in [0, 1, 4] {
                    assert_eq!(
                        participant_status(&participant(false, has_paid, paid_until), cycle),
                        ParticipantStatus::Removed
                    );
                }
            }
        }
    }

    #[test]
    fn test_payment_standing() {
        let c = 2;
        assert_eq!(participant_status(&participant(true, true, c + 1), c), ParticipantStatus::InGoodStanding);
        assert_eq!(participant_status(&participant(true, true, c), c), ParticipantStatus::Paid);
        assert_eq!(participant_status(&participant(true, true, 0), c), ParticipantStatus::Paid);
        assert_eq!(participant_status(&participant(true, false, 9), c), ParticipantStatus::PendingPayment);
    }

    #[test]
    fn test_missing_summary_uses_cycle_zero() {
        let p = participant(true, true, 1);
        assert_eq!(participant_status(&p, effective_cycle(None)), ParticipantStatus::InGoodStanding);
    }

    #[test]
    fn test_current_recipient() {
        let user = Address::from_bytes([7u8; 20]);
        let info = CycleInfo {
            cycle_number: 1,
            payout_address: user,
            payout_amount: 30_000_000,
        };
        assert!(is_current_recipient(Some(&info), Some(&user)));
        assert!(!is_current_recipient(Some(&info), None));
        assert!(!is_current_recipient(None, Some(&user)));
        assert!(!is_current_recipient(Some(&info), Some(&Address::from_bytes([8u8; 20]))));

        let unassigned = CycleInfo {
            payout_address: Address::ZERO,
            ..info
        };
        assert!(!is_current_recipient(Some(&unassigned), Some(&Address::ZERO)));
    }

    #[test]
    fn test_can_trigger_only_when_active() {
        assert!(can_trigger_payout(Some(&summary(TandaState::Active, 1, 3))));
        assert!(!can_trigger_payout(Some(&summary(TandaState::Open, 0, 3))));
        assert!(!can_trigger_payout(Some(&summary(TandaState::Completed, 3, 3))));
        assert!(!can_trigger_payout(None));
    }

    #[test]
    fn test_cycles_remaining() {
        let s = summary(TandaState::Active, 1, 5);
        assert_eq!(cycles_remaining(Some(&s), Some(&participant(true, true, 2))), 3);
        assert_eq!(cycles_remaining(Some(&s), Some(&participant(true, true, 9))), 0);
        assert_eq!(cycles_remaining(Some(&s), None), 1);
        assert_eq!(cycles_remaining(None, Some(&participant(true, true, 2))), 1);
    }

    #[test]
    fn test_cycles_remaining_for_unknown_user() {
        let s = summary(TandaState::Active, 1, 5);
        let list = vec![participant(true, true, 2)];
        let stranger = Address::from_bytes([1u8; 20]);
        assert_eq!(cycles_remaining_for(Some(&s), Some(&list), Some(&stranger)), 1);
        assert_eq!(cycles_remaining_for(Some(&s), Some(&list), Some(&list[0].address)), 3);
        assert_eq!(cycles_remaining_for(Some(&s), Some(&list), None), 1);
    }

    #[test]
    fn test_membership_badge() {
        assert_eq!(membership_badge(Some(true), Some(true)), Some("In Good Standing"));
        assert_eq!(membership_badge(Some(true), Some(false)), Some("Payment Needed"));
        assert_eq!(membership_badge(Some(true), None), Some("Payment Needed"));
        assert_eq!(membership_badge(Some(false), Some(true)), None);
        assert_eq!(membership_badge(None, None), None);
    }
}
