//! Domain normalizer: raw query results into typed records.
//!
//! Every function accepts the raw result of one query, which may be absent,
//! and returns the typed record or `None`. A result with the wrong shape is
//! logged and treated as absent so callers can still render a partial view.
//! Values are trusted as the ledger reports them.

use crate::ledger::{RawReads, RawValue};
use crate::models::{
    Address, Configuration, CurrentStatus, CycleInfo, GeneralInfo, Participant, PayoutOrder, TandaState,
    TandaSummary,
};
use serde::Serialize;
use tracing::warn;

/// Typed results of one read round, each independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TandaReads {
    pub summary: Option<TandaSummary>,
    pub participants: Option<Vec<Participant>>,
    pub cycle_info: Option<CycleInfo>,
    pub configuration: Configuration,
    pub payout_order: Option<PayoutOrder>,
    pub is_participant: Option<bool>,
    pub is_in_good_standing: Option<bool>,
}

/// Normalize a whole read round
pub fn normalize_reads(raw: &RawReads) -> TandaReads {
    TandaReads {
        summary: normalize_summary(raw.tanda_summary.as_ref()),
        participants: normalize_participants(raw.participants.as_ref()),
        cycle_info: normalize_cycle_info(raw.cycle_info.as_ref()),
        configuration: normalize_configuration(
            raw.contribution_amount.as_ref(),
            raw.payout_interval.as_ref(),
            raw.grace_period.as_ref(),
        ),
        payout_order: normalize_payout_order(raw.payout_order.as_ref()),
        is_participant: normalize_flag("isParticipant", raw.is_participant.as_ref()),
        is_in_good_standing: normalize_flag("isParticipantInGoodStanding", raw.is_in_good_standing.as_ref()),
    }
}

/// Positional element, or the named field when the ledger returned a struct
fn pick<'a>(raw: &'a RawValue, index: usize, names: &[&str]) -> Option<&'a RawValue> {
    raw.at(index).or_else(|| raw.field(names))
}

fn shape_mismatch<T>(query: &str, raw: &RawValue) -> Option<T> {
    warn!("Unexpected shape for {}: got {}", query, raw.kind());
    None
}

/// `getTandaSummary() -> (state, currentCycle, participantsCount, totalFunds, nextPayoutTimestamp)`
pub fn normalize_summary(raw: Option<&RawValue>) -> Option<TandaSummary> {
    let raw = raw?;
    let parsed = (|| {
        Some(TandaSummary {
            state: TandaState::from_raw(pick(raw, 0, &["state"])?.as_u8()?),
            current_cycle: pick(raw, 1, &["currentCycle"])?.as_u64()?,
            participants_count: pick(raw, 2, &["participantsCount"])?.as_u64()?,
            total_funds: pick(raw, 3, &["totalFunds"])?.as_u128()?,
            next_payout_timestamp: pick(raw, 4, &["nextPayoutTimestamp"])?.as_u64()?,
        })
    })();
    parsed.or_else(|| shape_mismatch("getTandaSummary", raw))
}

/// One participant struct: `(addr, hasPaid, paidUntilCycle, isActive, payoutOrder, joinTimestamp)`
pub fn normalize_participant(raw: &RawValue) -> Option<Participant> {
    Some(Participant {
        address: pick(raw, 0, &["addr", "address"])?.as_address()?,
        has_paid: pick(raw, 1, &["hasPaid"])?.as_bool()?,
        paid_until_cycle: pick(raw, 2, &["paidUntilCycle"])?.as_u64()?,
        is_active: pick(raw, 3, &["isActive"])?.as_bool()?,
        payout_order: pick(raw, 4, &["payoutOrder"])?.as_u64()?,
        join_timestamp: pick(raw, 5, &["joinTimestamp"])?.as_u64()?,
    })
}

/// `getAllParticipants()`.
///
/// Payout order entries index into this list, so a single malformed entry
/// drops the whole list rather than shifting the indices of the rest.
pub fn normalize_participants(raw: Option<&RawValue>) -> Option<Vec<Participant>> {
    let raw = raw?;
    let parsed = raw
        .as_list()
        .and_then(|items| items.iter().map(normalize_participant).collect::<Option<Vec<_>>>());
    parsed.or_else(|| shape_mismatch("getAllParticipants", raw))
}

/// `getCurrentCycleInfo() -> (cycleNumber, payoutAddress, payoutAmount)`
pub fn normalize_cycle_info(raw: Option<&RawValue>) -> Option<CycleInfo> {
    let raw = raw?;
    let parsed = (|| {
        Some(CycleInfo {
            cycle_number: pick(raw, 0, &["cycleNumber"])?.as_u64()?,
            payout_address: pick(raw, 1, &["payoutAddress"])?.as_address()?,
            payout_amount: pick(raw, 2, &["payoutAmount"])?.as_u128()?,
        })
    })();
    parsed.or_else(|| shape_mismatch("getCurrentCycleInfo", raw))
}

/// The three scalar configuration reads, each independently optional
pub fn normalize_configuration(
    contribution_amount: Option<&RawValue>,
    payout_interval: Option<&RawValue>,
    grace_period: Option<&RawValue>,
) -> Configuration {
    Configuration {
        contribution_amount: contribution_amount
            .and_then(|raw| raw.as_u128().or_else(|| shape_mismatch("contributionAmount", raw))),
        payout_interval: payout_interval.and_then(|raw| raw.as_u64().or_else(|| shape_mismatch("payoutInterval", raw))),
        grace_period: grace_period.and_then(|raw| raw.as_u64().or_else(|| shape_mismatch("gracePeriod", raw))),
    }
}

/// `getPayoutOrder()`; the empty array means not yet assigned
pub fn normalize_payout_order(raw: Option<&RawValue>) -> Option<PayoutOrder> {
    let raw = raw?;
    let indices = raw
        .as_list()
        .and_then(|items| items.iter().map(RawValue::as_u64).collect::<Option<Vec<_>>>());
    match indices {
        Some(indices) => PayoutOrder::assigned(indices),
        None => shape_mismatch("getPayoutOrder", raw),
    }
}

/// Boolean membership predicates
pub fn normalize_flag(query: &str, raw: Option<&RawValue>) -> Option<bool> {
    let raw = raw?;
    raw.as_bool().or_else(|| shape_mismatch(query, raw))
}

/// Manager `getTandaData(id) -> (GeneralInfo, CurrentStatus)`.
///
/// Listing cards always render, so each half falls back to its default
/// when unresolved or malformed.
pub fn normalize_tanda_data(raw: Option<&RawValue>) -> (GeneralInfo, CurrentStatus) {
    let general = raw
        .and_then(|r| pick(r, 0, &["generalInfo"]))
        .and_then(normalize_general_info)
        .unwrap_or_default();
    let status = raw
        .and_then(|r| pick(r, 1, &["currentStatus"]))
        .and_then(normalize_current_status)
        .unwrap_or_default();
    (general, status)
}

fn normalize_general_info(raw: &RawValue) -> Option<GeneralInfo> {
    let address = |index: usize, name: &str| -> Option<Address> { pick(raw, index, &[name])?.as_address() };
    let parsed = (|| {
        Some(GeneralInfo {
            tanda_id: pick(raw, 0, &["tandaId"])?.as_u64()?,
            contribution_amount: pick(raw, 1, &["contributionAmount"])?.as_u128()?,
            payout_interval: pick(raw, 2, &["payoutInterval"])?.as_u64()?,
            participant_count: pick(raw, 3, &["participantCount"])?.as_u64()?,
            grace_period: pick(raw, 4, &["gracePeriod"])?.as_u64()?,
            creator: address(5, "creator")?,
            usdc_token_address: address(6, "usdcTokenAddress")?,
            manager_address: address(7, "managerAddress")?,
            tanda_address: address(8, "tandaAddress")?,
        })
    })();
    parsed.or_else(|| shape_mismatch("getTandaData.generalInfo", raw))
}

fn normalize_current_status(raw: &RawValue) -> Option<CurrentStatus> {
    let parsed = (|| {
        Some(CurrentStatus {
            state: TandaState::from_raw(pick(raw, 0, &["state"])?.as_u8()?),
            current_cycle: pick(raw, 1, &["currentCycle"])?.as_u64()?,
            total_participants: pick(raw, 2, &["totalParticipants"])?.as_u64()?,
            total_funds: pick(raw, 3, &["totalFunds"])?.as_u128()?,
            next_payout_timestamp: pick(raw, 4, &["nextPayoutTimestamp"])?.as_u64()?,
            start_timestamp: pick(raw, 5, &["startTimestamp"])?.as_u64()?,
            payout_order_assigned: pick(raw, 6, &["payoutOrderAssigned"])?.as_bool()?,
            is_active: pick(raw, 7, &["isActive"])?.as_bool()?,
            is_open: pick(raw, 8, &["isOpen"])?.as_bool()?,
            is_completed: pick(raw, 9, &["isCompleted"])?.as_bool()?,
        })
    })();
    parsed.or_else(|| shape_mismatch("getTandaData.currentStatus", raw))
}
