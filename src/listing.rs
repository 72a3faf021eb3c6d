//! Listing cards for the tanda manager's active tandas

use crate::format::{format_date, format_days_whole, format_usdc_whole};
use crate::ledger::RawValue;
use crate::models::{Address, CurrentStatus, GeneralInfo, TandaState};
use crate::normalizer::normalize_tanda_data;
use serde::Serialize;

/// Summary card for one tanda in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TandaCard {
    pub tanda_id: u64,
    pub title: String,
    pub tanda_address: Address,
    pub creator: Address,
    pub state: TandaState,
    pub badge: String,
    pub contribution: String,
    pub interval: String,
    pub grace_period: String,
    pub cycle: String,
    pub next_payout: String,
    pub total_funds: String,
    pub participants: String,
    pub call_to_action: String,
}

impl TandaCard {
    pub fn new(tanda_id: u64, general: &GeneralInfo, status: &CurrentStatus) -> Self {
        Self {
            tanda_id,
            title: format!("Tanda #{}", tanda_id.saturating_add(1)),
            tanda_address: general.tanda_address,
            creator: general.creator,
            state: status.state,
            badge: status.state.badge().to_string(),
            contribution: format!("{} USDC", format_usdc_whole(general.contribution_amount)),
            interval: format!("{} days", format_days_whole(general.payout_interval)),
            grace_period: format!("{} days", format_days_whole(general.grace_period)),
            cycle: format!("{}/{}", status.current_cycle, general.participant_count),
            next_payout: format_date(status.next_payout_timestamp),
            total_funds: format!("{} USDC", format_usdc_whole(status.total_funds)),
            participants: format!("{}/{}", status.total_participants, general.participant_count),
            call_to_action: if status.is_open { "Join Tanda" } else { "View Details" }.to_string(),
        }
    }

    /// Card from a raw `getTandaData(id)` result; unresolved data renders defaults
    pub fn from_raw(tanda_id: u64, raw: Option<&RawValue>) -> Self {
        let (general, status) = normalize_tanda_data(raw);
        Self::new(tanda_id, &general, &status)
    }
}

/// Cards for every `(id, getTandaData)` pair, in listing order
pub fn build_listing(entries: &[(u64, Option<RawValue>)]) -> Vec<TandaCard> {
    entries
        .iter()
        .map(|(id, raw)| TandaCard::from_raw(*id, raw.as_ref()))
        .collect()
}
