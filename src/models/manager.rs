//! Records served by the tanda manager contract for listings

use super::address::Address;
use super::tanda::{Amount, DurationSeconds, TandaState, UnixSeconds};
use serde::{Deserialize, Serialize};

/// Static half of `getTandaData(id)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub tanda_id: u64,
    pub contribution_amount: Amount,
    pub payout_interval: DurationSeconds,
    pub participant_count: u64,
    pub grace_period: DurationSeconds,
    pub creator: Address,
    pub usdc_token_address: Address,
    pub manager_address: Address,
    pub tanda_address: Address,
}

/// Live half of `getTandaData(id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStatus {
    pub state: TandaState,
    pub current_cycle: u64,
    pub total_participants: u64,
    pub total_funds: Amount,
    pub next_payout_timestamp: UnixSeconds,
    pub start_timestamp: UnixSeconds,
    pub payout_order_assigned: bool,
    pub is_active: bool,
    pub is_open: bool,
    pub is_completed: bool,
}

impl Default for CurrentStatus {
    fn default() -> Self {
        Self {
            state: TandaState::Open,
            current_cycle: 0,
            total_participants: 0,
            total_funds: 0,
            next_payout_timestamp: 0,
            start_timestamp: 0,
            payout_order_assigned: false,
            is_active: false,
            is_open: true,
            is_completed: false,
        }
    }
}
