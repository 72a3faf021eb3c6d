use super::address::Address;
use super::tanda::UnixSeconds;
use serde::{Deserialize, Serialize};

/// One entry of `getAllParticipants()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub address: Address,
    pub has_paid: bool,
    pub paid_until_cycle: u64,
    /// `false` marks a removed participant; it never flips back
    pub is_active: bool,
    pub payout_order: u64,
    pub join_timestamp: UnixSeconds,
}

/// Derived standing of a participant relative to the current cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Removed,
    InGoodStanding,
    Paid,
    PendingPayment,
}

impl ParticipantStatus {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Removed => "Removed",
            ParticipantStatus::InGoodStanding => "In Good Standing",
            ParticipantStatus::Paid => "Paid",
            ParticipantStatus::PendingPayment => "Pending Payment",
        }
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the participant record for `address`
pub fn find_participant<'a>(participants: &'a [Participant], address: &Address) -> Option<&'a Participant> {
    participants.iter().find(|p| &p.address == address)
}
