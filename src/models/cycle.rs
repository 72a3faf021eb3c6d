use super::address::Address;
use super::tanda::Amount;
use serde::{Deserialize, Serialize};

/// Snapshot of `getCurrentCycleInfo()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    pub cycle_number: u64,
    pub payout_address: Address,
    pub payout_amount: Amount,
}

impl CycleInfo {
    /// Recipient of the running cycle, `None` until the ledger assigns one
    pub fn recipient(&self) -> Option<&Address> {
        if self.payout_address.is_zero() {
            None
        } else {
            Some(&self.payout_address)
        }
    }
}

/// Participant indices in payout order, one per cycle.
///
/// The ledger assigns the whole order at activation, so an instance is
/// either complete or not constructed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutOrder(Vec<u64>);

impl PayoutOrder {
    /// `None` for the empty array the ledger returns before activation
    pub fn assigned(indices: Vec<u64>) -> Option<Self> {
        if indices.is_empty() {
            None
        } else {
            Some(Self(indices))
        }
    }

    pub fn indices(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Participant index receiving the payout of `cycle_index` (0-based)
    pub fn recipient_index(&self, cycle_index: usize) -> Option<u64> {
        self.0.get(cycle_index).copied()
    }
}
