use serde::{Deserialize, Serialize};

/// Base-unit amount (fixed-point, six decimals)
pub type Amount = u128;

/// Seconds since the Unix epoch as reported by the ledger
pub type UnixSeconds = u64;

/// Whole seconds
pub type DurationSeconds = u64;

/// Tanda lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TandaState {
    Open,
    Active,
    Completed,
    /// Discriminant the ledger returned that this crate does not know
    Unknown(u8),
}

impl TandaState {
    /// Convert from the ledger's enum discriminant
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => TandaState::Open,
            1 => TandaState::Active,
            2 => TandaState::Completed,
            other => TandaState::Unknown(other),
        }
    }

    /// Convert to the ledger's enum discriminant
    pub fn as_raw(&self) -> u8 {
        match self {
            TandaState::Open => 0,
            TandaState::Active => 1,
            TandaState::Completed => 2,
            TandaState::Unknown(raw) => *raw,
        }
    }

    /// Short badge label used on listing cards
    pub fn badge(&self) -> &'static str {
        match self {
            TandaState::Open => "Open",
            TandaState::Active => "Active",
            TandaState::Completed => "Completed",
            TandaState::Unknown(_) => "Unknown",
        }
    }

    /// Position in the lifecycle: Open < Active < Completed.
    /// The ledger only moves a tanda forward, possibly several steps at once.
    pub fn rank(&self) -> Option<u8> {
        match self {
            TandaState::Open => Some(0),
            TandaState::Active => Some(1),
            TandaState::Completed => Some(2),
            TandaState::Unknown(_) => None,
        }
    }

    /// Whether `next` is an earlier lifecycle state than `self`
    pub fn is_behind(&self, next: TandaState) -> bool {
        matches!((self.rank(), next.rank()), (Some(from), Some(to)) if to < from)
    }
}

/// Snapshot of `getTandaSummary()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TandaSummary {
    pub state: TandaState,
    pub current_cycle: u64,
    pub participants_count: u64,
    pub total_funds: Amount,
    pub next_payout_timestamp: UnixSeconds,
}

impl TandaSummary {
    pub fn is_open(&self) -> bool {
        self.state == TandaState::Open
    }

    pub fn is_active(&self) -> bool {
        self.state == TandaState::Active
    }
}

/// Creation-time parameters, immutable for the tanda's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    pub contribution_amount: Option<Amount>,
    pub payout_interval: Option<DurationSeconds>,
    pub grace_period: Option<DurationSeconds>,
}
