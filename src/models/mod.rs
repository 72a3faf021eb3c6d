//! Domain models for the tanda engine.
//!
//! Every record here is an immutable snapshot derived from one round of
//! ledger reads. Nothing in this module talks to the ledger.

pub mod address;
pub mod cycle;
pub mod manager;
pub mod participant;
pub mod tanda;

// Re-export all models for convenient access
pub use address::Address;
pub use cycle::{CycleInfo, PayoutOrder};
pub use manager::{CurrentStatus, GeneralInfo};
pub use participant::{find_participant, Participant, ParticipantStatus};
pub use tanda::{Amount, Configuration, DurationSeconds, TandaState, TandaSummary, UnixSeconds};
