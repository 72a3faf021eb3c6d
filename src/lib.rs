//! Tanda Engine Library
//!
//! Derives a time-aware domain model of a ledger-backed tanda (rotating
//! savings group) from raw query results: lifecycle state, participant
//! standing, payout schedule, available actions and a live countdown.

pub mod config;
pub mod error;
pub mod format;
pub mod ledger;
pub mod listing;
pub mod models;
pub mod normalizer;
pub mod params;
pub mod services;
pub mod view;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, LedgerError};
pub use normalizer::{normalize_reads, TandaReads};
pub use view::{TandaView, ViewContext};

use ledger::{load_reads, LedgerReader};

/// Read every query once and derive the current view.
///
/// Convenience for one-shot callers; long-lived observers use
/// `services::TandaWatcher`.
pub async fn snapshot_view<R: LedgerReader>(reader: &R, ctx: &ViewContext, now: i64) -> TandaView {
    let raw = load_reads(reader, ctx.user.as_ref()).await;
    TandaView::derive(&normalize_reads(&raw), ctx, now)
}
