//! Read-side seam to the external ledger

use super::raw::RawValue;
use crate::error::LedgerError;
use crate::models::Address;
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};

/// Read-only queries the engine issues against a tanda (and its manager)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    TandaSummary,
    AllParticipants,
    CurrentCycleInfo,
    ContributionAmount,
    PayoutInterval,
    GracePeriod,
    PayoutOrder,
    IsParticipant(Address),
    IsParticipantInGoodStanding(Address),
    TandaData(u64),
    ActiveTandaIds,
}

impl Query {
    /// Name of the contract function backing this query
    pub fn function_name(&self) -> &'static str {
        match self {
            Query::TandaSummary => "getTandaSummary",
            Query::AllParticipants => "getAllParticipants",
            Query::CurrentCycleInfo => "getCurrentCycleInfo",
            Query::ContributionAmount => "contributionAmount",
            Query::PayoutInterval => "payoutInterval",
            Query::GracePeriod => "gracePeriod",
            Query::PayoutOrder => "getPayoutOrder",
            Query::IsParticipant(_) => "isParticipant",
            Query::IsParticipantInGoodStanding(_) => "isParticipantInGoodStanding",
            Query::TandaData(_) => "getTandaData",
            Query::ActiveTandaIds => "getActiveTandaIds",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::IsParticipant(a) | Query::IsParticipantInGoodStanding(a) => {
                write!(f, "{}({})", self.function_name(), a.to_lower_hex())
            }
            Query::TandaData(id) => write!(f, "{}({})", self.function_name(), id),
            _ => write!(f, "{}()", self.function_name()),
        }
    }
}

/// Supplies raw query results. Implementations own transport details.
pub trait LedgerReader: Send + Sync {
    fn read(&self, query: &Query) -> impl Future<Output = Result<RawValue, LedgerError>> + Send;
}

/// Raw results of one read round, each independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReads {
    pub tanda_summary: Option<RawValue>,
    pub participants: Option<RawValue>,
    pub cycle_info: Option<RawValue>,
    pub contribution_amount: Option<RawValue>,
    pub payout_interval: Option<RawValue>,
    pub grace_period: Option<RawValue>,
    pub payout_order: Option<RawValue>,
    pub is_participant: Option<RawValue>,
    pub is_in_good_standing: Option<RawValue>,
}

impl RawReads {
    /// Number of queries that resolved
    pub fn resolved_count(&self) -> usize {
        [
            &self.tanda_summary,
            &self.participants,
            &self.cycle_info,
            &self.contribution_amount,
            &self.payout_interval,
            &self.grace_period,
            &self.payout_order,
            &self.is_participant,
            &self.is_in_good_standing,
        ]
        .iter()
        .filter(|r| r.is_some())
        .count()
    }
}

/// Run one query, turning any failure into an absent result
pub async fn read_optional<R: LedgerReader>(reader: &R, query: Query) -> Option<RawValue> {
    match reader.read(&query).await {
        Ok(value) => Some(value),
        Err(e) if e.is_missing() => {
            debug!("{} has not resolved: {}", query, e);
            None
        }
        Err(e) => {
            warn!("{} failed: {}", query, e);
            None
        }
    }
}

/// Issue every tanda read concurrently.
///
/// A failed or missing read leaves its field empty and never blocks the
/// others. Membership reads are skipped when no user is connected.
pub async fn load_reads<R: LedgerReader>(reader: &R, user: Option<&Address>) -> RawReads {
    let membership = async {
        match user {
            Some(addr) => {
                tokio::join!(
                    read_optional(reader, Query::IsParticipant(*addr)),
                    read_optional(reader, Query::IsParticipantInGoodStanding(*addr)),
                )
            }
            None => (None, None),
        }
    };

    let (
        tanda_summary,
        participants,
        cycle_info,
        contribution_amount,
        payout_interval,
        grace_period,
        payout_order,
        (is_participant, is_in_good_standing),
    ) = tokio::join!(
        read_optional(reader, Query::TandaSummary),
        read_optional(reader, Query::AllParticipants),
        read_optional(reader, Query::CurrentCycleInfo),
        read_optional(reader, Query::ContributionAmount),
        read_optional(reader, Query::PayoutInterval),
        read_optional(reader, Query::GracePeriod),
        read_optional(reader, Query::PayoutOrder),
        membership,
    );

    let reads = RawReads {
        tanda_summary,
        participants,
        cycle_info,
        contribution_amount,
        payout_interval,
        grace_period,
        payout_order,
        is_participant,
        is_in_good_standing,
    };

    debug!("Read round resolved {} queries", reads.resolved_count());
    reads
}

/// Read the manager's active tanda ids and each tanda's listing data concurrently
pub async fn load_listing<R: LedgerReader>(reader: &R) -> Vec<(u64, Option<RawValue>)> {
    let ids: Vec<u64> = read_optional(reader, Query::ActiveTandaIds)
        .await
        .and_then(|raw| raw.as_list().map(|items| items.iter().filter_map(RawValue::as_u64).collect()))
        .unwrap_or_default();

    let reads = ids.iter().map(|id| read_optional(reader, Query::TandaData(*id)));
    let data = futures::future::join_all(reads).await;

    ids.into_iter().zip(data).collect()
}
