#![allow(dead_code)]

use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tanda_engine::error::LedgerError;
use tanda_engine::ledger::{LedgerReader, Query, RawValue};
use tanda_engine::models::{Address, Participant, TandaState, TandaSummary};

pub const ALICE: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
pub const BOB: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
pub const CAROL: &str = "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb";

pub const NEXT_PAYOUT: u64 = 1_700_000_000;

pub fn addr(s: &str) -> Address {
    s.parse().expect("Invalid test address")
}

pub fn alice() -> Address {
    addr(ALICE)
}

pub fn bob() -> Address {
    addr(BOB)
}

pub fn carol() -> Address {
    addr(CAROL)
}

/// In-memory ledger with per-query results and injectable failures
#[derive(Default)]
pub struct MockLedger {
    results: Mutex<HashMap<Query, RawValue>>,
    failing: Mutex<HashSet<Query>>,
    calls: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-populated with every query of `active_tanda_snapshot`
    pub fn active() -> Self {
        let ledger = Self::new();
        let user = alice();
        ledger.set(Query::TandaSummary, json!([1, 2, 3, "30000000", NEXT_PAYOUT]));
        ledger.set(Query::AllParticipants, participants_json());
        ledger.set(Query::CurrentCycleInfo, json!([2, ALICE, "30000000"]));
        ledger.set(Query::ContributionAmount, json!("10000000"));
        ledger.set(Query::PayoutInterval, json!(604_800));
        ledger.set(Query::GracePeriod, json!(172_800));
        ledger.set(Query::PayoutOrder, json!([2, 0, 1]));
        ledger.set(Query::IsParticipant(user), json!(true));
        ledger.set(Query::IsParticipantInGoodStanding(user), json!(true));
        ledger
    }

    pub fn set(&self, query: Query, value: serde_json::Value) {
        let raw: RawValue = serde_json::from_value(value).expect("Invalid raw value");
        self.results.lock().unwrap().insert(query, raw);
    }

    pub fn remove(&self, query: &Query) {
        self.results.lock().unwrap().remove(query);
    }

    pub fn fail(&self, query: Query) {
        self.failing.lock().unwrap().insert(query);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LedgerReader for MockLedger {
    async fn read(&self, query: &Query) -> Result<RawValue, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(query) {
            return Err(LedgerError::Unavailable(format!("{} rejected", query)));
        }
        self.results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(query.to_string()))
    }
}

/// Raw `getAllParticipants()` for the active fixture.
///
/// At cycle 2: Alice paid ahead, Bob paid up to now, Carol owes.
pub fn participants_json() -> serde_json::Value {
    json!([
        [ALICE, true, 3, true, 1, 1_699_000_000u64],
        [BOB, true, 2, true, 2, 1_699_000_100u64],
        [CAROL, false, 1, true, 0, 1_699_000_200u64],
    ])
}

/// Raw `getTandaData(id)`: 25 USDC every 14 days, 4 seats, 1 day grace
pub fn tanda_data_json(id: u64, state: u8, joined: u64) -> serde_json::Value {
    let started = state != 0;
    let current_cycle = u64::from(started);
    let next_payout = if started { NEXT_PAYOUT } else { 0 };
    json!([
        [id, "25000000", 1_209_600, 4, 86_400, ALICE, BOB, BOB, CAROL],
        [state, current_cycle, joined, "50000000", next_payout, 0, started, state == 1, state == 0, state == 2]
    ])
}

/// Full snapshot file content mirroring `MockLedger::active`
pub fn active_tanda_snapshot() -> serde_json::Value {
    json!({
        "getTandaSummary": [1, 2, 3, "30000000", NEXT_PAYOUT],
        "getAllParticipants": participants_json(),
        "getCurrentCycleInfo": [2, ALICE, "30000000"],
        "contributionAmount": "10000000",
        "payoutInterval": 604_800,
        "gracePeriod": 172_800,
        "getPayoutOrder": [2, 0, 1],
        "isParticipant": { ALICE: true, BOB: true },
        "isParticipantInGoodStanding": { ALICE: true, BOB: false },
        "getActiveTandaIds": [0, 1],
        "getTandaData": {
            "0": tanda_data_json(0, 1, 4),
            "1": tanda_data_json(1, 0, 2)
        }
    })
}

/// Snapshot file in the system temp dir, removed on drop
pub struct TempSnapshot {
    pub path: PathBuf,
}

impl TempSnapshot {
    pub fn new(name: &str, contents: &serde_json::Value) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let unique = format!(
            "tanda-engine-{}-{}-{}.json",
            name,
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        );
        let path = std::env::temp_dir().join(unique);
        let snapshot = Self { path };
        snapshot.write(contents);
        snapshot
    }

    pub fn write(&self, contents: &serde_json::Value) {
        std::fs::write(&self.path, serde_json::to_vec_pretty(contents).unwrap())
            .expect("Failed to write snapshot");
    }
}

impl Drop for TempSnapshot {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn participant(address: Address, has_paid: bool, paid_until_cycle: u64, is_active: bool) -> Participant {
    Participant {
        address,
        has_paid,
        paid_until_cycle,
        is_active,
        payout_order: 0,
        join_timestamp: 1_699_000_000,
    }
}

pub fn summary(state: TandaState, current_cycle: u64, participants_count: u64) -> TandaSummary {
    TandaSummary {
        state,
        current_cycle,
        participants_count,
        total_funds: 0,
        next_payout_timestamp: NEXT_PAYOUT,
    }
}
