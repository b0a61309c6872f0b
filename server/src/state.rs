use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use ecoworld_shared::{AllocationVector, ConsumptionSnapshot, Preset};
use tracing::{debug, warn};

use crate::config::{max_nations, nation_idle_ttl};

/// Server-side copy of one nation's population settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationRecord {
    pub allocation: AllocationVector,
    pub consumption: ConsumptionSnapshot,
    pub updated_at: DateTime<Utc>,
    /// Last read or write, used for idle eviction.
    pub last_seen: DateTime<Utc>,
}

impl NationRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            allocation: AllocationVector::nation_default(),
            consumption: ConsumptionSnapshot::nation_default(),
            updated_at: now,
            last_seen: now,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub nations: Arc<DashMap<String, NationRecord>>,
    /// Preset table, serialized once at startup.
    pub presets_json: Arc<Bytes>,
    pub max_nations: usize,
    pub nation_idle_ttl: Duration,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    population_requests_total: AtomicU64,
    submissions_total: AtomicU64,
    submissions_rejected_total: AtomicU64,
    consumption_updates_total: AtomicU64,
    optimize_requests_total: AtomicU64,
    evicted_nations_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservabilitySnapshot {
    pub population_requests_total: u64,
    pub submissions_total: u64,
    pub submissions_rejected_total: u64,
    pub consumption_updates_total: u64,
    pub optimize_requests_total: u64,
    pub evicted_nations_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            population_requests_total: self.population_requests_total.load(Ordering::Relaxed),
            submissions_total: self.submissions_total.load(Ordering::Relaxed),
            submissions_rejected_total: self.submissions_rejected_total.load(Ordering::Relaxed),
            consumption_updates_total: self.consumption_updates_total.load(Ordering::Relaxed),
            optimize_requests_total: self.optimize_requests_total.load(Ordering::Relaxed),
            evicted_nations_total: self.evicted_nations_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_population_request(&self) {
        self.population_requests_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_submission(&self) {
        self.submissions_rejected_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_consumption_update(&self) {
        self.consumption_updates_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_optimize_request(&self) {
        self.optimize_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evicted_nations(&self, count: u64) {
        self.evicted_nations_total
            .fetch_add(count, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_limits(max_nations(), nation_idle_ttl())
    }

    pub fn with_limits(max_nations: usize, nation_idle_ttl: Duration) -> Self {
        Self {
            nations: Arc::new(DashMap::new()),
            presets_json: Arc::new(serialize_presets()),
            max_nations: max_nations.max(1),
            nation_idle_ttl,
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    /// Look up a nation, creating it with defaults on first contact.
    pub fn touch_nation(&self, name: &str) -> NationRecord {
        self.update_nation(name, |_| {})
    }

    /// Apply `update` to a nation's record and return the result.
    pub fn update_nation<F>(&self, name: &str, update: F) -> NationRecord
    where
        F: FnOnce(&mut NationRecord),
    {
        let now = Utc::now();
        if !self.nations.contains_key(name) {
            self.make_room();
        }

        let mut entry = self
            .nations
            .entry(name.to_owned())
            .or_insert_with(|| NationRecord::new(now));
        let record = entry.value_mut();
        record.last_seen = now;
        update(record);
        *record
    }

    /// Drop nations nobody has looked at within the idle TTL.
    pub fn evict_idle_nations(&self, now: DateTime<Utc>) -> usize {
        let ttl_secs = i64::try_from(self.nation_idle_ttl.as_secs()).unwrap_or(i64::MAX);
        let before = self.nations.len();
        self.nations.retain(|_, record| {
            now.signed_duration_since(record.last_seen).num_seconds() < ttl_secs
        });
        let evicted = before.saturating_sub(self.nations.len());
        if evicted > 0 {
            self.observability.record_evicted_nations(evicted as u64);
        }
        evicted
    }

    fn make_room(&self) {
        while self.nations.len() >= self.max_nations {
            if !self.evict_least_recent_nation() {
                break;
            }
        }
    }

    fn evict_least_recent_nation(&self) -> bool {
        let Some(oldest_name) = self
            .nations
            .iter()
            .min_by_key(|entry| entry.value().last_seen)
            .map(|entry| entry.key().clone())
        else {
            return false;
        };
        debug!(nation = %oldest_name, "nation registry full, evicting least recent");
        let removed = self.nations.remove(&oldest_name).is_some();
        if removed {
            self.observability.record_evicted_nations(1);
        }
        removed
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_presets() -> Bytes {
    let table: BTreeMap<&'static str, AllocationVector> = Preset::ALL
        .into_iter()
        .map(|preset| (preset.as_str(), preset.allocation()))
        .collect();
    serde_json::to_vec(&table)
        .map(Bytes::from)
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to serialize preset table");
            Bytes::from_static(b"{}")
        })
}
