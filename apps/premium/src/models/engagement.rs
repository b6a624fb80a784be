#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key under which cross-feature time is accumulated in `time_spent_ms`.
pub const TOTAL_TIME_KEY: &str = "total";

/// Per-profile engagement counters, persisted in the injected key-value
/// store and reconstructed fully on every load. All counters are
/// non-negative and non-decreasing for the lifetime of the profile; nothing
/// is ever deleted short of the user clearing storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    /// Feature id → visit count. Monotone per feature, never reset.
    #[serde(default)]
    pub feature_visits: BTreeMap<String, u32>,
    /// Incremented once per application load.
    #[serde(default)]
    pub total_sessions: u32,
    /// Feature id (or `"total"`) → accumulated milliseconds.
    #[serde(default)]
    pub time_spent_ms: BTreeMap<String, u64>,
    /// Timestamp of the most recent load.
    #[serde(default)]
    pub last_visit: Option<DateTime<Utc>>,
    /// Timestamp of the first session ever recorded. Tenure and new-user
    /// attributes for incentive targeting derive from this.
    #[serde(default)]
    pub first_seen: Option<DateTime<Utc>>,
    /// Count of upgrade-intent clicks.
    #[serde(default)]
    pub conversion_attempts: u32,
    /// Prompt ids the user has explicitly closed. Dismissal timestamps are
    /// persisted separately by the store.
    #[serde(default)]
    pub dismissed_prompts: BTreeSet<String>,
}

impl Default for EngagementRecord {
    fn default() -> Self {
        EngagementRecord {
            feature_visits: BTreeMap::new(),
            total_sessions: 0,
            time_spent_ms: BTreeMap::new(),
            last_visit: None,
            first_seen: None,
            conversion_attempts: 0,
            dismissed_prompts: BTreeSet::new(),
        }
    }
}

impl EngagementRecord {
    pub fn visits_for(&self, feature: &str) -> u32 {
        self.feature_visits.get(feature).copied().unwrap_or(0)
    }

    pub fn time_spent_for(&self, feature: &str) -> u64 {
        self.time_spent_ms.get(feature).copied().unwrap_or(0)
    }

    /// Total visits across all premium features.
    pub fn total_feature_interactions(&self) -> u32 {
        self.feature_visits.values().sum()
    }

    pub fn total_time_spent(&self) -> u64 {
        self.time_spent_for(TOTAL_TIME_KEY)
    }
}
