//! Engagement store — read-modify-write persistence around the reducer.
//!
//! The record is loaded once at construction and written back on every
//! mutation. Storage failures never surface to the user: the store logs at
//! warn level and keeps serving the in-memory copy for the rest of the
//! session (the data model tolerates a "never persisted" record).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::engagement::actions::{reduce, EngagementAction};
use crate::models::engagement::EngagementRecord;
use crate::storage::KeyValueStore;

/// Suffix for the per-prompt dismissal-timestamp map. Kept under its own key,
/// separate from the record's dismissed-prompt set; the two intentionally
/// have different persistence scopes.
const DISMISSALS_SUFFIX: &str = ":dismissals";

pub struct EngagementStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    record: EngagementRecord,
    dismissals: BTreeMap<String, DateTime<Utc>>,
}

impl EngagementStore {
    /// Loads the persisted record, falling back to all-zero defaults when the
    /// key is absent, unreadable, or corrupt.
    pub fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let record = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!("corrupt engagement record under '{key}', starting fresh: {e}");
                    EngagementRecord::default()
                }
            },
            Ok(None) => EngagementRecord::default(),
            Err(e) => {
                warn!("cannot read engagement record, using in-memory defaults: {e}");
                EngagementRecord::default()
            }
        };

        let dismissals_key = format!("{key}{DISMISSALS_SUFFIX}");
        let dismissals = match storage.get(&dismissals_key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("corrupt dismissal map under '{dismissals_key}': {e}");
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("cannot read dismissal map: {e}");
                BTreeMap::new()
            }
        };

        EngagementStore {
            storage,
            key,
            record,
            dismissals,
        }
    }

    /// Immutable view of the current record. Policy and selector code takes
    /// this snapshot as an argument; nothing reads through shared state.
    pub fn snapshot(&self) -> EngagementRecord {
        self.record.clone()
    }

    pub fn apply(&mut self, action: EngagementAction) {
        debug!(?action, "engagement action");
        self.record = reduce(self.record.clone(), action);
        self.persist_record();
    }

    /// Called once per application load.
    pub fn start_session(&mut self, now: DateTime<Utc>) {
        self.apply(EngagementAction::SessionStarted { at: now });
    }

    pub fn record_visit(&mut self, feature: &str) {
        self.apply(EngagementAction::FeatureVisited {
            feature: feature.to_string(),
        });
    }

    pub fn record_time(&mut self, feature: &str, ms: u64) {
        self.apply(EngagementAction::TimeSpent {
            feature: feature.to_string(),
            ms,
        });
    }

    pub fn record_conversion_attempt(&mut self) {
        self.apply(EngagementAction::ConversionAttempted);
    }

    /// Records an explicit close of a prompt: adds the id to the persisted
    /// set and stamps the dismissal time used by the 24-hour suppression
    /// window.
    pub fn dismiss_prompt(&mut self, prompt_id: &str, now: DateTime<Utc>) {
        self.apply(EngagementAction::PromptDismissed {
            prompt_id: prompt_id.to_string(),
        });
        self.dismissals.insert(prompt_id.to_string(), now);
        self.persist_dismissals();
    }

    pub fn prompt_dismissed_at(&self, prompt_id: &str) -> Option<DateTime<Utc>> {
        self.dismissals.get(prompt_id).copied()
    }

    fn persist_record(&self) {
        let raw = match serde_json::to_string(&self.record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("cannot serialize engagement record: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &raw) {
            warn!("cannot persist engagement record, continuing in memory: {e}");
        }
    }

    fn persist_dismissals(&self) {
        let key = format!("{}{DISMISSALS_SUFFIX}", self.key);
        let raw = match serde_json::to_string(&self.dismissals) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("cannot serialize dismissal map: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(&key, &raw) {
            warn!("cannot persist dismissal map, continuing in memory: {e}");
        }
    }
}
