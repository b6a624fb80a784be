//! Engagement reducer — the only way the engagement record changes.
//!
//! `reduce` is pure: same record + same action → same output, no I/O. The
//! store applies it and persists the result; tests exercise it directly.

use chrono::{DateTime, Utc};

use crate::models::engagement::{EngagementRecord, TOTAL_TIME_KEY};

#[derive(Debug, Clone, PartialEq)]
pub enum EngagementAction {
    /// Fired once per application load.
    SessionStarted { at: DateTime<Utc> },
    FeatureVisited { feature: String },
    /// Accumulates into the feature bucket and the `"total"` bucket.
    TimeSpent { feature: String, ms: u64 },
    ConversionAttempted,
    PromptDismissed { prompt_id: String },
}

pub fn reduce(mut record: EngagementRecord, action: EngagementAction) -> EngagementRecord {
    match action {
        EngagementAction::SessionStarted { at } => {
            record.total_sessions = record.total_sessions.saturating_add(1);
            record.last_visit = Some(at);
            record.first_seen.get_or_insert(at);
        }
        EngagementAction::FeatureVisited { feature } => {
            let count = record.feature_visits.entry(feature).or_insert(0);
            *count = count.saturating_add(1);
        }
        EngagementAction::TimeSpent { feature, ms } => {
            let per_feature = record.time_spent_ms.entry(feature).or_insert(0);
            *per_feature = per_feature.saturating_add(ms);
            let total = record
                .time_spent_ms
                .entry(TOTAL_TIME_KEY.to_string())
                .or_insert(0);
            *total = total.saturating_add(ms);
        }
        EngagementAction::ConversionAttempted => {
            record.conversion_attempts = record.conversion_attempts.saturating_add(1);
        }
        EngagementAction::PromptDismissed { prompt_id } => {
            record.dismissed_prompts.insert(prompt_id);
        }
    }
    record
}
