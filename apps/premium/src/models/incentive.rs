#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trigger category an incentive is bound to. Each maps to a fixed
/// membership predicate over the visitor profile (see `incentives::selector`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveTrigger {
    NewUser,
    ReturningUser,
    HighEngagement,
    Abandonment,
    Consideration,
}

/// Urgency tier of an incentive. Drives ranking weight, reveal delay, and
/// auto-hide duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// Ranking weight: low=1, medium=2, high=3, critical=4.
    pub fn weight(self) -> u8 {
        match self {
            Urgency::Low => 1,
            Urgency::Medium => 2,
            Urgency::High => 3,
            Urgency::Critical => 4,
        }
    }
}

/// Coarse local-time bucket, supplied by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// Eligibility conditions an incentive declares. Every `Some` condition must
/// hold for the incentive to remain a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncentiveConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_interactions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sessions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_tenure_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
}

/// One entry of the static incentive catalog. Immutable after startup;
/// filtered per render against the current engagement state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveConfig {
    pub id: String,
    pub headline: String,
    pub body: String,
    pub cta_label: String,
    pub trigger: IncentiveTrigger,
    pub urgency: Urgency,
    #[serde(default)]
    pub conditions: IncentiveConditions,
    /// Absolute expiry. Expired incentives are never selected; incentives
    /// with an expiry also get a 1-second countdown on their card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_weights_are_strictly_increasing() {
        assert!(Urgency::Low.weight() < Urgency::Medium.weight());
        assert!(Urgency::Medium.weight() < Urgency::High.weight());
        assert!(Urgency::High.weight() < Urgency::Critical.weight());
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(13), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(19), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(2), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
    }

    #[test]
    fn test_catalog_entry_json_roundtrip() {
        let json = r#"{
            "id": "welcome_discount",
            "headline": "20% off your first month",
            "body": "Unlock AI rewrites and unlimited exports.",
            "cta_label": "Claim offer",
            "trigger": "new_user",
            "urgency": "high",
            "conditions": { "min_sessions": 1 }
        }"#;
        let incentive: IncentiveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(incentive.trigger, IncentiveTrigger::NewUser);
        assert_eq!(incentive.urgency, Urgency::High);
        assert_eq!(incentive.conditions.min_sessions, Some(1));
        assert!(incentive.expires_at.is_none());
    }
}
