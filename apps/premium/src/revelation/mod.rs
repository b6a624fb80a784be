//! Revelation policy — classifies engagement into an upsell stage/intensity.
//!
//! `classify` is a pure decision table: first matching rule wins, no
//! fallthrough. It is recomputed on every read and never persisted.

pub mod prompts;

pub use prompts::{should_show_prompt, DISMISSAL_SUPPRESSION_MS};

use serde::{Deserialize, Serialize};

/// How far along the upsell funnel a user is judged to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevelationStage {
    Teaser,
    Preview,
    Conversion,
    /// Reserved for post-purchase messaging driven by premium status; the
    /// classifier itself never produces it.
    Retention,
}

/// Visual/temporal aggressiveness of prompts, orthogonal to stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
    Urgent,
}

/// Copy register the upsell UI should use at this point of the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingTone {
    Curiosity,
    Value,
    SocialProof,
    Urgency,
}

/// Full output of the classifier. Derived state: recompute, don't store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevelationProfile {
    pub stage: RevelationStage,
    pub intensity: Intensity,
    pub tone: MessagingTone,
    pub show_special_offers: bool,
    /// 1–5 scale consumed by the presentation layer.
    pub prominence: u8,
}

/// Maps engagement counters for one feature to a revelation profile.
///
/// Rules, evaluated top-down, first match wins:
/// 1. visits ≥ 5, or conversions ≥ 3, or (visits ≥ 3 and > 5 min spent)
///    → conversion / urgent
/// 2. visits ≥ 3, or (visits ≥ 2 and > 2 min spent), or sessions ≥ 5
///    → conversion / high
/// 3. visits ≥ 2, or > 1 min spent, or sessions ≥ 3 → preview / medium
/// 4. otherwise → teaser / low
pub fn classify(
    visits: u32,
    time_spent_ms: u64,
    total_sessions: u32,
    conversion_attempts: u32,
) -> RevelationProfile {
    if visits >= 5 || conversion_attempts >= 3 || (visits >= 3 && time_spent_ms > 300_000) {
        RevelationProfile {
            stage: RevelationStage::Conversion,
            intensity: Intensity::Urgent,
            tone: MessagingTone::Urgency,
            show_special_offers: true,
            prominence: 5,
        }
    } else if visits >= 3 || (visits >= 2 && time_spent_ms > 120_000) || total_sessions >= 5 {
        RevelationProfile {
            stage: RevelationStage::Conversion,
            intensity: Intensity::High,
            tone: MessagingTone::SocialProof,
            show_special_offers: true,
            prominence: 4,
        }
    } else if visits >= 2 || time_spent_ms > 60_000 || total_sessions >= 3 {
        RevelationProfile {
            stage: RevelationStage::Preview,
            intensity: Intensity::Medium,
            tone: MessagingTone::Value,
            show_special_offers: false,
            prominence: 3,
        }
    } else {
        RevelationProfile {
            stage: RevelationStage::Teaser,
            intensity: Intensity::Low,
            tone: MessagingTone::Curiosity,
            show_special_offers: false,
            prominence: 2,
        }
    }
}
