//! Incentive card view — what the revealed offer looks like.

use serde::{Deserialize, Serialize};

use crate::models::incentive::{IncentiveConfig, Urgency};
use crate::revelation::MessagingTone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveCardView {
    pub incentive_id: String,
    pub headline: String,
    pub body: String,
    pub cta_label: String,
    pub urgency: Urgency,
    pub tone: MessagingTone,
    /// "12:05"-style remaining time for expiring offers.
    pub countdown: Option<String>,
    pub dismissible: bool,
}

impl IncentiveCardView {
    pub fn build(
        incentive: &IncentiveConfig,
        tone: MessagingTone,
        countdown_secs: Option<i64>,
    ) -> Self {
        IncentiveCardView {
            incentive_id: incentive.id.clone(),
            headline: incentive.headline.clone(),
            body: incentive.body.clone(),
            cta_label: incentive.cta_label.clone(),
            urgency: incentive.urgency,
            tone,
            countdown: countdown_secs.map(format_countdown),
            dismissible: true,
        }
    }
}

/// Formats remaining seconds as `H:MM:SS` past the hour, `M:SS` below it.
fn format_countdown(secs: i64) -> String {
    let secs = secs.max(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
