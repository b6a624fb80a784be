//! Prompt visibility — the dismissal window and teaser-stage gate.

use chrono::{DateTime, Utc};

use crate::revelation::{RevelationProfile, RevelationStage};

/// A dismissed prompt stays hidden for exactly 24 hours from dismissal time,
/// then reactivates automatically.
pub const DISMISSAL_SUPPRESSION_MS: i64 = 86_400_000;

/// Decides whether a prompt should render right now.
///
/// `dismissed_at` is the per-prompt dismissal timestamp from the engagement
/// store (None if never dismissed). `visits` is the visit count for the
/// feature the prompt belongs to: teaser-stage prompts hold off until at
/// least one visit has been recorded.
pub fn should_show_prompt(
    profile: &RevelationProfile,
    visits: u32,
    dismissed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if let Some(dismissed) = dismissed_at {
        let elapsed_ms = now.signed_duration_since(dismissed).num_milliseconds();
        if elapsed_ms < DISMISSAL_SUPPRESSION_MS {
            return false;
        }
    }

    if profile.stage == RevelationStage::Teaser && visits == 0 {
        return false;
    }

    true
}
