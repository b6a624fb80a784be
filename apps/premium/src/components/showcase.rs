//! Premium feature showcase — the grid of locked/unlocked capabilities.

use serde::{Deserialize, Serialize};

use crate::models::access::FeatureAccess;
use crate::revelation::RevelationProfile;

/// Static description of a premium capability shown in the showcase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseItem {
    pub feature: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseEntryView {
    pub item: ShowcaseItem,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseView {
    pub entries: Vec<ShowcaseEntryView>,
    /// 1–5, straight from the revelation profile.
    pub prominence: u8,
    pub show_special_offers: bool,
}

/// Marks each showcased feature locked or unlocked from the host-supplied
/// access results, and carries the revelation prominence through for the
/// renderer.
pub fn build_showcase(
    items: &[ShowcaseItem],
    access: impl Fn(&str) -> FeatureAccess,
    profile: &RevelationProfile,
) -> ShowcaseView {
    let entries = items
        .iter()
        .map(|item| {
            let a = access(&item.feature);
            ShowcaseEntryView {
                item: item.clone(),
                locked: !a.has_access,
            }
        })
        .collect();
    ShowcaseView {
        entries,
        prominence: profile.prominence,
        show_special_offers: profile.show_special_offers,
    }
}
