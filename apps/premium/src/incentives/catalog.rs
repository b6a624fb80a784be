//! Incentive catalog — built-in defaults plus an optional JSON override.
//!
//! Loaded once at startup and immutable afterwards. Catalog order matters:
//! the selector breaks urgency ties in favor of earlier entries.

use std::path::Path;

use tracing::info;

use crate::errors::PremiumError;
use crate::models::incentive::{
    IncentiveConditions, IncentiveConfig, IncentiveTrigger, Urgency,
};

/// The shipped catalog. Order encodes tie-break priority within each
/// urgency tier.
pub fn default_catalog() -> Vec<IncentiveConfig> {
    vec![
        IncentiveConfig {
            id: "welcome_discount".into(),
            headline: "20% off your first month".into(),
            body: "Unlock AI rewrites, premium templates, and unlimited PDF exports.".into(),
            cta_label: "Claim offer".into(),
            trigger: IncentiveTrigger::NewUser,
            urgency: Urgency::High,
            conditions: IncentiveConditions {
                min_sessions: Some(1),
                ..IncentiveConditions::default()
            },
            expires_at: None,
        },
        IncentiveConfig {
            id: "starter_trial".into(),
            headline: "Try Pro free for 7 days".into(),
            body: "See how your CV reads with every premium feature switched on.".into(),
            cta_label: "Start trial".into(),
            trigger: IncentiveTrigger::NewUser,
            urgency: Urgency::Medium,
            conditions: IncentiveConditions::default(),
            expires_at: None,
        },
        IncentiveConfig {
            id: "power_user_annual".into(),
            headline: "You're a power user — save 30% annually".into(),
            body: "You've been making the most of the builder. The annual plan pays for itself."
                .into(),
            cta_label: "See annual pricing".into(),
            trigger: IncentiveTrigger::HighEngagement,
            urgency: Urgency::High,
            conditions: IncentiveConditions {
                min_interactions: Some(3),
                ..IncentiveConditions::default()
            },
            expires_at: None,
        },
        IncentiveConfig {
            id: "decision_nudge".into(),
            headline: "Your CV is almost there".into(),
            body: "Finish strong: upgrade now and export a polished, recruiter-ready PDF.".into(),
            cta_label: "Upgrade now".into(),
            trigger: IncentiveTrigger::Consideration,
            urgency: Urgency::Critical,
            conditions: IncentiveConditions {
                min_sessions: Some(2),
                ..IncentiveConditions::default()
            },
            expires_at: None,
        },
        IncentiveConfig {
            id: "comeback_offer".into(),
            headline: "Welcome back — pick up where you left off".into(),
            body: "Your drafts are waiting. Upgrade to keep unlimited versions.".into(),
            cta_label: "See what's new".into(),
            trigger: IncentiveTrigger::ReturningUser,
            urgency: Urgency::Medium,
            conditions: IncentiveConditions {
                min_tenure_days: Some(7),
                ..IncentiveConditions::default()
            },
            expires_at: None,
        },
        IncentiveConfig {
            id: "reengage_tour".into(),
            headline: "Haven't tried the premium tools yet?".into(),
            body: "Take a two-minute tour of AI rewrites and premium layouts.".into(),
            cta_label: "Show me".into(),
            trigger: IncentiveTrigger::Abandonment,
            urgency: Urgency::Low,
            conditions: IncentiveConditions::default(),
            expires_at: None,
        },
    ]
}

/// Loads a catalog from a JSON file, or the built-in defaults when no path
/// is configured.
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<IncentiveConfig>, PremiumError> {
    let Some(path) = path else {
        return Ok(default_catalog());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| PremiumError::Catalog(format!("cannot read {}: {e}", path.display())))?;
    let catalog: Vec<IncentiveConfig> = serde_json::from_str(&raw)
        .map_err(|e| PremiumError::Catalog(format!("invalid catalog JSON: {e}")))?;
    info!("loaded incentive catalog from {} ({} entries)", path.display(), catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_default_catalog_covers_every_trigger() {
        let catalog = default_catalog();
        for trigger in [
            IncentiveTrigger::NewUser,
            IncentiveTrigger::ReturningUser,
            IncentiveTrigger::HighEngagement,
            IncentiveTrigger::Abandonment,
            IncentiveTrigger::Consideration,
        ] {
            assert!(
                catalog.iter().any(|i| i.trigger == trigger),
                "no catalog entry for {trigger:?}"
            );
        }
    }

    #[test]
    fn test_load_catalog_without_path_returns_defaults() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, default_catalog());
    }

    #[test]
    fn test_load_catalog_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "id": "seasonal",
                "headline": "Holiday sale",
                "body": "50% off annual plans.",
                "cta_label": "Grab it",
                "trigger": "consideration",
                "urgency": "critical",
                "expires_at": "2026-12-31T23:59:59Z"
            }}]"#
        )
        .unwrap();
        let catalog = load_catalog(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, "seasonal");
        assert!(catalog[0].expires_at.is_some());
    }

    #[test]
    fn test_load_catalog_bad_json_is_a_catalog_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_catalog(Some(file.path())).unwrap_err();
        assert!(matches!(err, PremiumError::Catalog(_)));
    }
}
