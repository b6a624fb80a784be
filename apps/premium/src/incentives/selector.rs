//! Incentive selector — filters and ranks the catalog to at most one offer.
//!
//! Pure: no clocks, no side effects. The caller owns the consequences of a
//! selection (reveal/auto-hide timers live in `presenter`).

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::incentive::{IncentiveConfig, IncentiveTrigger, TimeOfDay};
use crate::revelation::RevelationStage;

/// User attributes the trigger predicates and eligibility conditions are
/// evaluated against. Derived from the engagement snapshot by the context.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorProfile {
    pub is_new_user: bool,
    pub tenure_days: u32,
    pub time_of_day: TimeOfDay,
    pub total_sessions: u32,
    pub feature_interactions: u32,
    pub engagement_stage: RevelationStage,
}

/// Picks the single incentive to display, or none.
///
/// 1. Drop incentives already shown this session.
/// 2. Drop expired incentives.
/// 3. Drop incentives whose declared conditions are unmet.
/// 4. Drop incentives whose trigger predicate doesn't match the profile.
/// 5. Highest urgency weight wins; ties go to catalog order.
pub fn select_incentive<'a>(
    catalog: &'a [IncentiveConfig],
    shown: &HashSet<String>,
    profile: &VisitorProfile,
    now: DateTime<Utc>,
) -> Option<&'a IncentiveConfig> {
    catalog
        .iter()
        .filter(|incentive| !shown.contains(&incentive.id))
        .filter(|incentive| incentive.expires_at.is_none_or(|expiry| expiry > now))
        .filter(|incentive| conditions_met(incentive, profile))
        .filter(|incentive| trigger_matches(incentive.trigger, profile))
        // Strict > keeps the first-defined candidate on ties.
        .fold(None, |best: Option<&IncentiveConfig>, candidate| match best {
            Some(current) if candidate.urgency.weight() <= current.urgency.weight() => best,
            _ => Some(candidate),
        })
}

fn conditions_met(incentive: &IncentiveConfig, profile: &VisitorProfile) -> bool {
    let c = &incentive.conditions;
    if c.min_interactions
        .is_some_and(|min| profile.feature_interactions < min)
    {
        return false;
    }
    if c.min_sessions.is_some_and(|min| profile.total_sessions < min) {
        return false;
    }
    if c.min_tenure_days
        .is_some_and(|min| profile.tenure_days < min)
    {
        return false;
    }
    if c.time_of_day.is_some_and(|tod| profile.time_of_day != tod) {
        return false;
    }
    true
}

/// Fixed trigger → membership predicate table.
fn trigger_matches(trigger: IncentiveTrigger, profile: &VisitorProfile) -> bool {
    match trigger {
        IncentiveTrigger::NewUser => profile.is_new_user && profile.total_sessions <= 3,
        IncentiveTrigger::ReturningUser => !profile.is_new_user && profile.tenure_days >= 7,
        IncentiveTrigger::HighEngagement => {
            profile.feature_interactions >= 3
                && profile.engagement_stage != RevelationStage::Teaser
        }
        IncentiveTrigger::Abandonment => {
            !profile.is_new_user
                && profile.total_sessions >= 2
                && profile.feature_interactions == 0
        }
        IncentiveTrigger::Consideration => {
            profile.engagement_stage == RevelationStage::Conversion
                || profile.feature_interactions >= 5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::incentive::{IncentiveConditions, Urgency};
    use chrono::TimeZone;

    fn make_incentive(id: &str, trigger: IncentiveTrigger, urgency: Urgency) -> IncentiveConfig {
        IncentiveConfig {
            id: id.to_string(),
            headline: format!("{id} headline"),
            body: "Unlock premium templates and AI rewrites.".to_string(),
            cta_label: "Upgrade".to_string(),
            trigger,
            urgency,
            conditions: IncentiveConditions::default(),
            expires_at: None,
        }
    }

    fn engaged_profile() -> VisitorProfile {
        VisitorProfile {
            is_new_user: false,
            tenure_days: 30,
            time_of_day: TimeOfDay::Evening,
            total_sessions: 8,
            feature_interactions: 6,
            engagement_stage: RevelationStage::Conversion,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_already_shown_incentive_excluded() {
        let catalog = vec![make_incentive(
            "annual_deal",
            IncentiveTrigger::Consideration,
            Urgency::High,
        )];
        let shown: HashSet<String> = ["annual_deal".to_string()].into();
        assert!(select_incentive(&catalog, &shown, &engaged_profile(), now()).is_none());
    }

    #[test]
    fn test_expired_incentive_excluded() {
        let mut incentive =
            make_incentive("flash_sale", IncentiveTrigger::Consideration, Urgency::Critical);
        incentive.expires_at = Some(now() - chrono::Duration::seconds(1));
        assert!(select_incentive(&[incentive], &HashSet::new(), &engaged_profile(), now())
            .is_none());
    }

    #[test]
    fn test_future_expiry_still_eligible() {
        let mut incentive =
            make_incentive("flash_sale", IncentiveTrigger::Consideration, Urgency::Critical);
        incentive.expires_at = Some(now() + chrono::Duration::hours(1));
        let incentives = [incentive];
        let picked =
            select_incentive(&incentives, &HashSet::new(), &engaged_profile(), now()).unwrap();
        assert_eq!(picked.id, "flash_sale");
    }

    #[test]
    fn test_min_conditions_never_violated() {
        let mut incentive =
            make_incentive("power_user", IncentiveTrigger::Consideration, Urgency::High);
        incentive.conditions = IncentiveConditions {
            min_interactions: Some(10),
            min_sessions: None,
            min_tenure_days: None,
            time_of_day: None,
        };
        // 6 interactions < 10 required
        assert!(
            select_incentive(&[incentive.clone()], &HashSet::new(), &engaged_profile(), now())
                .is_none()
        );
        incentive.conditions.min_interactions = Some(6);
        assert!(
            select_incentive(&[incentive], &HashSet::new(), &engaged_profile(), now()).is_some()
        );
    }

    #[test]
    fn test_time_of_day_condition() {
        let mut incentive =
            make_incentive("night_owl", IncentiveTrigger::Consideration, Urgency::Medium);
        incentive.conditions.time_of_day = Some(TimeOfDay::Night);
        let mut profile = engaged_profile();
        profile.time_of_day = TimeOfDay::Evening;
        assert!(
            select_incentive(&[incentive.clone()], &HashSet::new(), &profile, now()).is_none()
        );
        profile.time_of_day = TimeOfDay::Night;
        assert!(select_incentive(&[incentive], &HashSet::new(), &profile, now()).is_some());
    }

    #[test]
    fn test_critical_beats_high() {
        let catalog = vec![
            make_incentive("steady", IncentiveTrigger::Consideration, Urgency::High),
            make_incentive("flash", IncentiveTrigger::Consideration, Urgency::Critical),
        ];
        let picked =
            select_incentive(&catalog, &HashSet::new(), &engaged_profile(), now()).unwrap();
        assert_eq!(picked.id, "flash");
    }

    #[test]
    fn test_urgency_tie_resolves_to_catalog_order() {
        let catalog = vec![
            make_incentive("first", IncentiveTrigger::Consideration, Urgency::High),
            make_incentive("second", IncentiveTrigger::Consideration, Urgency::High),
        ];
        let picked =
            select_incentive(&catalog, &HashSet::new(), &engaged_profile(), now()).unwrap();
        assert_eq!(picked.id, "first");
    }

    #[test]
    fn test_new_user_trigger_requires_low_session_count() {
        let profile = VisitorProfile {
            is_new_user: true,
            tenure_days: 0,
            time_of_day: TimeOfDay::Morning,
            total_sessions: 2,
            feature_interactions: 0,
            engagement_stage: RevelationStage::Teaser,
        };
        assert!(trigger_matches(IncentiveTrigger::NewUser, &profile));
        let mut seasoned = profile.clone();
        seasoned.total_sessions = 4;
        assert!(!trigger_matches(IncentiveTrigger::NewUser, &seasoned));
        let mut not_new = profile;
        not_new.is_new_user = false;
        assert!(!trigger_matches(IncentiveTrigger::NewUser, &not_new));
    }

    #[test]
    fn test_high_engagement_trigger_excludes_teaser_stage() {
        let mut profile = engaged_profile();
        profile.engagement_stage = RevelationStage::Preview;
        profile.feature_interactions = 3;
        assert!(trigger_matches(IncentiveTrigger::HighEngagement, &profile));
        profile.engagement_stage = RevelationStage::Teaser;
        assert!(!trigger_matches(IncentiveTrigger::HighEngagement, &profile));
        profile.engagement_stage = RevelationStage::Preview;
        profile.feature_interactions = 2;
        assert!(!trigger_matches(IncentiveTrigger::HighEngagement, &profile));
    }

    #[test]
    fn test_consideration_trigger_via_stage_or_interactions() {
        let mut profile = engaged_profile();
        profile.engagement_stage = RevelationStage::Conversion;
        profile.feature_interactions = 0;
        assert!(trigger_matches(IncentiveTrigger::Consideration, &profile));
        profile.engagement_stage = RevelationStage::Preview;
        profile.feature_interactions = 5;
        assert!(trigger_matches(IncentiveTrigger::Consideration, &profile));
        profile.feature_interactions = 4;
        assert!(!trigger_matches(IncentiveTrigger::Consideration, &profile));
    }

    #[test]
    fn test_returning_user_trigger_needs_week_of_tenure() {
        let mut profile = engaged_profile();
        profile.tenure_days = 7;
        assert!(trigger_matches(IncentiveTrigger::ReturningUser, &profile));
        profile.tenure_days = 6;
        assert!(!trigger_matches(IncentiveTrigger::ReturningUser, &profile));
    }

    #[test]
    fn test_abandonment_trigger_needs_zero_interactions() {
        let profile = VisitorProfile {
            is_new_user: false,
            tenure_days: 10,
            time_of_day: TimeOfDay::Afternoon,
            total_sessions: 3,
            feature_interactions: 0,
            engagement_stage: RevelationStage::Teaser,
        };
        assert!(trigger_matches(IncentiveTrigger::Abandonment, &profile));
        let mut engaged = profile;
        engaged.feature_interactions = 1;
        assert!(!trigger_matches(IncentiveTrigger::Abandonment, &engaged));
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        assert!(select_incentive(&[], &HashSet::new(), &engaged_profile(), now()).is_none());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let catalog = vec![
            make_incentive("a", IncentiveTrigger::Consideration, Urgency::Medium),
            make_incentive("b", IncentiveTrigger::Consideration, Urgency::Critical),
            make_incentive("c", IncentiveTrigger::Consideration, Urgency::Critical),
        ];
        for _ in 0..5 {
            let picked =
                select_incentive(&catalog, &HashSet::new(), &engaged_profile(), now()).unwrap();
            assert_eq!(picked.id, "b");
        }
    }
}
