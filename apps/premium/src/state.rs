//! Composition root — everything the upsell surfaces share.
//!
//! The host builds one `PremiumContext` per application load and passes it
//! (or views derived from it) down to components. Decision logic stays in
//! the pure modules; this type only wires snapshots into them.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::engagement::EngagementStore;
use crate::errors::PremiumError;
use crate::external::analytics::{events, AnalyticsSink};
use crate::external::navigation::{Navigator, UpgradeIntent};
use crate::gate::FeatureGate;
use crate::incentives::catalog::load_catalog;
use crate::incentives::presenter::IncentivePresenter;
use crate::incentives::selector::{select_incentive, VisitorProfile};
use crate::models::incentive::{IncentiveConfig, TimeOfDay};
use crate::revelation::{classify, should_show_prompt, RevelationProfile};
use crate::sched::Scheduler;
use crate::storage::KeyValueStore;

pub struct PremiumContext {
    pub config: Config,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub scheduler: Arc<dyn Scheduler>,
    pub catalog: Vec<IncentiveConfig>,
    engagement: EngagementStore,
}

impl std::fmt::Debug for PremiumContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PremiumContext").finish_non_exhaustive()
    }
}

impl PremiumContext {
    /// Builds the context and records the session start. Called once per
    /// application load.
    pub fn initialize(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        analytics: Arc<dyn AnalyticsSink>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, PremiumError> {
        Self::initialize_at(config, storage, analytics, scheduler, Utc::now())
    }

    pub fn initialize_at(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        analytics: Arc<dyn AnalyticsSink>,
        scheduler: Arc<dyn Scheduler>,
        now: DateTime<Utc>,
    ) -> Result<Self, PremiumError> {
        config
            .validate()
            .map_err(|e| PremiumError::Configuration(e.to_string()))?;
        let catalog = load_catalog(config.catalog_path.as_deref())?;
        let mut engagement = EngagementStore::open(storage, config.storage_key.clone());
        engagement.start_session(now);
        info!(
            sessions = engagement.snapshot().total_sessions,
            incentives = catalog.len(),
            "premium context initialized"
        );
        Ok(PremiumContext {
            config,
            analytics,
            scheduler,
            catalog,
            engagement,
        })
    }

    /// Fail-fast guard for code that requires the provider scope. A `None`
    /// here is a wiring bug, never a runtime condition to recover from.
    pub fn require<'a>(
        ctx: Option<&'a PremiumContext>,
        caller: &'static str,
    ) -> Result<&'a PremiumContext, PremiumError> {
        ctx.ok_or(PremiumError::OutsideProvider(caller))
    }

    pub fn engagement(&self) -> &EngagementStore {
        &self.engagement
    }

    pub fn engagement_mut(&mut self) -> &mut EngagementStore {
        &mut self.engagement
    }

    /// Revelation profile for one feature, recomputed from the snapshot.
    pub fn revelation_for(&self, feature: &str) -> RevelationProfile {
        let record = self.engagement.snapshot();
        classify(
            record.visits_for(feature),
            record.time_spent_for(feature),
            record.total_sessions,
            record.conversion_attempts,
        )
    }

    /// Whether the given prompt for a feature should render right now.
    pub fn prompt_visible(&self, feature: &str, prompt_id: &str, now: DateTime<Utc>) -> bool {
        let record = self.engagement.snapshot();
        let profile = self.revelation_for(feature);
        should_show_prompt(
            &profile,
            record.visits_for(feature),
            self.engagement.prompt_dismissed_at(prompt_id),
            now,
        )
    }

    /// Selector input derived from the engagement snapshot. `time_of_day`
    /// comes from the host since the core never reads local time zones.
    pub fn visitor_profile(&self, time_of_day: TimeOfDay, now: DateTime<Utc>) -> VisitorProfile {
        let record = self.engagement.snapshot();
        let tenure_days = record
            .first_seen
            .map(|seen| now.signed_duration_since(seen).num_days().max(0) as u32)
            .unwrap_or(0);
        let interactions = record.total_feature_interactions();
        let stage = classify(
            interactions,
            record.total_time_spent(),
            record.total_sessions,
            record.conversion_attempts,
        )
        .stage;
        VisitorProfile {
            is_new_user: tenure_days < 1,
            tenure_days,
            time_of_day,
            total_sessions: record.total_sessions,
            feature_interactions: interactions,
            engagement_stage: stage,
        }
    }

    /// Runs the selector against the configured catalog.
    pub fn next_incentive(
        &self,
        shown: &HashSet<String>,
        time_of_day: TimeOfDay,
        now: DateTime<Utc>,
    ) -> Option<&IncentiveConfig> {
        let profile = self.visitor_profile(time_of_day, now);
        select_incentive(&self.catalog, shown, &profile, now)
    }

    /// New gate mount for a feature, wired to the shared analytics sink.
    pub fn gate(&self, feature: &str) -> FeatureGate {
        FeatureGate::new(feature, self.analytics.clone())
    }

    /// New incentive presenter scoped to one surface's lifetime.
    pub fn presenter(&self) -> IncentivePresenter {
        IncentivePresenter::new(self.scheduler.clone(), self.analytics.clone())
    }

    /// Upgrade-intent click: counts the conversion attempt, tracks, and
    /// hands off to the host router.
    pub fn upgrade_clicked(
        &mut self,
        source: &str,
        incentive_id: Option<String>,
        navigator: &dyn Navigator,
    ) {
        self.engagement.record_conversion_attempt();
        self.analytics.track(
            events::UPGRADE_CLICKED,
            json!({ "source": source, "incentive_id": incentive_id }),
        );
        navigator.go_to_upgrade(UpgradeIntent {
            destination: self.config.upgrade_destination.clone(),
            source: source.to_string(),
            incentive_id,
        });
    }
}
