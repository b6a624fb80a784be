//! Incentive presenter — owns the side effects of a selection.
//!
//! Selection itself is pure (`selector`); this type schedules the delayed
//! reveal, the independent auto-hide, and the optional 1-second countdown,
//! and cancels all of them whenever the selection changes or the surface
//! unmounts. The shown-incentive set lives here, scoped to the presenter's
//! lifetime, and is intentionally never persisted.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::external::analytics::{events, AnalyticsSink};
use crate::incentives::timing::{auto_hide_after, reveal_delay, COUNTDOWN_TICK};
use crate::models::incentive::IncentiveConfig;
use crate::sched::{Scheduler, TaskHandle};

#[derive(Default)]
struct PresenterInner {
    /// Incentive ids revealed during this presenter's lifetime.
    shown: HashSet<String>,
    /// Incentive currently on screen, if any.
    visible: Option<String>,
    /// Seconds left on the active countdown card.
    countdown_secs: Option<i64>,
}

struct ActiveTimers {
    incentive_id: String,
    _reveal: TaskHandle,
    _auto_hide: TaskHandle,
    _countdown: Option<TaskHandle>,
}

pub struct IncentivePresenter {
    scheduler: Arc<dyn Scheduler>,
    analytics: Arc<dyn AnalyticsSink>,
    inner: Arc<Mutex<PresenterInner>>,
    active: Option<ActiveTimers>,
}

impl IncentivePresenter {
    pub fn new(scheduler: Arc<dyn Scheduler>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        IncentivePresenter {
            scheduler,
            analytics,
            inner: Arc::new(Mutex::new(PresenterInner::default())),
            active: None,
        }
    }

    /// Ids to exclude from the next selection pass.
    pub fn shown_ids(&self) -> HashSet<String> {
        self.inner.lock().expect("presenter lock").shown.clone()
    }

    /// Incentive currently revealed, if any.
    pub fn visible_incentive(&self) -> Option<String> {
        self.inner.lock().expect("presenter lock").visible.clone()
    }

    pub fn countdown_secs(&self) -> Option<i64> {
        self.inner.lock().expect("presenter lock").countdown_secs
    }

    /// Starts presenting a freshly selected incentive.
    ///
    /// Any previously scheduled timers are cancelled first, so a stale
    /// selection can never reveal or hide the wrong card.
    pub fn present(&mut self, incentive: &IncentiveConfig, now: DateTime<Utc>) {
        self.clear_active();
        debug!(id = %incentive.id, urgency = ?incentive.urgency, "presenting incentive");

        let reveal = {
            let inner = self.inner.clone();
            let analytics = self.analytics.clone();
            let id = incentive.id.clone();
            let urgency = incentive.urgency;
            self.scheduler.schedule(
                reveal_delay(incentive.urgency),
                Box::new(move || {
                    let mut inner = inner.lock().expect("presenter lock");
                    inner.shown.insert(id.clone());
                    inner.visible = Some(id.clone());
                    analytics.track(
                        events::INCENTIVE_SHOWN,
                        json!({ "incentive_id": id, "urgency": format!("{urgency:?}") }),
                    );
                }),
            )
        };

        let auto_hide = {
            let inner = self.inner.clone();
            let analytics = self.analytics.clone();
            let id = incentive.id.clone();
            self.scheduler.schedule(
                auto_hide_after(incentive.urgency),
                Box::new(move || {
                    let mut inner = inner.lock().expect("presenter lock");
                    if inner.visible.as_deref() == Some(id.as_str()) {
                        inner.visible = None;
                        inner.countdown_secs = None;
                        analytics
                            .track(events::INCENTIVE_AUTO_HIDDEN, json!({ "incentive_id": id }));
                    }
                }),
            )
        };

        let countdown = incentive.expires_at.map(|expires_at| {
            let remaining = (expires_at - now).num_seconds().max(0);
            self.inner.lock().expect("presenter lock").countdown_secs = Some(remaining);
            let inner = self.inner.clone();
            self.scheduler.schedule_repeating(
                COUNTDOWN_TICK,
                Box::new(move || {
                    let mut inner = inner.lock().expect("presenter lock");
                    if let Some(secs) = inner.countdown_secs {
                        inner.countdown_secs = Some((secs - 1).max(0));
                    }
                }),
            )
        });

        self.active = Some(ActiveTimers {
            incentive_id: incentive.id.clone(),
            _reveal: reveal,
            _auto_hide: auto_hide,
            _countdown: countdown,
        });
    }

    /// User explicitly closed the card.
    pub fn dismiss(&mut self) {
        let dismissed = {
            let mut inner = self.inner.lock().expect("presenter lock");
            inner.countdown_secs = None;
            inner.visible.take()
        };
        if let Some(id) = dismissed {
            self.analytics
                .track(events::INCENTIVE_DISMISSED, json!({ "incentive_id": id }));
        }
        self.clear_active();
    }

    /// Component teardown: every pending timer must die with the surface.
    pub fn teardown(&mut self) {
        self.clear_active();
        let mut inner = self.inner.lock().expect("presenter lock");
        inner.visible = None;
        inner.countdown_secs = None;
    }

    fn clear_active(&mut self) {
        // TaskHandle cancels on drop.
        self.active = None;
    }

    /// Id of the incentive whose timers are currently scheduled or running.
    pub fn active_incentive(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.incentive_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::analytics::RecordingSink;
    use crate::models::incentive::{IncentiveConditions, IncentiveTrigger, Urgency};
    use crate::sched::ManualScheduler;
    use chrono::TimeZone;
    use std::time::Duration;

    fn make_incentive(id: &str, urgency: Urgency) -> IncentiveConfig {
        IncentiveConfig {
            id: id.to_string(),
            headline: "Offer".into(),
            body: "Body".into(),
            cta_label: "Go".into(),
            trigger: IncentiveTrigger::Consideration,
            urgency,
            conditions: IncentiveConditions::default(),
            expires_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn setup() -> (ManualScheduler, Arc<RecordingSink>, IncentivePresenter) {
        let sched = ManualScheduler::new();
        let sink = Arc::new(RecordingSink::new());
        let presenter = IncentivePresenter::new(Arc::new(sched.clone()), sink.clone());
        (sched, sink, presenter)
    }

    #[test]
    fn test_reveal_fires_at_urgency_delay() {
        let (sched, sink, mut presenter) = setup();
        presenter.present(&make_incentive("flash", Urgency::Critical), now());

        sched.advance(Duration::from_millis(999));
        assert_eq!(presenter.visible_incentive(), None);
        assert!(presenter.shown_ids().is_empty());

        sched.advance(Duration::from_millis(1));
        assert_eq!(presenter.visible_incentive(), Some("flash".to_string()));
        assert!(presenter.shown_ids().contains("flash"));
        assert_eq!(sink.count(events::INCENTIVE_SHOWN), 1);
    }

    #[test]
    fn test_low_urgency_reveals_after_five_seconds() {
        let (sched, _sink, mut presenter) = setup();
        presenter.present(&make_incentive("tour", Urgency::Low), now());
        sched.advance(Duration::from_millis(4_999));
        assert_eq!(presenter.visible_incentive(), None);
        sched.advance(Duration::from_millis(1));
        assert_eq!(presenter.visible_incentive(), Some("tour".to_string()));
    }

    #[test]
    fn test_auto_hide_fires_on_its_own_timer() {
        let (sched, sink, mut presenter) = setup();
        presenter.present(&make_incentive("tour", Urgency::Low), now());

        // Revealed at 5s, auto-hidden at 30s from selection.
        sched.advance(Duration::from_millis(29_999));
        assert_eq!(presenter.visible_incentive(), Some("tour".to_string()));
        sched.advance(Duration::from_millis(1));
        assert_eq!(presenter.visible_incentive(), None);
        assert_eq!(sink.count(events::INCENTIVE_AUTO_HIDDEN), 1);
    }

    #[test]
    fn test_represent_cancels_stale_timers() {
        let (sched, sink, mut presenter) = setup();
        presenter.present(&make_incentive("first", Urgency::Critical), now());
        // Selection changes before the first reveal fires.
        sched.advance(Duration::from_millis(500));
        presenter.present(&make_incentive("second", Urgency::Critical), now());

        sched.advance(Duration::from_millis(1_000));
        assert_eq!(presenter.visible_incentive(), Some("second".to_string()));
        assert!(!presenter.shown_ids().contains("first"));
        assert_eq!(sink.count(events::INCENTIVE_SHOWN), 1);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let (sched, sink, mut presenter) = setup();
        presenter.present(&make_incentive("flash", Urgency::Critical), now());
        presenter.teardown();
        sched.advance(Duration::from_millis(120_000));
        assert_eq!(presenter.visible_incentive(), None);
        assert_eq!(sink.count(events::INCENTIVE_SHOWN), 0);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_dismiss_tracks_and_stops_timers() {
        let (sched, sink, mut presenter) = setup();
        presenter.present(&make_incentive("flash", Urgency::Critical), now());
        sched.advance(Duration::from_millis(1_000));
        assert_eq!(presenter.visible_incentive(), Some("flash".to_string()));

        presenter.dismiss();
        assert_eq!(presenter.visible_incentive(), None);
        assert_eq!(sink.count(events::INCENTIVE_DISMISSED), 1);
        // The auto-hide timer is gone; nothing fires later.
        sched.advance(Duration::from_millis(120_000));
        assert_eq!(sink.count(events::INCENTIVE_AUTO_HIDDEN), 0);
    }

    #[test]
    fn test_countdown_ticks_once_per_second() {
        let (sched, _sink, mut presenter) = setup();
        let mut incentive = make_incentive("seasonal", Urgency::Critical);
        incentive.expires_at = Some(now() + chrono::Duration::seconds(10));
        presenter.present(&incentive, now());

        assert_eq!(presenter.countdown_secs(), Some(10));
        sched.advance(Duration::from_secs(3));
        assert_eq!(presenter.countdown_secs(), Some(7));
        // Never goes negative.
        sched.advance(Duration::from_secs(60));
        assert_eq!(presenter.countdown_secs(), Some(0));
    }

    #[test]
    fn test_shown_set_feeds_back_into_selection() {
        use crate::incentives::selector::{select_incentive, VisitorProfile};
        use crate::models::incentive::TimeOfDay;
        use crate::revelation::RevelationStage;

        let (sched, _sink, mut presenter) = setup();
        let catalog = vec![
            make_incentive("only_offer", Urgency::High),
        ];
        let profile = VisitorProfile {
            is_new_user: false,
            tenure_days: 30,
            time_of_day: TimeOfDay::Evening,
            total_sessions: 8,
            feature_interactions: 6,
            engagement_stage: RevelationStage::Conversion,
        };

        let picked = select_incentive(&catalog, &presenter.shown_ids(), &profile, now()).unwrap();
        presenter.present(picked, now());
        sched.advance(Duration::from_millis(2_000));

        // Once revealed, the same incentive is not offered again this session.
        assert!(select_incentive(&catalog, &presenter.shown_ids(), &profile, now()).is_none());
    }
}
