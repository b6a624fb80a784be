#![allow(dead_code)]

//! Fire-and-forget event tracking.
//!
//! Tracking must never block or break the UI: implementations swallow their
//! own failures, and no `track` call returns a Result.

use serde_json::Value;
use tracing::debug;

/// Well-known event names emitted by the core.
pub mod events {
    pub const UPGRADE_PROMPT_SHOWN: &str = "upgrade_prompt_shown";
    pub const FEATURE_GATE_DENIED: &str = "feature_gate_denied";
    pub const INCENTIVE_SHOWN: &str = "incentive_shown";
    pub const INCENTIVE_AUTO_HIDDEN: &str = "incentive_auto_hidden";
    pub const INCENTIVE_DISMISSED: &str = "incentive_dismissed";
    pub const UPGRADE_CLICKED: &str = "upgrade_clicked";
    pub const GATED_RENDER_FAILED: &str = "gated_render_failed";
}

pub trait AnalyticsSink: Send + Sync {
    /// Records an event with free-form properties. No acknowledgment; a
    /// failing sink logs and moves on.
    fn track(&self, event: &str, properties: Value);
}

/// Sink that drops everything. Default when the host wires no analytics.
#[derive(Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, _event: &str, _properties: Value) {}
}

/// Sink that mirrors events into the tracing log, useful during development.
#[derive(Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &str, properties: Value) {
        debug!(event, %properties, "analytics");
    }
}

/// Recording sink for assertions in tests.
#[cfg(test)]
pub struct RecordingSink {
    pub events: std::sync::Mutex<Vec<(String, Value)>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }
}

#[cfg(test)]
impl AnalyticsSink for RecordingSink {
    fn track(&self, event: &str, properties: Value) {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), properties));
    }
}
