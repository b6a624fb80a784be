//! Feature gate — conditional rendering wrapper for premium content.
//!
//! The gate holds no authorization logic. It renders one of four states
//! from the externally supplied access triple, fires the right analytics
//! exactly once per mount, and routes overlay activations to the
//! access-denied callback without letting them reach the dimmed content.

pub mod boundary;

pub use boundary::{ErrorPanel, RenderBoundary, Rendered};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::external::analytics::{events, AnalyticsSink};
use crate::models::access::FeatureAccess;

/// Opacity applied to previewed content beneath the blocking overlay.
pub const PREVIEW_OPACITY: f32 = 0.4;

/// Input event on the preview overlay. Keyboard activation mirrors the
/// usual button semantics: Enter and Space activate, everything else
/// passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEvent {
    Click,
    Key(ActivationKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKey {
    Enter,
    Space,
    Other,
}

/// Whether the gate consumed the event. `Handled` means propagation stops;
/// the dimmed content underneath never sees the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Ignored,
}

/// The blocking layer rendered above previewed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewOverlay {
    pub feature: String,
    pub message: String,
    pub content_opacity: f32,
}

/// Fallback rendered in the blocked state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradePrompt {
    pub feature: String,
    pub headline: String,
    pub cta_label: String,
}

impl UpgradePrompt {
    fn default_for(feature: &str) -> Self {
        UpgradePrompt {
            feature: feature.to_string(),
            headline: format!("Unlock {feature} with Premium"),
            cta_label: "Upgrade".to_string(),
        }
    }
}

/// One render outcome of the gate.
#[derive(Debug)]
pub enum GateView<C> {
    /// Access check still in flight; neutral indicator, no analytics.
    Loading,
    /// Full access: children unmodified.
    Granted(C),
    /// No access, preview allowed: dimmed children beneath a blocking
    /// overlay.
    Preview { content: C, overlay: PreviewOverlay },
    /// No access, no preview: the fallback upgrade prompt.
    Blocked(UpgradePrompt),
    /// Content panicked while rendering; panel substituted by the boundary.
    RenderFailed(ErrorPanel),
}

type DeniedHandler = Box<dyn Fn() + Send + Sync>;

/// One `FeatureGate` value corresponds to one mount of the wrapper: the
/// once-per-mount analytics guard resets by constructing a new gate.
pub struct FeatureGate {
    feature: String,
    show_preview: bool,
    fallback: Option<UpgradePrompt>,
    analytics: Arc<dyn AnalyticsSink>,
    boundary: RenderBoundary,
    on_access_denied: Option<DeniedHandler>,
    prompt_tracked: bool,
}

impl FeatureGate {
    pub fn new(feature: impl Into<String>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        FeatureGate {
            feature: feature.into(),
            show_preview: false,
            fallback: None,
            analytics,
            boundary: RenderBoundary::new(),
            on_access_denied: None,
            prompt_tracked: false,
        }
    }

    pub fn with_preview(mut self, show_preview: bool) -> Self {
        self.show_preview = show_preview;
        self
    }

    pub fn with_fallback(mut self, fallback: UpgradePrompt) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn on_access_denied(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_access_denied = Some(Box::new(handler));
        self
    }

    pub fn on_render_error(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.boundary = RenderBoundary::with_error_handler(handler);
        self
    }

    /// Renders the gate for the current access triple. Re-render freely:
    /// the blocked-state analytics fires only on the first blocked render
    /// of this mount, and a re-render after a failure is the retry.
    pub fn render<C>(
        &mut self,
        access: &FeatureAccess,
        content: impl FnOnce() -> C,
    ) -> GateView<C> {
        if access.is_loading {
            return GateView::Loading;
        }

        if access.has_access {
            return match self.boundary.render(content) {
                Rendered::Content(c) => GateView::Granted(c),
                Rendered::Failed(panel) => GateView::RenderFailed(panel),
            };
        }

        if self.show_preview {
            return match self.boundary.render(content) {
                Rendered::Content(c) => GateView::Preview {
                    content: c,
                    overlay: PreviewOverlay {
                        feature: self.feature.clone(),
                        message: format!("Preview only — upgrade to use {}", self.feature),
                        content_opacity: PREVIEW_OPACITY,
                    },
                },
                Rendered::Failed(panel) => GateView::RenderFailed(panel),
            };
        }

        if !self.prompt_tracked {
            self.prompt_tracked = true;
            self.analytics.track(
                events::UPGRADE_PROMPT_SHOWN,
                json!({ "feature": self.feature }),
            );
        }
        GateView::Blocked(
            self.fallback
                .clone()
                .unwrap_or_else(|| UpgradePrompt::default_for(&self.feature)),
        )
    }

    /// Handles an interaction with the preview overlay. Fires the
    /// access-denied callback once per activation and stops propagation so
    /// the dimmed content never receives the event.
    pub fn activate_overlay(
        &self,
        access: &FeatureAccess,
        event: ActivationEvent,
    ) -> EventOutcome {
        let in_preview = !access.is_loading && !access.has_access && self.show_preview;
        if !in_preview {
            return EventOutcome::Ignored;
        }
        let activates = matches!(
            event,
            ActivationEvent::Click
                | ActivationEvent::Key(ActivationKey::Enter)
                | ActivationEvent::Key(ActivationKey::Space)
        );
        if !activates {
            return EventOutcome::Ignored;
        }

        self.analytics.track(
            events::FEATURE_GATE_DENIED,
            json!({ "feature": self.feature }),
        );
        if let Some(handler) = &self.on_access_denied {
            handler();
        }
        EventOutcome::Handled
    }
}
