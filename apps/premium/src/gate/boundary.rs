//! Render boundary — catches panics from gated content.
//!
//! A rendering failure inside the gate must not take the whole surface
//! down: the boundary substitutes a retry-capable error panel, reports the
//! error upward via callback, and the host retries by simply rendering
//! again. No page reload involved.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// What the user sees in place of content that failed to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPanel {
    pub message: String,
    /// Always true here: the boundary recovers locally, retry is manual.
    pub retryable: bool,
}

pub enum Rendered<C> {
    Content(C),
    Failed(ErrorPanel),
}

type ErrorHandler = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct RenderBoundary {
    on_error: Option<ErrorHandler>,
}

impl RenderBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_handler(handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        RenderBoundary {
            on_error: Some(Box::new(handler)),
        }
    }

    /// Runs the render closure, converting a panic into an `ErrorPanel`.
    /// Calling this again with a fresh closure is the retry path.
    pub fn render<C>(&self, render: impl FnOnce() -> C) -> Rendered<C> {
        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(content) => Rendered::Content(content),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("gated content failed to render: {message}");
                if let Some(handler) = &self.on_error {
                    handler(&message);
                }
                Rendered::Failed(ErrorPanel {
                    message,
                    retryable: true,
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown render failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_successful_render_passes_through() {
        let boundary = RenderBoundary::new();
        match boundary.render(|| "resume preview") {
            Rendered::Content(c) => assert_eq!(c, "resume preview"),
            Rendered::Failed(_) => panic!("should not fail"),
        }
    }

    #[test]
    fn test_panic_becomes_retryable_panel() {
        let boundary = RenderBoundary::new();
        match boundary.render(|| -> &str { panic!("template data missing") }) {
            Rendered::Content(_) => panic!("should fail"),
            Rendered::Failed(panel) => {
                assert!(panel.retryable);
                assert_eq!(panel.message, "template data missing");
            }
        }
    }

    #[test]
    fn test_error_handler_reports_upward() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let boundary = RenderBoundary::with_error_handler(move |_msg| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let _ = boundary.render(|| -> () { panic!("boom") });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_after_failure_can_succeed() {
        let boundary = RenderBoundary::new();
        let attempts = AtomicUsize::new(0);
        let render = || {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("transient");
            }
            "rendered"
        };
        assert!(matches!(boundary.render(render), Rendered::Failed(_)));
        match boundary.render(render) {
            Rendered::Content(c) => assert_eq!(c, "rendered"),
            Rendered::Failed(_) => panic!("retry should succeed"),
        }
    }
}
