#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Result of the external premium-status check for a single feature key.
/// The gate renders purely from this triple; it holds no authorization
/// logic of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAccess {
    pub has_access: bool,
    pub is_premium: bool,
    pub is_loading: bool,
}

impl FeatureAccess {
    pub fn loading() -> Self {
        FeatureAccess {
            has_access: false,
            is_premium: false,
            is_loading: true,
        }
    }

    pub fn granted(is_premium: bool) -> Self {
        FeatureAccess {
            has_access: true,
            is_premium,
            is_loading: false,
        }
    }

    pub fn denied() -> Self {
        FeatureAccess {
            has_access: false,
            is_premium: false,
            is_loading: false,
        }
    }
}
