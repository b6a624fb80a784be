#![allow(dead_code)]

use async_trait::async_trait;

use crate::models::access::FeatureAccess;

/// Premium-status check per feature key. Implementation and refresh cadence
/// are the host's business; the gate treats the returned triple as truth.
#[async_trait]
pub trait FeatureAccessProvider: Send + Sync {
    async fn check(&self, feature: &str) -> FeatureAccess;
}

/// Provider that answers the same for every feature. Useful for previews,
/// tests, and fully unlocked enterprise builds.
pub struct FixedAccessProvider(pub FeatureAccess);

#[async_trait]
impl FeatureAccessProvider for FixedAccessProvider {
    async fn check(&self, _feature: &str) -> FeatureAccess {
        self.0
    }
}
