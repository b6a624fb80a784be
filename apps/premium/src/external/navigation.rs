#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Payload handed to the host's router on upgrade actions. Opaque to the
/// core beyond construction; the destination comes from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeIntent {
    pub destination: String,
    /// Which surface triggered the upgrade (gate id, incentive id, …).
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incentive_id: Option<String>,
}

/// Navigation facility supplied by the host shell.
pub trait Navigator: Send + Sync {
    fn go_to_upgrade(&self, intent: UpgradeIntent);
}
