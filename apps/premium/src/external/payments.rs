#![allow(dead_code)]

use async_trait::async_trait;
use thiserror::Error;

use crate::models::payment::{PaymentRecord, SubscriptionSummary};

#[derive(Debug, Error)]
pub enum PaymentFetchError {
    #[error("payment service unavailable: {0}")]
    Unavailable(String),

    #[error("payment response malformed: {0}")]
    Malformed(String),
}

/// Payment/subscription read side consumed by the dashboard. Loads
/// independently of gating; its failure never affects access decisions.
#[async_trait]
pub trait PaymentHistoryProvider: Send + Sync {
    async fn subscription(&self) -> Result<SubscriptionSummary, PaymentFetchError>;
    async fn history(&self) -> Result<Vec<PaymentRecord>, PaymentFetchError>;
}
