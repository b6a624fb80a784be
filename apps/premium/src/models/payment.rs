#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
    Refunded,
}

/// One row of the payment history, as returned by the external payment
/// collaborator. Amounts are integer minor units to avoid float currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Current subscription, shown at the top of the payment dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    pub plan: String,
    pub renews_at: Option<DateTime<Utc>>,
    pub cancelled: bool,
}
