//! Payment dashboard — subscription summary plus a payment-history table.
//!
//! Loads through the injected provider, independently of gating: a payment
//! fetch failure renders an error state on the dashboard and nothing else.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::external::payments::PaymentHistoryProvider;
use crate::models::payment::{PaymentRecord, PaymentStatus, SubscriptionSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRowView {
    pub description: String,
    pub amount: String,
    pub status: PaymentStatus,
    /// ISO date, render-ready.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum DashboardState {
    Loading,
    Ready,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDashboardView {
    pub state: DashboardState,
    pub subscription: Option<SubscriptionSummary>,
    pub rows: Vec<PaymentRowView>,
    /// Sum of successfully paid amounts, formatted in the row currency.
    pub total_paid: Option<String>,
}

impl PaymentDashboardView {
    pub fn loading() -> Self {
        PaymentDashboardView {
            state: DashboardState::Loading,
            subscription: None,
            rows: Vec::new(),
            total_paid: None,
        }
    }

    /// Fetches subscription and history. Failure is local: the caller gets
    /// a `Failed` view, never an error to propagate into gating.
    pub async fn load(provider: &dyn PaymentHistoryProvider) -> Self {
        let subscription = match provider.subscription().await {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("subscription fetch failed: {e}");
                return PaymentDashboardView {
                    state: DashboardState::Failed {
                        message: "Couldn't load your subscription. Try again later.".into(),
                    },
                    subscription: None,
                    rows: Vec::new(),
                    total_paid: None,
                };
            }
        };

        let history = match provider.history().await {
            Ok(h) => h,
            Err(e) => {
                warn!("payment history fetch failed: {e}");
                return PaymentDashboardView {
                    state: DashboardState::Failed {
                        message: "Couldn't load your payment history. Try again later.".into(),
                    },
                    subscription,
                    rows: Vec::new(),
                    total_paid: None,
                };
            }
        };

        Self::ready(subscription, &history)
    }

    fn ready(subscription: Option<SubscriptionSummary>, history: &[PaymentRecord]) -> Self {
        let rows = history.iter().map(build_row).collect();
        let paid_cents: i64 = history
            .iter()
            .filter(|r| r.status == PaymentStatus::Paid)
            .map(|r| r.amount_cents)
            .sum();
        let total_paid = history
            .first()
            .map(|r| format_amount(paid_cents, &r.currency));
        PaymentDashboardView {
            state: DashboardState::Ready,
            subscription,
            rows,
            total_paid,
        }
    }
}

fn build_row(record: &PaymentRecord) -> PaymentRowView {
    PaymentRowView {
        description: record.description.clone(),
        amount: format_amount(record.amount_cents, &record.currency),
        status: record.status,
        date: record.created_at.format("%Y-%m-%d").to_string(),
    }
}

/// Integer minor units → "$12.34"-style display string.
fn format_amount(cents: i64, currency: &str) -> String {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => return format!("{}.{:02} {other}", cents / 100, (cents % 100).abs()),
    };
    format!("{symbol}{}.{:02}", cents / 100, (cents % 100).abs())
}
