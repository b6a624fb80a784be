pub mod access;
pub mod engagement;
pub mod incentive;
pub mod payment;

pub use access::FeatureAccess;
pub use engagement::EngagementRecord;
pub use incentive::{IncentiveConditions, IncentiveConfig, IncentiveTrigger, TimeOfDay, Urgency};
pub use payment::{PaymentRecord, PaymentStatus, SubscriptionSummary};
