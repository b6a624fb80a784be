//! Opaque external collaborators consumed by the core.
//!
//! Everything here is a seam: the host shell supplies the implementation,
//! the core only ever talks to the trait.

pub mod access;
pub mod analytics;
pub mod navigation;
pub mod payments;

pub use access::FeatureAccessProvider;
pub use analytics::{AnalyticsSink, NoopSink, TracingSink};
pub use navigation::{Navigator, UpgradeIntent};
pub use payments::PaymentHistoryProvider;
