//! Premium client core — the upsell/gating layer of the CV builder client.
//!
//! Everything here is in-process logic driven by UI event handlers in the
//! host shell. The host supplies the external collaborators (storage,
//! analytics, navigation, access checks) and this crate supplies the
//! decision logic: engagement tracking, revelation staging, incentive
//! selection, and the feature-gate renderer.

pub mod components;
pub mod config;
pub mod engagement;
pub mod errors;
pub mod external;
pub mod gate;
pub mod incentives;
pub mod logging;
pub mod models;
pub mod revelation;
pub mod sched;
pub mod state;
pub mod storage;

pub use config::Config;
pub use errors::PremiumError;
pub use state::PremiumContext;
