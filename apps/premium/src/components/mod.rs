//! Stateless presentation builders.
//!
//! Each function maps already-decided state into a serializable view model;
//! no decisions are made here and nothing is stored.

pub mod incentive_card;
pub mod payment_history;
pub mod showcase;
pub mod testimonials;

pub use incentive_card::IncentiveCardView;
pub use payment_history::{DashboardState, PaymentDashboardView};
pub use showcase::{build_showcase, ShowcaseItem, ShowcaseView};
pub use testimonials::{pick_testimonial, Testimonial};
