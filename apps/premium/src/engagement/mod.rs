pub mod actions;
pub mod store;

pub use actions::{reduce, EngagementAction};
pub use store::EngagementStore;
