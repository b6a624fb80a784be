pub mod catalog;
pub mod presenter;
pub mod selector;
pub mod timing;

pub use catalog::{default_catalog, load_catalog};
pub use presenter::IncentivePresenter;
pub use selector::{select_incentive, VisitorProfile};
