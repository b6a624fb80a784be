#![allow(dead_code)]

use thiserror::Error;

use crate::storage::StorageError;

/// Client-core error type.
///
/// Taxonomy:
/// - configuration errors (`OutsideProvider`, `Configuration`) are fatal
///   programmer errors, surfaced immediately, never retried;
/// - `Render` is recovered locally by the gate's render boundary;
/// - storage failures degrade to in-memory state and are logged, so
///   `Storage` only reaches callers that explicitly ask the store to load;
/// - analytics failures never produce an error at all.
#[derive(Debug, Error)]
pub enum PremiumError {
    #[error("{0} must be used within a PremiumContext scope")]
    OutsideProvider(&'static str),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Incentive catalog error: {0}")]
    Catalog(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
