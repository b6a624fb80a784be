use std::path::PathBuf;

use anyhow::{Context, Result};

/// Client-core configuration loaded from environment variables.
/// Every variable is optional — the crate must come up with sane defaults
/// inside an embedder that sets nothing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key under which the engagement record is persisted.
    pub storage_key: String,
    /// Directory for the file-backed store. None selects the in-memory store.
    pub storage_dir: Option<PathBuf>,
    /// Optional JSON file overriding the built-in incentive catalog.
    pub catalog_path: Option<PathBuf>,
    /// Navigation destination for upgrade actions.
    pub upgrade_destination: String,
    pub rust_log: String,
}

pub const DEFAULT_STORAGE_KEY: &str = "cv_premium_engagement";
pub const DEFAULT_UPGRADE_DESTINATION: &str = "/upgrade";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            storage_key: optional_env("PREMIUM_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            storage_dir: optional_env("PREMIUM_STORAGE_DIR").map(PathBuf::from),
            catalog_path: optional_env("PREMIUM_CATALOG_PATH").map(PathBuf::from),
            upgrade_destination: optional_env("PREMIUM_UPGRADE_DESTINATION")
                .unwrap_or_else(|| DEFAULT_UPGRADE_DESTINATION.to_string()),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validates path-shaped settings eagerly so misconfiguration fails at
    /// startup instead of on first persistence.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.storage_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create storage dir {}", dir.display()))?;
        }
        if self.storage_key.is_empty() {
            anyhow::bail!("PREMIUM_STORAGE_KEY must not be empty");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            catalog_path: None,
            upgrade_destination: DEFAULT_UPGRADE_DESTINATION.to_string(),
            rust_log: "info".to_string(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_memory_backed() {
        let config = Config::default();
        assert!(config.storage_dir.is_none());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_validate_rejects_empty_storage_key() {
        let config = Config {
            storage_key: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
