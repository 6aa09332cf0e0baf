use anyhow::{Context, Result};
use mqbroker_models::Catalog;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub queue_prefix: String,
    pub allow_user_provision_parameters: bool,
    pub allow_user_update_parameters: bool,
    pub catalog_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            region: std::env::var("AWS_REGION").context("AWS_REGION must be set")?,
            queue_prefix: std::env::var("QUEUE_PREFIX")
                .context("QUEUE_PREFIX must be set")?,
            allow_user_provision_parameters: env_flag("ALLOW_USER_PROVISION_PARAMETERS")?,
            allow_user_update_parameters: env_flag("ALLOW_USER_UPDATE_PARAMETERS")?,
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "catalog.json".to_string())
                .into(),
        })
    }

    /// Read and validate the catalog file. The orchestrator assumes the
    /// catalog it receives already passed this check.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let raw = std::fs::read_to_string(&self.catalog_path).with_context(|| {
            format!("Failed to read catalog file {}", self.catalog_path.display())
        })?;

        let catalog: Catalog = serde_json::from_str(&raw).with_context(|| {
            format!("Failed to parse catalog file {}", self.catalog_path.display())
        })?;

        catalog
            .validate()
            .map_err(|err| anyhow::anyhow!("Invalid catalog: {err}"))?;

        Ok(catalog)
    }
}

fn env_flag(name: &str) -> Result<bool> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name} must be 'true' or 'false'")),
        Err(_) => Ok(false),
    }
}
