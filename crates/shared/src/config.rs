use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Tunable knobs for the curation funnel.
///
/// A snapshot of the active config is embedded in every output document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CuratorConfig {
    /// Minimum relevance score a record needs to enter the pool
    pub min_relevance: f64,
    /// Internal candidate pool size kept for auditing
    pub pool_size: usize,
    /// Items actually published (8 daily, 12 weekly)
    pub publish_count: usize,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            min_relevance: 0.2,
            pool_size: 25,
            publish_count: 8,
        }
    }
}

impl CuratorConfig {
    /// Defaults overridden by CURATOR_* environment variables, with `.env`
    /// probing in the usual locations
    pub fn from_env() -> Result<Self> {
        Self::try_load_dotenv();

        let mut config = Self::default();

        if let Ok(raw) = env::var("CURATOR_MIN_RELEVANCE") {
            config.min_relevance = raw
                .parse()
                .with_context(|| format!("Invalid CURATOR_MIN_RELEVANCE: {}", raw))?;
        }
        if let Ok(raw) = env::var("CURATOR_POOL_SIZE") {
            config.pool_size = raw
                .parse()
                .with_context(|| format!("Invalid CURATOR_POOL_SIZE: {}", raw))?;
        }
        if let Ok(raw) = env::var("CURATOR_PUBLISH_COUNT") {
            config.publish_count = raw
                .parse()
                .with_context(|| format!("Invalid CURATOR_PUBLISH_COUNT: {}", raw))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values before the funnel ever runs
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_relevance) {
            bail!(
                "min_relevance must be within 0.0..=1.0, got {}",
                self.min_relevance
            );
        }
        if self.pool_size == 0 {
            bail!("pool_size must be at least 1");
        }
        if self.publish_count == 0 {
            bail!("publish_count must be at least 1");
        }
        Ok(())
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/digest-curator/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("digest-curator").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}
