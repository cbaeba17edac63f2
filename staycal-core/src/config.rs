//! Service connection configuration.
//!
//! Stored at ~/.config/staycal/config.toml:
//!   url = "https://your-project.example.com"
//!   anon_key = "public-anon-key"
//!
//! Both values can also come from STAYCAL_URL / STAYCAL_ANON_KEY.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{StaycalError, StaycalResult};

/// Connection details for the hosted reservation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service (no trailing slash needed).
    pub url: String,
    /// The public anonymous API key sent with every request.
    pub anon_key: String,
}

/// Directory holding staycal's config and session files.
pub fn config_dir() -> StaycalResult<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| StaycalError::Config("Could not determine config directory".to_string()))?
        .join("staycal"))
}

impl ServiceConfig {
    pub fn load() -> StaycalResult<Self> {
        let path = config_dir()?.join("config.toml");

        let config = Config::builder()
            .add_source(File::from(path.clone()).required(false))
            .add_source(Environment::with_prefix("STAYCAL"))
            .build()
            .map_err(|e| StaycalError::Config(e.to_string()))?;

        config.try_deserialize().map_err(|_| {
            StaycalError::Config(format!(
                "Service connection not configured.\n\n\
                Create {} with:\n\n\
                url = \"https://your-project.example.com\"\n\
                anon_key = \"public-anon-key\"\n\n\
                or set STAYCAL_URL and STAYCAL_ANON_KEY.",
                path.display()
            ))
        })
    }
}
