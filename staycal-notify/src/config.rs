//! Notification service configuration.
//!
//! Stored at ~/.config/staycal/notify.toml:
//!   recipients = ["owner@example.com"]
//!   from = "Staycal <notify@example.com>"
//!   port = 8787
//!
//! The Resend API key comes from the RESEND_API_KEY environment variable
//! only, so it never lands in a config file.

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::Deserialize;

use staycal_core::config::config_dir;

#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Admin addresses that receive new-proposal mail.
    pub recipients: Vec<String>,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_from() -> String {
    "Staycal <onboarding@resend.dev>".to_string()
}

fn default_port() -> u16 {
    8787
}

impl NotifyConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join("notify.toml");

        let config = Config::builder()
            .add_source(File::from(path.clone()).required(false))
            .add_source(Environment::with_prefix("STAYCAL_NOTIFY"))
            .build()
            .context("Failed to load notify configuration")?;

        let config: NotifyConfig = config.try_deserialize().map_err(|_| {
            anyhow::anyhow!(
                "Notify configuration not found.\n\n\
                Create {} with:\n\n\
                recipients = [\"owner@example.com\"]",
                path.display()
            )
        })?;

        if config.recipients.is_empty() {
            bail!("Notify configuration lists no recipients");
        }

        Ok(config)
    }
}

pub fn resend_api_key() -> Result<String> {
    std::env::var("RESEND_API_KEY")
        .context("RESEND_API_KEY is not set; the service cannot send email without it")
}
