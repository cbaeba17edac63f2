use std::sync::Arc;

use anyhow::Result;

use crate::config::{NotifyConfig, resend_api_key};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NotifyConfig>,
    pub resend_api_key: Arc<str>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = NotifyConfig::load()?;
        let resend_api_key = resend_api_key()?;

        Ok(AppState {
            config: Arc::new(config),
            resend_api_key: Arc::from(resend_api_key),
            http: reqwest::Client::new(),
        })
    }
}
