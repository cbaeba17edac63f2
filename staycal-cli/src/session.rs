//! Stored sign-in session.
//!
//! The access/refresh token pair lives in exactly one place
//! (~/.config/staycal/session.toml) and every authenticated command goes
//! through [`Session::load_valid`], which refreshes an expired access
//! token before first use.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use staycal_core::StaycalError;
use staycal_core::config::config_dir;

use crate::remote::{Remote, TokenResponse};

pub struct Session {
    data: SessionData,
}

#[derive(Serialize, Deserialize, Clone)]
struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
    user_id: String,
    email: String,
}

impl Session {
    pub fn from_tokens(tokens: &TokenResponse) -> Self {
        Session {
            data: SessionData {
                access_token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
                expires_at: Utc::now() + Duration::seconds(tokens.expires_in),
                user_id: tokens.user.id.clone(),
                email: tokens.user.email.clone(),
            },
        }
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    pub fn user_id(&self) -> &str {
        &self.data.user_id
    }

    pub fn email(&self) -> &str {
        &self.data.email
    }

    fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("session.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Err(StaycalError::NotSignedIn.into());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        let data: SessionData = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;

        Ok(Session { data })
    }

    /// Load the stored session and refresh it if expired.
    pub async fn load_valid(remote: &Remote) -> Result<Self> {
        let mut session = Self::load()?;

        if session.is_expired() {
            session.refresh(remote).await?;
        }

        Ok(session)
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.data.expires_at
    }

    async fn refresh(&mut self, remote: &Remote) -> Result<()> {
        let tokens = remote
            .refresh_session(&self.data.refresh_token)
            .await
            .map_err(refresh_error)?;

        self.data = Session::from_tokens(&tokens).data;
        self.save()?;

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        // Owner-only (0600), the file contains live tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    /// Remove the stored session, if any.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// Only a refresh the service rejected means the session is gone. Network
/// failures and server errors keep their own message so the user isn't
/// told to log in again while the service is merely unreachable.
fn refresh_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<StaycalError>() {
        Some(StaycalError::Api { status, .. }) if *status < 500 => {
            StaycalError::SessionExpired.into()
        }
        _ => err.context("Failed to refresh the session"),
    }
}
