pub mod auth;
pub mod calendar;
pub mod cancel;
pub mod owners;
pub mod profile;
pub mod propose;
pub mod review;
pub mod visitors;
pub mod visits;

use anyhow::Result;

use staycal_core::config::ServiceConfig;

use crate::remote::Remote;
use crate::session::Session;

/// A connected client plus the caller's session, the starting point of
/// every authenticated command.
pub async fn signed_in_remote() -> Result<(Remote, Session)> {
    let config = ServiceConfig::load()?;
    let remote = Remote::new(&config)?;
    let session = Session::load_valid(&remote).await?;
    let remote = remote.with_bearer(session.access_token());
    Ok((remote, session))
}

/// A client for public reads, using the stored session when one exists.
pub async fn public_remote() -> Result<Remote> {
    let config = ServiceConfig::load()?;
    let remote = Remote::new(&config)?;
    match Session::load_valid(&remote).await {
        Ok(session) => Ok(remote.with_bearer(session.access_token())),
        Err(_) => Ok(remote),
    }
}
