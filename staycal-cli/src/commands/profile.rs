use anyhow::Result;
use owo_colors::OwoColorize;

use staycal_core::StaycalError;

pub async fn run(name: Option<&str>) -> Result<()> {
    let (remote, session) = super::signed_in_remote().await?;

    let profile = match name {
        Some(name) => remote
            .update_profile(session.user_id(), &serde_json::json!({ "name": name }))
            .await?
            .ok_or_else(|| StaycalError::Auth("Profile update returned no row".to_string()))?,
        None => remote
            .fetch_profile(session.user_id())
            .await?
            .ok_or_else(|| StaycalError::Auth("No profile for the signed-in user".to_string()))?,
    };

    println!("{}", profile.display_name().bold());
    println!("  {}", profile.email);
    if profile.is_admin {
        println!("  {}", "admin".dimmed());
    }

    Ok(())
}
