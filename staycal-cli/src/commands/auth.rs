use anyhow::Result;
use owo_colors::OwoColorize;

use staycal_core::config::ServiceConfig;

use crate::remote::Remote;
use crate::session::Session;

pub async fn signup(email: &str, name: Option<&str>) -> Result<()> {
    let config = ServiceConfig::load()?;
    let remote = Remote::new(&config)?;

    let name = match name {
        Some(name) => name.to_string(),
        // Same fallback the service applies to unnamed profiles
        None => email.split('@').next().unwrap_or(email).to_string(),
    };

    let password = rpassword::prompt_password("Password: ")?;
    let confirmation = rpassword::prompt_password("Confirm password: ")?;
    if password != confirmation {
        anyhow::bail!("Passwords do not match");
    }

    remote.sign_up(email, &password, &name).await?;

    println!("Account created for {email}.");
    println!(
        "{}",
        "Check your email to confirm the account, then run `staycal login`.".dimmed()
    );

    Ok(())
}

pub async fn login(email: &str) -> Result<()> {
    let config = ServiceConfig::load()?;
    let remote = Remote::new(&config)?;

    let password = rpassword::prompt_password("Password: ")?;
    let tokens = remote.sign_in(email, &password).await?;

    let session = Session::from_tokens(&tokens);
    session.save()?;

    let remote = remote.with_bearer(session.access_token());
    match remote.fetch_profile(session.user_id()).await? {
        Some(profile) => println!(
            "Signed in as {} ({})",
            profile.display_name().bold(),
            profile.email
        ),
        None => println!("Signed in as {}", session.email().bold()),
    }

    Ok(())
}

pub async fn logout() -> Result<()> {
    // Tell the service when we can, but always clear the local session
    if let Ok(session) = Session::load() {
        let config = ServiceConfig::load()?;
        let remote = Remote::new(&config)?.with_bearer(session.access_token());
        let _ = remote.sign_out().await;
    }

    Session::clear()?;
    println!("Signed out.");

    Ok(())
}

pub async fn whoami() -> Result<()> {
    let (remote, session) = super::signed_in_remote().await?;

    match remote.fetch_profile(session.user_id()).await? {
        Some(profile) => {
            println!("{} ({})", profile.display_name().bold(), profile.email);
            if profile.is_admin {
                println!("{}", "Admin: reviews visit proposals".dimmed());
            }
        }
        None => println!("{}", session.email().bold()),
    }

    Ok(())
}
