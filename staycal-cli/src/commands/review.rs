use std::collections::HashMap;

use anyhow::Result;
use owo_colors::OwoColorize;

use staycal_core::{Decision, Profile, StaycalError};

use crate::remote::Remote;
use crate::render::{format_date, visit_dates_line};
use crate::session::Session;
use crate::utils::tui::create_spinner;

pub async fn pending() -> Result<()> {
    let (remote, session) = super::signed_in_remote().await?;
    require_admin(&remote, &session).await?;

    let spinner = create_spinner("Loading pending proposals");
    let visits = remote.pending_visits().await?;
    let visitors = remote.list_visitors().await?;
    spinner.finish_and_clear();

    if visits.is_empty() {
        println!("{}", "No pending proposals to review.".dimmed());
        return Ok(());
    }

    let names: HashMap<&str, &str> = visitors
        .iter()
        .map(|v| (v.id.as_str(), v.name.as_str()))
        .collect();

    for visit in &visits {
        let name = names.get(visit.visitor_id.as_str()).unwrap_or(&"Unknown");
        println!(
            "{}  submitted {}  [{}]",
            name.bold(),
            format_date(visit.created_at.date_naive()),
            visit.id.dimmed()
        );
        println!("  {}", visit_dates_line(visit));
        if let Some(notes) = &visit.notes {
            println!("  {}", notes.dimmed());
        }
        println!(
            "  {}",
            format!("staycal approve {id}  |  staycal deny {id}", id = visit.id).dimmed()
        );
        println!();
    }

    Ok(())
}

pub async fn decide(id: &str, decision: Decision) -> Result<()> {
    let (remote, session) = super::signed_in_remote().await?;
    require_admin(&remote, &session).await?;

    let visit = remote
        .fetch_visit(id)
        .await?
        .ok_or_else(|| StaycalError::VisitNotFound(id.to_string()))?;

    // Surfaces the final-decision rule before touching the service
    visit.status.review(decision)?;

    let updated = remote.review_visit(id, decision, session.user_id()).await?;

    let verdict = match decision {
        Decision::Approve => "Approved".green().to_string(),
        Decision::Deny => "Denied".red().to_string(),
    };
    println!("{verdict} {}.", visit_dates_line(&updated));

    Ok(())
}

async fn require_admin(remote: &Remote, session: &Session) -> Result<Profile> {
    let profile = remote
        .fetch_profile(session.user_id())
        .await?
        .ok_or_else(|| StaycalError::Auth("No profile for the signed-in user".to_string()))?;

    if !profile.is_admin {
        anyhow::bail!("Only admins can review proposals");
    }

    Ok(profile)
}
