use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use staycal_core::date_span::parse_date;
use staycal_core::{OwnerStatus, Profile, Visit, VisitStatus};

use crate::render::format_date;
use crate::utils::tui::create_spinner;

pub async fn show() -> Result<()> {
    let remote = super::public_remote().await?;

    let spinner = create_spinner("Loading owner status");
    let admins = remote.admin_profiles().await?;
    let visits = remote.list_visits().await?;
    spinner.finish_and_clear();

    if admins.is_empty() {
        println!("{}", "No owners found.".dimmed());
        return Ok(());
    }

    let today = Local::now().date_naive();

    for admin in &admins {
        // Lapsed in-town statuses get written back as away. The service
        // refuses the write for non-admin callers, which is fine: the
        // display already treats the status as lapsed.
        if admin.status_lapsed(today) {
            let _ = remote
                .update_profile(
                    &admin.id,
                    &serde_json::json!({
                        "owner_status": "out_of_state_indefinitely",
                        "owner_status_until": null,
                    }),
                )
                .await;
        }

        println!("{}", admin.display_name().bold());
        println!("  {}", presence_line(admin, today));

        if let Some(current) = current_visit(admin, &visits, today) {
            println!(
                "  At the property now: {} - {}",
                format_date(current.start_date),
                format_date(current.end_date)
            );
        } else if let Some(next) = next_visit(admin, &visits, today) {
            println!(
                "  Next visit: {} - {} ({})",
                format_date(next.start_date),
                format_date(next.end_date),
                next.status
            );
        }
        println!();
    }

    Ok(())
}

pub async fn set(in_town: bool, away: bool, until: Option<&str>) -> Result<()> {
    if in_town == away {
        anyhow::bail!("Pass exactly one of --in-town or --away");
    }

    let until = until.map(parse_date).transpose()?;

    let (remote, session) = super::signed_in_remote().await?;

    let profile = remote
        .fetch_profile(session.user_id())
        .await?
        .filter(|p| p.is_admin)
        .ok_or_else(|| anyhow::anyhow!("Only admins carry an owner status"))?;

    let updates = if in_town {
        serde_json::json!({
            "owner_status": "in_town_indefinitely",
            "owner_status_until": until,
        })
    } else {
        // Switching to away always clears the until date
        serde_json::json!({
            "owner_status": "out_of_state_indefinitely",
            "owner_status_until": null,
        })
    };

    remote.update_profile(session.user_id(), &updates).await?;

    println!("Updated status for {}:", profile.display_name().bold());
    match (in_town, until) {
        (true, Some(until)) => println!("  In town until {}", format_date(until)),
        (true, None) => println!("  In town"),
        (false, _) => println!("  Away"),
    }

    Ok(())
}

fn presence_line(admin: &Profile, today: chrono::NaiveDate) -> String {
    match admin.owner_presence(today) {
        OwnerStatus::InTownIndefinitely => match admin.owner_status_until {
            Some(until) if !admin.status_lapsed(today) => {
                format!("{} until {}", "In town".green(), format_date(until))
            }
            _ => "In town".green().to_string(),
        },
        OwnerStatus::OutOfStateIndefinitely => "Away".dimmed().to_string(),
    }
}

/// A confirmed visit of this owner's happening today.
fn current_visit<'a>(
    admin: &Profile,
    visits: &'a [Visit],
    today: chrono::NaiveDate,
) -> Option<&'a Visit> {
    visits.iter().find(|v| {
        v.status == VisitStatus::Confirmed && v.submitted_by == admin.id && v.covers(today)
    })
}

/// The owner's earliest upcoming visit that wasn't denied.
fn next_visit<'a>(
    admin: &Profile,
    visits: &'a [Visit],
    today: chrono::NaiveDate,
) -> Option<&'a Visit> {
    visits
        .iter()
        .filter(|v| {
            v.status != VisitStatus::Denied && v.submitted_by == admin.id && v.start_date > today
        })
        .min_by_key(|v| v.start_date)
}
