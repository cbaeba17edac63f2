use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use staycal_core::date_span::{DateSpan, parse_date, parse_time};
use staycal_core::VisitStatus;

use crate::remote::NewVisit;

pub async fn run(
    start: &str,
    end: &str,
    arrive: Option<&str>,
    depart: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let span = DateSpan::new(start, end)?;

    let today = Local::now().date_naive();
    if start < today {
        anyhow::bail!("Arrival date {start} is in the past");
    }

    let arrival_time = arrive.map(parse_time).transpose()?;
    let departure_time = depart.map(parse_time).transpose()?;

    let (remote, session) = super::signed_in_remote().await?;

    let display_name = match remote.fetch_profile(session.user_id()).await? {
        Some(profile) => profile.display_name().to_string(),
        None => session
            .email()
            .split('@')
            .next()
            .unwrap_or(session.email())
            .to_string(),
    };

    let visitor = remote
        .ensure_visitor(session.user_id(), &display_name)
        .await?;

    let visit = remote
        .create_visit(&NewVisit {
            visitor_id: visitor.id,
            submitted_by: session.user_id().to_string(),
            start_date: start,
            end_date: end,
            arrival_time,
            departure_time,
            notes,
            status: VisitStatus::Pending,
        })
        .await?;

    println!(
        "Proposed {} ({} days), {}.",
        crate::render::visit_dates_line(&visit),
        span.num_days(),
        "pending review".yellow()
    );
    println!(
        "{}",
        "An admin will review it; check `staycal visits` for the outcome.".dimmed()
    );

    Ok(())
}
