use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::{Render, visit_dates_line};
use crate::utils::tui::create_spinner;

pub async fn run() -> Result<()> {
    let (remote, session) = super::signed_in_remote().await?;

    let spinner = create_spinner("Loading your proposals");
    let visits = remote.my_visits(session.user_id()).await?;
    spinner.finish_and_clear();

    if visits.is_empty() {
        println!("{}", "You haven't submitted any visit proposals yet.".dimmed());
        return Ok(());
    }

    for visit in &visits {
        println!("{}  [{}]", visit.status.render(), visit.id.dimmed());
        println!("  {}", visit_dates_line(visit));
        if let Some(notes) = &visit.notes {
            println!("  {}", notes.dimmed());
        }
        println!();
    }

    Ok(())
}
