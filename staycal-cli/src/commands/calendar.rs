use std::collections::HashMap;

use anyhow::Result;
use chrono::{Datelike, Local};

use staycal_core::date_span::parse_month;
use staycal_core::palette::assign_colors;
use staycal_core::{MonthGrid, Visit, VisitStatus};

use crate::render::{MonthView, Render, render_legend};
use crate::utils::tui::create_spinner;

pub async fn run(month: Option<&str>) -> Result<()> {
    let remote = super::public_remote().await?;

    let today = Local::now().date_naive();
    let (year, month) = match month {
        Some(s) => parse_month(s)?,
        None => (today.year(), today.month()),
    };

    let spinner = create_spinner("Loading calendar");
    let visitors = remote.list_visitors().await?;
    let visits = remote.list_visits().await?;
    spinner.finish_and_clear();

    // Denied visits never reach the calendar; pending ones render dimmed
    let visits: Vec<Visit> = visits
        .into_iter()
        .filter(|v| v.status != VisitStatus::Denied)
        .collect();

    let colors = assign_colors(&visitors);
    let names: HashMap<String, String> = visitors
        .iter()
        .map(|v| (v.id.clone(), v.name.clone()))
        .collect();

    let mut grid = MonthGrid::new(year, month, today)?;
    grid.place(&visits);

    let view = MonthView {
        grid: &grid,
        visits: &visits,
        visitor_names: &names,
        visitor_colors: &colors,
    };
    println!("{}", view.render());

    if !visitors.is_empty() {
        println!("{}", render_legend(&visitors, &colors));
    }

    Ok(())
}
