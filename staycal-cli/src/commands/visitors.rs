use anyhow::Result;
use owo_colors::OwoColorize;

use staycal_core::palette::assign_colors;

use crate::render::render_legend;
use crate::utils::tui::create_spinner;

pub async fn run() -> Result<()> {
    let remote = super::public_remote().await?;

    let spinner = create_spinner("Loading visitors");
    let visitors = remote.list_visitors().await?;
    spinner.finish_and_clear();

    if visitors.is_empty() {
        println!("{}", "No visitors yet.".dimmed());
        return Ok(());
    }

    let colors = assign_colors(&visitors);
    println!("{}", render_legend(&visitors, &colors));

    Ok(())
}
