//! Terminal rendering for staycal types.
//!
//! Extension traits and helpers that turn core types into colored
//! terminal output using owo_colors. The month view draws one bar row
//! per stacked visit, colored by visitor, with the visitor's name on the
//! arrival day.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use owo_colors::OwoColorize;

use staycal_core::{Color, DayCell, MonthGrid, Visit, VisitStatus, Visitor};

/// Width of one day cell, including the trailing gutter space.
const CELL_WIDTH: usize = 13;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for VisitStatus {
    fn render(&self) -> String {
        match self {
            VisitStatus::Pending => "Pending Review".yellow().to_string(),
            VisitStatus::Confirmed => "Confirmed".green().to_string(),
            VisitStatus::Denied => "Denied".red().to_string(),
        }
    }
}

/// Paint text in a visitor color.
pub fn paint(color: Color, text: &str) -> String {
    let (r, g, b) = color.rgb();
    text.truecolor(r, g, b).to_string()
}

/// Format a time of day as 12-hour, e.g. "3:00pm".
pub fn format_time_12h(time: NaiveTime) -> String {
    let hour = time.hour();
    let meridiem = if hour >= 12 { "pm" } else { "am" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02}{}", hour12, time.minute(), meridiem)
}

/// Format a date as e.g. "Aug 10, 2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// One line summarizing a visit's dates and optional times.
pub fn visit_dates_line(visit: &Visit) -> String {
    let mut line = format!(
        "{} - {}",
        format_date(visit.start_date),
        format_date(visit.end_date)
    );

    if let Some(arrive) = visit.arrival_time {
        line.push_str(&format!("  arrive {}", format_time_12h(arrive)));
    }
    if let Some(depart) = visit.departure_time {
        line.push_str(&format!("  depart {}", format_time_12h(depart)));
    }

    line
}

/// The month calendar ready to draw: the placed grid plus the visit
/// slice it was placed from and per-visitor names and colors.
pub struct MonthView<'a> {
    pub grid: &'a MonthGrid,
    pub visits: &'a [Visit],
    pub visitor_names: &'a HashMap<String, String>,
    pub visitor_colors: &'a HashMap<String, Color>,
}

impl MonthView<'_> {
    fn visit_color(&self, visit: &Visit) -> Option<Color> {
        self.visitor_colors.get(&visit.visitor_id).copied()
    }

    fn visit_name(&self, visit: &Visit) -> &str {
        self.visitor_names
            .get(&visit.visitor_id)
            .map(String::as_str)
            .unwrap_or("Unknown")
    }

    fn title(&self) -> String {
        let first = self.grid.weeks[0]
            .iter()
            .find(|c| c.in_month)
            .map(|c| c.date)
            .unwrap_or(self.grid.first_day());
        first.format("%B %Y").to_string()
    }

    fn day_number_row(&self, week: &[DayCell]) -> String {
        let mut row = String::new();
        for cell in week {
            let number = format!("{:>2}", cell.date.day());
            let padded = format!("{number:<width$}", width = CELL_WIDTH);
            if cell.is_today {
                row.push_str(&padded.bold().reversed().to_string());
            } else if cell.in_month {
                row.push_str(&padded);
            } else {
                row.push_str(&padded.dimmed().to_string());
            }
        }
        row
    }

    /// One bar row for `visit_idx` across a week. Cells the visit does
    /// not cover stay blank so adjacent bars line up in lanes.
    fn lane_row(&self, week: &[DayCell], visit_idx: usize) -> String {
        let visit = &self.visits[visit_idx];
        let inner = CELL_WIDTH - 1;
        let mut row = String::new();

        for cell in week {
            let segment = cell.segments.iter().find(|s| s.visit == visit_idx);
            let Some(segment) = segment else {
                row.push_str(&" ".repeat(CELL_WIDTH));
                continue;
            };

            let text = if segment.is_start {
                let mut label = self.visit_name(visit).to_string();
                if let Some(arrive) = visit.arrival_time {
                    label.push(' ');
                    label.push_str(&format_time_12h(arrive));
                }
                truncate_pad(&label, inner)
            } else if segment.is_end {
                match visit.departure_time {
                    Some(depart) => {
                        truncate_pad(&format!("to {}", format_time_12h(depart)), inner)
                    }
                    None => bar(visit.status, inner),
                }
            } else {
                bar(visit.status, inner)
            };

            let colored = match self.visit_color(visit) {
                Some(color) => paint(color, &text),
                None => text.dimmed().to_string(),
            };

            if visit.status == VisitStatus::Pending {
                row.push_str(&colored.dimmed().to_string());
            } else {
                row.push_str(&colored);
            }
            row.push(' ');
        }

        row
    }
}

impl Render for MonthView<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(self.title().bold().to_string());
        lines.push(String::new());

        let header: String = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| format!("{d:<width$}", width = CELL_WIDTH))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in &self.grid.weeks {
            lines.push(self.day_number_row(week));

            // Lane order: every visit present somewhere in this week,
            // sorted by arrival so multi-day bars keep their row.
            let mut lanes: Vec<usize> = week
                .iter()
                .flat_map(|c| c.segments.iter().map(|s| s.visit))
                .collect();
            lanes.sort_by_key(|&idx| (self.visits[idx].start_date, self.visits[idx].id.clone()));
            lanes.dedup();

            for visit_idx in lanes {
                lines.push(self.lane_row(week, visit_idx));
            }

            lines.push(String::new());
        }

        lines.join("\n")
    }
}

fn bar(status: VisitStatus, width: usize) -> String {
    let glyph = match status {
        VisitStatus::Pending => "░",
        _ => "█",
    };
    glyph.repeat(width)
}

/// Clip to `width` characters, padding with spaces.
fn truncate_pad(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{clipped:<width$}")
}

/// The visitor legend shown under the calendar.
pub fn render_legend(visitors: &[Visitor], colors: &HashMap<String, Color>) -> String {
    let mut lines = vec!["Visitors".bold().to_string()];

    for visitor in visitors {
        let swatch = match colors.get(&visitor.id) {
            Some(color) => paint(*color, "██"),
            None => "██".dimmed().to_string(),
        };
        let mut line = format!("  {swatch} {}", visitor.name);
        if let Some(description) = &visitor.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        lines.push(line);
    }

    lines.join("\n")
}
