//! Month view-model.
//!
//! Expands a month into full Sunday-to-Saturday week rows and places
//! visits on the days they cover. Rendering is left to the caller; this
//! module only decides which visits land in which cells.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{StaycalError, StaycalResult};
use crate::visit::Visit;

/// A month expanded to complete week rows.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

/// One calendar cell.
#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days that pad the first and last
    /// week rows.
    pub in_month: bool,
    pub is_today: bool,
    pub segments: Vec<VisitSegment>,
}

/// A visit's presence on one day. `visit` indexes into the slice passed
/// to [`MonthGrid::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitSegment {
    pub visit: usize,
    pub is_start: bool,
    pub is_end: bool,
}

impl MonthGrid {
    /// Build the empty grid for a month. `today` controls the
    /// `is_today` flag so callers (and tests) supply their own clock.
    pub fn new(year: i32, month: u32, today: NaiveDate) -> StaycalResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(StaycalError::InvalidMonth { year, month })?;
        let last = first + Months::new(1) - Duration::days(1);

        let mut day = week_start(first);
        let grid_end = week_end(last);

        let mut weeks = Vec::new();
        while day <= grid_end {
            let week: Vec<DayCell> = (0..7)
                .map(|offset| {
                    let date = day + Duration::days(offset);
                    DayCell {
                        date,
                        in_month: date.month() == month && date.year() == year,
                        is_today: date == today,
                        segments: Vec::new(),
                    }
                })
                .collect();
            weeks.push(week);
            day += Duration::days(7);
        }

        Ok(MonthGrid { year, month, weeks })
    }

    /// Attach to each cell the visits covering that day, in the order
    /// they appear in `visits`. Overlapping visits simply stack.
    pub fn place(&mut self, visits: &[Visit]) {
        for week in &mut self.weeks {
            for cell in week {
                for (idx, visit) in visits.iter().enumerate() {
                    if visit.covers(cell.date) {
                        cell.segments.push(VisitSegment {
                            visit: idx,
                            is_start: visit.start_date == cell.date,
                            is_end: visit.end_date == cell.date,
                        });
                    }
                }
            }
        }
    }

    /// First day shown in the grid (may precede the month).
    pub fn first_day(&self) -> NaiveDate {
        self.weeks[0][0].date
    }

    /// Last day shown in the grid (may follow the month).
    pub fn last_day(&self) -> NaiveDate {
        self.weeks[self.weeks.len() - 1][6].date
    }
}

/// The Sunday on or before `day`.
fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

/// The Saturday on or after `day`.
fn week_end(day: NaiveDate) -> NaiveDate {
    day + Duration::days(6 - i64::from(day.weekday().num_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::VisitStatus;
    use chrono::Utc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn visit(id: &str, start: NaiveDate, end: NaiveDate) -> Visit {
        Visit {
            id: id.to_string(),
            visitor_id: "visitor-1".to_string(),
            submitted_by: "user-1".to_string(),
            start_date: start,
            end_date: end,
            arrival_time: None,
            departure_time: None,
            notes: None,
            status: VisitStatus::Confirmed,
            created_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    #[test]
    fn test_exact_four_week_month() {
        // February 2026 runs Sunday the 1st through Saturday the 28th.
        let grid = MonthGrid::new(2026, 2, day(2026, 2, 10)).unwrap();
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.first_day(), day(2026, 2, 1));
        assert_eq!(grid.last_day(), day(2026, 2, 28));
        assert!(grid.weeks.iter().all(|w| w.len() == 7));
        assert!(grid.weeks.iter().flatten().all(|c| c.in_month));
    }

    #[test]
    fn test_padded_six_week_month() {
        // August 2026 starts on a Saturday and ends on a Monday.
        let grid = MonthGrid::new(2026, 8, day(2026, 8, 23)).unwrap();
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.first_day(), day(2026, 7, 26));
        assert_eq!(grid.last_day(), day(2026, 9, 5));

        let cells: Vec<&DayCell> = grid.weeks.iter().flatten().collect();
        assert!(!cells[0].in_month); // Jul 26
        assert!(cells[6].in_month); // Aug 1
        assert!(cells.iter().any(|c| c.is_today && c.date == day(2026, 8, 23)));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(MonthGrid::new(2026, 13, day(2026, 8, 23)).is_err());
    }

    #[test]
    fn test_place_marks_endpoints() {
        let mut grid = MonthGrid::new(2026, 8, day(2026, 8, 23)).unwrap();
        let visits = vec![visit("v1", day(2026, 8, 10), day(2026, 8, 12))];
        grid.place(&visits);

        let cell = |d: NaiveDate| {
            grid.weeks
                .iter()
                .flatten()
                .find(|c| c.date == d)
                .unwrap()
                .clone()
        };

        assert_eq!(
            cell(day(2026, 8, 10)).segments,
            vec![VisitSegment { visit: 0, is_start: true, is_end: false }]
        );
        assert_eq!(
            cell(day(2026, 8, 11)).segments,
            vec![VisitSegment { visit: 0, is_start: false, is_end: false }]
        );
        assert_eq!(
            cell(day(2026, 8, 12)).segments,
            vec![VisitSegment { visit: 0, is_start: false, is_end: true }]
        );
        assert!(cell(day(2026, 8, 13)).segments.is_empty());
    }

    #[test]
    fn test_place_stacks_overlapping_visits() {
        let mut grid = MonthGrid::new(2026, 8, day(2026, 8, 23)).unwrap();
        let visits = vec![
            visit("v1", day(2026, 8, 10), day(2026, 8, 15)),
            visit("v2", day(2026, 8, 14), day(2026, 8, 18)),
        ];
        grid.place(&visits);

        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == day(2026, 8, 14))
            .unwrap();
        assert_eq!(cell.segments.len(), 2);
        assert_eq!(cell.segments[0].visit, 0);
        assert_eq!(cell.segments[1].visit, 1);
    }

    #[test]
    fn test_visit_spanning_month_boundary_appears_in_padding() {
        // A visit ending Aug 2 shows in July's trailing cells and vice
        // versa: cells outside the displayed month still carry segments.
        let mut grid = MonthGrid::new(2026, 8, day(2026, 8, 23)).unwrap();
        let visits = vec![visit("v1", day(2026, 7, 30), day(2026, 8, 2))];
        grid.place(&visits);

        let padding_cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == day(2026, 7, 30))
            .unwrap();
        assert!(!padding_cell.in_month);
        assert_eq!(padding_cell.segments.len(), 1);
        assert!(padding_cell.segments[0].is_start);
    }
}
