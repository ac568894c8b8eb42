//! Ruler marks for timeline headers.
//!
//! Produces the day cells and month groups a host draws above the lanes.
//! Marks carry pixel offsets from the same mapping items use, so headers
//! and items stay aligned at every zoom level.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::geometry::ViewWindow;

/// A calendar date touched by a view window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayMark {
    pub date: NaiveDate,
    /// Pixel offset of the date's UTC midnight. Negative when the window
    /// starts mid-day; the host clips.
    pub x: f64,
}

/// A calendar month touched by a view window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthMark {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// Pixel offset of the month's first visible day cell.
    pub x: f64,
    /// Number of this month's day cells inside the window.
    pub day_count: u32,
}

/// One mark per calendar date the window touches, in ascending order.
///
/// A date counts as touched when any part of it falls inside the
/// half-open window range, so a window ending exactly at midnight does
/// not include that day.
pub fn day_marks(view: &ViewWindow) -> Vec<DayMark> {
    let mut marks = Vec::new();

    let mut date = view.start.date_naive();
    let mut last = view.end.date_naive();
    if midnight_utc(last) == view.end {
        match last.pred_opt() {
            Some(prev) => last = prev,
            None => return marks,
        }
    }

    while date <= last {
        marks.push(DayMark {
            date,
            x: view.x_at(midnight_utc(date)),
        });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    marks
}

/// One mark per calendar month the window touches, in ascending order.
///
/// Consecutive day cells are grouped by month; the mark keeps the offset
/// of the first cell and the number of cells, which is all a month header
/// row needs.
pub fn month_marks(view: &ViewWindow) -> Vec<MonthMark> {
    let mut marks: Vec<MonthMark> = Vec::new();
    for day in day_marks(view) {
        match marks.last_mut() {
            Some(mark) if mark.year == day.date.year() && mark.month == day.date.month() => {
                mark.day_count += 1;
            }
            _ => marks.push(MonthMark {
                year: day.date.year(),
                month: day.date.month(),
                x: day.x,
                day_count: 1,
            }),
        }
    }
    marks
}

fn midnight_utc(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    #[test]
    fn test_day_marks_for_aligned_window() {
        let view = ViewWindow::new(utc(2025, 3, 1, 0), utc(2025, 3, 5, 0), 120.0).unwrap();
        let marks = day_marks(&view);

        assert_eq!(marks.len(), 4);
        assert_eq!(marks[0].date, date(2025, 3, 1));
        assert_eq!(marks[0].x, 0.0);
        assert_eq!(marks[1].x, 120.0);
        assert_eq!(marks[3].date, date(2025, 3, 4));
        assert_eq!(marks[3].x, 360.0);
    }

    #[test]
    fn test_window_starting_mid_day_clips_first_cell() {
        let view = ViewWindow::new(utc(2025, 3, 1, 6), utc(2025, 3, 3, 0), 120.0).unwrap();
        let marks = day_marks(&view);

        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].date, date(2025, 3, 1));
        assert_eq!(marks[0].x, -30.0);
        assert_eq!(marks[1].x, 90.0);
    }

    #[test]
    fn test_window_ending_mid_day_includes_that_cell() {
        let view = ViewWindow::new(utc(2025, 3, 1, 0), utc(2025, 3, 3, 18), 120.0).unwrap();
        let marks = day_marks(&view);
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[2].date, date(2025, 3, 3));
    }

    #[test]
    fn test_sub_day_window_has_one_cell() {
        let view = ViewWindow::new(utc(2025, 3, 1, 6), utc(2025, 3, 1, 18), 120.0).unwrap();
        let marks = day_marks(&view);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].date, date(2025, 3, 1));
    }

    #[test]
    fn test_month_marks_group_day_cells() {
        let view = ViewWindow::new(utc(2025, 2, 25, 0), utc(2025, 3, 3, 0), 120.0).unwrap();
        let marks = month_marks(&view);

        assert_eq!(marks.len(), 2);
        assert_eq!((marks[0].year, marks[0].month), (2025, 2));
        assert_eq!(marks[0].day_count, 4); // Feb 25-28
        assert_eq!(marks[0].x, 0.0);
        assert_eq!((marks[1].year, marks[1].month), (2025, 3));
        assert_eq!(marks[1].day_count, 2); // Mar 1-2
        assert_eq!(marks[1].x, 480.0);
    }

    #[test]
    fn test_month_marks_across_a_year_boundary() {
        let view = ViewWindow::new(utc(2024, 12, 30, 0), utc(2025, 1, 3, 0), 60.0).unwrap();
        let marks = month_marks(&view);

        assert_eq!(marks.len(), 2);
        assert_eq!((marks[0].year, marks[0].month), (2024, 12));
        assert_eq!(marks[0].day_count, 2);
        assert_eq!((marks[1].year, marks[1].month), (2025, 1));
        assert_eq!(marks[1].day_count, 2);
        assert_eq!(marks[1].x, 120.0);
    }

    #[test]
    fn test_marks_align_with_item_geometry() {
        let view = ViewWindow::new(utc(2025, 3, 1, 0), utc(2025, 3, 31, 0), 90.0).unwrap();
        let marks = day_marks(&view);
        for mark in &marks {
            assert_eq!(mark.x, view.x_at(midnight_utc(mark.date)));
        }
        assert_eq!(marks.len(), 30);
    }
}
