use chrono::NaiveDate;

use crate::calendar::completed_years;
use crate::models::{Birthdate, WeekCell, WeekStatus};

pub const FILLED_DOT: char = '●';
pub const EMPTY_DOT: char = '○';

/// Format a date as "Jun 2, 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Jun 2, 2024 - Jun 8, 2024"
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

/// Headline of a week's tooltip.
pub fn week_tooltip(cell: &WeekCell) -> String {
    format!(
        "Age {} years, week {} of life",
        cell.age_at_week_start,
        cell.week_of_year()
    )
}

/// Shown once a calendar has been generated for a new birthday.
pub fn generated_message(birthdate: Birthdate, today: NaiveDate) -> String {
    format!(
        "You've lived {} years. Each circle represents one week of your life.",
        completed_years(birthdate.date(), today)
    )
}

/// Format a percentage with one decimal, trimming a trailing ".0"
pub fn format_percent(percent: f64) -> String {
    let rounded = (percent * 10.0).round() / 10.0;
    if rounded == rounded.floor() {
        format!("{}%", rounded as i64)
    } else {
        format!("{:.1}%", rounded)
    }
}

/// Glyph for a cell: full for lived weeks, empty ahead, and a quarter-step
/// arc for the week in progress.
pub fn dot_glyph(cell: &WeekCell) -> char {
    match cell.status {
        WeekStatus::Past => FILLED_DOT,
        WeekStatus::Future => EMPTY_DOT,
        WeekStatus::Current => partial_dot(cell.fraction_elapsed.unwrap_or(0.0)),
    }
}

fn partial_dot(fraction: f64) -> char {
    match (fraction.clamp(0.0, 1.0) * 4.0).round() as u8 {
        0 => '◌',
        1 => '◔',
        2 => '◑',
        3 => '◕',
        _ => FILLED_DOT,
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let ratio = fraction.clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::compute_week;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tooltip_uses_one_based_week() {
        let cell = compute_week(date(1980, 6, 1), 2296, date(2024, 6, 8)).unwrap();
        // 2296 = 44 * 52 + 8
        assert_eq!(week_tooltip(&cell), "Age 44 years, week 9 of life");
        assert_eq!(
            format_date_range(cell.start_date, cell.end_date),
            "Jun 2, 2024 - Jun 8, 2024"
        );
    }

    #[test]
    fn first_week_of_a_row_is_week_one() {
        let cell = compute_week(date(1980, 6, 1), 52, date(2024, 6, 8)).unwrap();
        assert_eq!(cell.week_of_year(), 1);
        assert_eq!(cell.year_index(), 1);
    }

    #[test]
    fn glyphs_follow_status() {
        let birth = date(2000, 1, 1);
        let today = date(2000, 1, 19); // 18 days: week 2, day 4
        let past = compute_week(birth, 0, today).unwrap();
        let current = compute_week(birth, 2, today).unwrap();
        let future = compute_week(birth, 3, today).unwrap();
        assert_eq!(dot_glyph(&past), FILLED_DOT);
        assert_eq!(dot_glyph(&current), '◑');
        assert_eq!(dot_glyph(&future), EMPTY_DOT);
    }

    #[test]
    fn percent_and_bar() {
        assert_eq!(format_percent(51.9650), "52%");
        assert_eq!(format_percent(12.34), "12.3%");
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(2.0, 3), "███");
    }

    #[test]
    fn generated_message_counts_completed_years() {
        let birth = Birthdate::new(date(1980, 6, 9), date(2024, 6, 8)).unwrap();
        assert_eq!(
            generated_message(birth, date(2024, 6, 8)),
            "You've lived 43 years. Each circle represents one week of your life."
        );
    }
}
