use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::WEEKS_PER_YEAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Past,
    Current,
    Future,
}

impl WeekStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            WeekStatus::Past => "Lived",
            WeekStatus::Current => "Current week",
            WeekStatus::Future => "Ahead",
        }
    }
}

impl std::fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One week of life, derived from a birthdate and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCell {
    /// Zero-based index counted from the birthdate.
    pub week_number: u32,
    pub start_date: NaiveDate,
    /// Always `start_date + 6 days`.
    pub end_date: NaiveDate,
    /// Completed birthdays as of `start_date`.
    pub age_at_week_start: u32,
    pub status: WeekStatus,
    /// Share of the week already elapsed; only set for the current week.
    pub fraction_elapsed: Option<f64>,
}

impl WeekCell {
    /// Row of the cell in a year-per-row layout.
    pub fn year_index(&self) -> u32 {
        self.week_number / WEEKS_PER_YEAR
    }

    /// 1-based position of the week inside its 52-week row.
    pub fn week_of_year(&self) -> u32 {
        self.week_number % WEEKS_PER_YEAR + 1
    }

    pub fn is_filled(&self) -> bool {
        self.status == WeekStatus::Past
    }

    pub fn is_current(&self) -> bool {
        self.status == WeekStatus::Current
    }

    /// Elapsed share of the week as a whole percentage (0 unless current).
    pub fn percent_elapsed(&self) -> u8 {
        self.fraction_elapsed
            .map(|f| (f.clamp(0.0, 1.0) * 100.0).round() as u8)
            .unwrap_or(0)
    }
}
