use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{completed_years, weeks_lived, Grid};

/// Summary figures shown by `memento stats` and the TUI header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeStats {
    pub age_years: u32,
    pub weeks_lived: i64,
    pub weeks_total: usize,
    pub weeks_remaining: usize,
    pub current_week: Option<u32>,
    pub fraction_lived: f64,
}

impl LifeStats {
    pub fn new(grid: &Grid, birthdate: NaiveDate, today: NaiveDate) -> Self {
        Self {
            age_years: completed_years(birthdate, today),
            weeks_lived: weeks_lived(birthdate, today).max(0),
            weeks_total: grid.len(),
            weeks_remaining: grid.weeks_remaining(),
            current_week: grid.current().map(|c| c.week_number),
            fraction_lived: grid.fraction_lived(),
        }
    }

    pub fn percent_lived(&self) -> f64 {
        self.fraction_lived * 100.0
    }

    /// True once every week of the horizon has been lived.
    pub fn outlived_horizon(&self) -> bool {
        self.current_week.is_none() && self.weeks_remaining == 0
    }
}
