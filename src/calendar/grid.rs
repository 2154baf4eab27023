use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::indexer::compute_week;
use crate::calendar::{CalendarError, CalendarResult};
use crate::models::{WeekCell, WeekStatus};

pub const WEEKS_PER_YEAR: u32 = 52;

/// How the grid is laid out on screen. Only the traversal changes; week
/// numbering is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// One row per year, 52 columns.
    YearRows,
    /// 52 rows, one column per year.
    #[default]
    WeekRows,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::YearRows => Orientation::WeekRows,
            Orientation::WeekRows => Orientation::YearRows,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Orientation::YearRows => "a row per year",
            Orientation::WeekRows => "a column per year",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub life_expectancy_years: u32,
    pub cells: Vec<WeekCell>,
}

/// Build every week of a `life_expectancy_years` horizon, row-major:
/// `week_number = year * 52 + week`.
pub fn build_grid(
    birthdate: NaiveDate,
    life_expectancy_years: u32,
    today: NaiveDate,
) -> CalendarResult<Grid> {
    if life_expectancy_years == 0 {
        return Err(CalendarError::EmptyHorizon);
    }

    let total = i64::from(life_expectancy_years) * i64::from(WEEKS_PER_YEAR);
    // Fail before allocating if the horizon runs off the calendar
    compute_week(birthdate, total - 1, today)?;

    let mut cells = Vec::with_capacity(total as usize);
    for row in 0..life_expectancy_years {
        for column in 0..WEEKS_PER_YEAR {
            let week_number = i64::from(row) * i64::from(WEEKS_PER_YEAR) + i64::from(column);
            cells.push(compute_week(birthdate, week_number, today)?);
        }
    }

    log::debug!(
        "Built grid of {} weeks for birthday {} as of {}",
        cells.len(),
        birthdate,
        today
    );

    Ok(Grid {
        life_expectancy_years,
        cells,
    })
}

impl Grid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, week_number: u32) -> Option<&WeekCell> {
        self.cells.get(week_number as usize)
    }

    pub fn current(&self) -> Option<&WeekCell> {
        self.cells.iter().find(|c| c.is_current())
    }

    /// Number of fully lived weeks inside the horizon.
    pub fn weeks_lived(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    pub fn weeks_remaining(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.status == WeekStatus::Future)
            .count()
    }

    /// Lived share of the horizon, counting the elapsed part of the
    /// current week.
    pub fn fraction_lived(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let partial = self
            .current()
            .and_then(|c| c.fraction_elapsed)
            .unwrap_or(0.0);
        (self.weeks_lived() as f64 + partial) / self.cells.len() as f64
    }

    /// `(rows, columns)` of the grid in the given orientation.
    pub fn dimensions(&self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::YearRows => (self.life_expectancy_years, WEEKS_PER_YEAR),
            Orientation::WeekRows => (WEEKS_PER_YEAR, self.life_expectancy_years),
        }
    }

    pub fn cell_at(&self, orientation: Orientation, row: u32, column: u32) -> Option<&WeekCell> {
        let (rows, columns) = self.dimensions(orientation);
        if row >= rows || column >= columns {
            return None;
        }
        let week_number = match orientation {
            Orientation::YearRows => row * WEEKS_PER_YEAR + column,
            Orientation::WeekRows => column * WEEKS_PER_YEAR + row,
        };
        self.get(week_number)
    }

    /// Inverse of [`Grid::cell_at`].
    pub fn position_of(&self, orientation: Orientation, week_number: u32) -> (u32, u32) {
        let year = week_number / WEEKS_PER_YEAR;
        let week = week_number % WEEKS_PER_YEAR;
        match orientation {
            Orientation::YearRows => (year, week),
            Orientation::WeekRows => (week, year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Grid {
        build_grid(date(1980, 6, 1), 85, date(2024, 6, 8)).unwrap()
    }

    #[test]
    fn week_numbers_are_contiguous() {
        let grid = sample();
        assert_eq!(grid.len(), 85 * 52);
        for (i, cell) in grid.cells.iter().enumerate() {
            assert_eq!(cell.week_number as usize, i);
        }
    }

    #[test]
    fn every_week_spans_seven_days() {
        let grid = sample();
        for cell in &grid.cells {
            assert_eq!(cell.end_date - cell.start_date, Duration::days(6));
        }
        for pair in grid.cells.windows(2) {
            assert_eq!(pair[1].start_date - pair[0].start_date, Duration::days(7));
        }
    }

    #[test]
    fn age_steps_by_one_at_each_anniversary() {
        let grid = sample();
        for pair in grid.cells.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert!(next.age_at_week_start >= prev.age_at_week_start);
            let step = next.age_at_week_start - prev.age_at_week_start;
            let anniversary = date(next.start_date.year(), 6, 1);
            let crossed = prev.start_date < anniversary && anniversary <= next.start_date;
            assert_eq!(step, u32::from(crossed));
        }
    }

    #[test]
    fn exactly_one_current_week() {
        let grid = sample();
        let current: Vec<_> = grid.cells.iter().filter(|c| c.is_current()).collect();
        assert_eq!(current.len(), 1);
        let cell = current[0];
        assert_eq!(cell.week_number, 2296);
        assert_eq!(cell.start_date, date(2024, 6, 2));
        assert_eq!(cell.age_at_week_start, 44);
        let fraction = cell.fraction_elapsed.unwrap();
        assert!((0.0..=1.0).contains(&fraction));

        assert!(grid.cells[..2296].iter().all(|c| c.status == WeekStatus::Past));
        assert!(grid.cells[2297..].iter().all(|c| c.status == WeekStatus::Future));
        assert_eq!(grid.weeks_lived(), 2296);
        assert_eq!(grid.weeks_remaining(), 85 * 52 - 2297);
    }

    #[test]
    fn outliving_the_horizon_leaves_no_current_week() {
        let grid = build_grid(date(1920, 1, 1), 80, date(2024, 1, 1)).unwrap();
        assert!(grid.current().is_none());
        assert_eq!(grid.weeks_lived(), grid.len());
        assert_eq!(grid.fraction_lived(), 1.0);
    }

    #[test]
    fn building_twice_gives_the_same_grid() {
        assert_eq!(sample(), sample());
    }

    #[test]
    fn one_year_horizon_has_52_weeks() {
        let grid = build_grid(date(2024, 1, 1), 1, date(2024, 3, 1)).unwrap();
        assert_eq!(grid.len(), 52);
        assert_eq!(grid.dimensions(Orientation::YearRows), (1, 52));
        assert_eq!(grid.dimensions(Orientation::WeekRows), (52, 1));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        assert_eq!(
            build_grid(date(2000, 1, 1), 0, date(2024, 1, 1)),
            Err(CalendarError::EmptyHorizon)
        );
    }

    #[test]
    fn horizon_past_the_calendar_is_rejected() {
        assert_eq!(
            build_grid(date(2000, 1, 1), 1_000_000, date(2024, 1, 1)),
            Err(CalendarError::DateOutOfRange)
        );
    }

    #[test]
    fn orientations_address_the_same_cells() {
        let grid = sample();
        for week_number in [0, 1, 51, 52, 2296, 85 * 52 - 1] {
            for orientation in [Orientation::YearRows, Orientation::WeekRows] {
                let (row, column) = grid.position_of(orientation, week_number);
                let cell = grid.cell_at(orientation, row, column).unwrap();
                assert_eq!(cell.week_number, week_number);
            }
        }
        assert!(grid.cell_at(Orientation::YearRows, 85, 0).is_none());
        assert!(grid.cell_at(Orientation::WeekRows, 0, 85).is_none());
        assert_eq!(
            grid.cell_at(Orientation::WeekRows, 3, 2).unwrap().week_number,
            2 * 52 + 3
        );
    }

    #[test]
    fn fraction_lived_counts_partial_week() {
        let grid = sample();
        let expected = (2296.0 + 6.0 / 7.0) / (85.0 * 52.0);
        assert!((grid.fraction_lived() - expected).abs() < 1e-12);
    }

    #[test]
    fn orientation_toggles() {
        assert_eq!(Orientation::default(), Orientation::WeekRows);
        assert_eq!(Orientation::WeekRows.toggled(), Orientation::YearRows);
        assert_eq!(Orientation::YearRows.toggled(), Orientation::WeekRows);
    }
}
