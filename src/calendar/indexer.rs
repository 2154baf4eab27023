use std::cmp::Ordering;

use chrono::{Days, NaiveDate};

use crate::calendar::{CalendarError, CalendarResult};
use crate::models::{WeekCell, WeekStatus};

const DAYS_PER_WEEK: u64 = 7;

/// Whole weeks between `birthdate` and `today`. This is also the index of
/// the week currently in progress.
pub fn weeks_lived(birthdate: NaiveDate, today: NaiveDate) -> i64 {
    (today - birthdate).num_days().div_euclid(DAYS_PER_WEEK as i64)
}

/// Birthdays completed between `from` and `to`. A date before the
/// anniversary in its own year counts one year less than the plain year
/// difference; a Feb 29 birthday completes on Mar 1 in common years.
pub fn completed_years(from: NaiveDate, to: NaiveDate) -> u32 {
    to.years_since(from).unwrap_or(0)
}

/// Derive the cell for week `week_number` of a life that started on
/// `birthdate`, as seen on `today`.
pub fn compute_week(
    birthdate: NaiveDate,
    week_number: i64,
    today: NaiveDate,
) -> CalendarResult<WeekCell> {
    if week_number < 0 {
        return Err(CalendarError::NegativeWeek(week_number));
    }
    let index = u32::try_from(week_number).map_err(|_| CalendarError::DateOutOfRange)?;

    let start_date = birthdate
        .checked_add_days(Days::new(u64::from(index) * DAYS_PER_WEEK))
        .ok_or(CalendarError::DateOutOfRange)?;
    let end_date = start_date
        .checked_add_days(Days::new(DAYS_PER_WEEK - 1))
        .ok_or(CalendarError::DateOutOfRange)?;

    let status = match week_number.cmp(&weeks_lived(birthdate, today)) {
        Ordering::Less => WeekStatus::Past,
        Ordering::Equal => WeekStatus::Current,
        Ordering::Greater => WeekStatus::Future,
    };

    let fraction_elapsed = (status == WeekStatus::Current).then(|| {
        let days = (today - start_date).num_days() as f64;
        (days / DAYS_PER_WEEK as f64).min(1.0)
    });

    Ok(WeekCell {
        week_number: index,
        start_date,
        end_date,
        age_at_week_start: completed_years(birthdate, start_date),
        status,
        fraction_elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_zero_starts_on_birthdate() {
        let birth = date(1992, 2, 29);
        let cell = compute_week(birth, 0, date(2024, 1, 1)).unwrap();
        assert_eq!(cell.start_date, birth);
        assert_eq!(cell.end_date, date(1992, 3, 6));
        assert_eq!(cell.age_at_week_start, 0);
        assert_eq!(cell.status, WeekStatus::Past);
        assert_eq!(cell.fraction_elapsed, None);
    }

    #[test]
    fn current_week_for_known_dates() {
        let birth = date(1980, 6, 1);
        let today = date(2024, 6, 8);
        // 16_078 days between the two dates
        assert_eq!(weeks_lived(birth, today), 2296);

        let cell = compute_week(birth, 2296, today).unwrap();
        assert_eq!(cell.status, WeekStatus::Current);
        assert_eq!(cell.start_date, date(2024, 6, 2));
        assert_eq!(cell.end_date, date(2024, 6, 8));
        assert_eq!(cell.age_at_week_start, 44);
        assert_eq!(cell.fraction_elapsed, Some(6.0 / 7.0));

        let before = compute_week(birth, 2295, today).unwrap();
        assert_eq!(before.status, WeekStatus::Past);
        let after = compute_week(birth, 2297, today).unwrap();
        assert_eq!(after.status, WeekStatus::Future);
        assert_eq!(after.fraction_elapsed, None);
    }

    #[test]
    fn fraction_is_zero_on_first_day_of_week() {
        let birth = date(2000, 1, 1);
        let today = date(2000, 1, 15);
        let cell = compute_week(birth, 2, today).unwrap();
        assert_eq!(cell.status, WeekStatus::Current);
        assert_eq!(cell.fraction_elapsed, Some(0.0));
        assert_eq!(cell.percent_elapsed(), 0);
    }

    #[test]
    fn age_waits_for_the_anniversary() {
        let birth = date(2000, 3, 15);
        let today = date(2030, 1, 1);
        // 364 days in: the day before the first birthday
        let w52 = compute_week(birth, 52, today).unwrap();
        assert_eq!(w52.start_date, date(2001, 3, 14));
        assert_eq!(w52.age_at_week_start, 0);

        let w53 = compute_week(birth, 53, today).unwrap();
        assert_eq!(w53.start_date, date(2001, 3, 21));
        assert_eq!(w53.age_at_week_start, 1);
    }

    #[test]
    fn leap_day_birthday_completes_on_march_first() {
        let birth = date(2000, 2, 29);
        assert_eq!(completed_years(birth, date(2001, 2, 28)), 0);
        assert_eq!(completed_years(birth, date(2001, 3, 1)), 1);
        assert_eq!(completed_years(birth, date(2004, 2, 29)), 4);
    }

    #[test]
    fn negative_week_fails_fast() {
        let birth = date(1990, 1, 1);
        assert_eq!(
            compute_week(birth, -1, date(2020, 1, 1)),
            Err(CalendarError::NegativeWeek(-1))
        );
    }

    #[test]
    fn weeks_past_the_horizon_are_future() {
        let birth = date(1990, 1, 1);
        let cell = compute_week(birth, 52 * 150, date(2020, 1, 1)).unwrap();
        assert_eq!(cell.status, WeekStatus::Future);
        assert!(cell.age_at_week_start >= 149);
    }

    #[test]
    fn unrepresentable_week_is_an_error() {
        let birth = date(1990, 1, 1);
        assert_eq!(
            compute_week(birth, i64::MAX, date(2020, 1, 1)),
            Err(CalendarError::DateOutOfRange)
        );
        assert_eq!(
            compute_week(birth, i64::from(u32::MAX), date(2020, 1, 1)),
            Err(CalendarError::DateOutOfRange)
        );
    }

    #[test]
    fn birthdate_after_today_leaves_everything_ahead() {
        let birth = date(2030, 1, 1);
        let cell = compute_week(birth, 0, date(2020, 1, 1)).unwrap();
        assert_eq!(cell.status, WeekStatus::Future);
    }
}
