use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarError, CalendarResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A birthdate that has been checked against "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Birthdate(NaiveDate);

impl Birthdate {
    pub fn new(date: NaiveDate, today: NaiveDate) -> CalendarResult<Self> {
        if date > today {
            return Err(CalendarError::FutureBirthdate {
                birthdate: date,
                today,
            });
        }
        Ok(Self(date))
    }

    pub fn parse(input: &str, today: NaiveDate) -> CalendarResult<Self> {
        Self::new(parse_date(input)?, today)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for Birthdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Parse a `YYYY-MM-DD` date, tolerating surrounding whitespace.
pub fn parse_date(input: &str) -> CalendarResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(trimmed.to_string()))
}
