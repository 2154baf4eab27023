use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("birthday {birthdate} is in the future (today is {today})")]
    FutureBirthdate { birthdate: NaiveDate, today: NaiveDate },

    #[error("week number must be non-negative, got {0}")]
    NegativeWeek(i64),

    #[error("life expectancy must be at least one year")]
    EmptyHorizon,

    #[error("date falls outside the representable calendar")]
    DateOutOfRange,

    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type CalendarResult<T> = Result<T, CalendarError>;
