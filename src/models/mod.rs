pub mod birthdate;
pub mod stats;
pub mod week;

pub use birthdate::{parse_date, Birthdate, DATE_FORMAT};
pub use stats::LifeStats;
pub use week::{WeekCell, WeekStatus};
