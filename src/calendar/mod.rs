pub mod error;
pub mod grid;
pub mod indexer;

pub use error::{CalendarError, CalendarResult};
pub use grid::{build_grid, Grid, Orientation, WEEKS_PER_YEAR};
pub use indexer::{completed_years, compute_week, weeks_lived};
