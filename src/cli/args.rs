use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::parse_date;

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "memento", version, about = "Your life in weeks, drawn in the terminal")]
pub struct Cli {
    /// Birthday for this run only (YYYY-MM-DD), overrides the saved one
    #[arg(long, global = true, value_parser = parse_date_arg)]
    pub birthday: Option<NaiveDate>,
    /// Life expectancy in years for this run only
    #[arg(long, global = true)]
    pub years: Option<u32>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save your birthday
    Birthday {
        /// Date of birth (YYYY-MM-DD)
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Save the number of years the calendar spans
    Years {
        /// Life expectancy in years
        years: u32,
    },
    /// Print the calendar grid
    Grid {
        /// Swap rows and columns
        #[arg(long)]
        transpose: bool,
    },
    /// Show the details of one week of life
    Week {
        /// Zero-based week number
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Show age, weeks lived and weeks remaining
    Stats,
    /// Dump every week as JSON to stdout
    Export,
}
