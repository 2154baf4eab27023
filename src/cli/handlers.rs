use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use std::path::Path;

use crate::calendar::{build_grid, compute_week, Grid, Orientation, WEEKS_PER_YEAR};
use crate::config::{AppConfig, DisplayConfig, Palette, Session};
use crate::models::{Birthdate, LifeStats, WeekCell, WeekStatus};
use crate::utils::format::{
    dot_glyph, format_date, format_date_range, format_percent, generated_message, progress_bar,
    week_tooltip, EMPTY_DOT, FILLED_DOT,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TITLE: &str = "\x1b[38;2;148;163;184m";

struct AnsiPalette {
    filled: &'static str,
    current: &'static str,
    empty: &'static str,
}

fn ansi_palette(palette: Palette) -> AnsiPalette {
    match palette {
        Palette::Slate => AnsiPalette {
            filled: "\x1b[38;2;100;116;139m",
            current: "\x1b[38;2;226;232;240m",
            empty: "\x1b[38;2;51;65;85m",
        },
        Palette::Ember => AnsiPalette {
            filled: "\x1b[38;2;210;138;60m",
            current: "\x1b[38;2;250;204;21m",
            empty: "\x1b[38;2;68;52;36m",
        },
        Palette::Mono => AnsiPalette {
            filled: "\x1b[1m",
            current: "\x1b[7m",
            empty: "\x1b[2m",
        },
    }
}

// ─── Shared ──────────────────────────────────────────────────────────────────

/// The session's birthday, checked against today.
fn require_birthday(session: &Session, today: NaiveDate) -> Result<Birthdate> {
    let date = session.birthday.ok_or_else(|| {
        anyhow!("No birthday set. Run `memento birthday YYYY-MM-DD` or pass --birthday")
    })?;
    Ok(Birthdate::new(date, today).context("Invalid date")?)
}

fn session_grid(session: &Session) -> Result<(Birthdate, Grid, NaiveDate)> {
    let today = session.today();
    let birthdate = require_birthday(session, today)?;
    let grid = build_grid(birthdate.date(), session.life_expectancy, today)
        .context("Building calendar")?;
    Ok((birthdate, grid, today))
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_birthday(
    config: &mut AppConfig,
    config_path: &Path,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let birthdate = match Birthdate::new(date, today) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("Rejected birthday {}: {}", date, e);
            println_colored!(RED, "  ✗ Invalid date — your birthday cannot be in the future.");
            return Err(e).context("Invalid date");
        }
    };

    config.profile.birthday = Some(birthdate.date());
    config.save_to(config_path)?;

    println_colored!(GREEN, "  ✓ Birthday saved: {}", format_date(birthdate.date()));
    println!("  {}", generated_message(birthdate, today));
    Ok(())
}

pub fn handle_years(config: &mut AppConfig, config_path: &Path, years: u32) -> Result<()> {
    if years == 0 {
        bail!("Life expectancy must be at least one year");
    }
    config.profile.life_expectancy = years;
    config.save_to(config_path)?;
    println_colored!(
        GREEN,
        "  ✓ Calendar now spans {} years ({} weeks)",
        years,
        u64::from(years) * u64::from(WEEKS_PER_YEAR)
    );
    Ok(())
}

// ─── Grid ────────────────────────────────────────────────────────────────────

pub fn handle_grid(session: &Session, display: &DisplayConfig, transpose: bool) -> Result<()> {
    let (_, grid, _) = session_grid(session)?;
    let orientation = if transpose {
        display.orientation.toggled()
    } else {
        display.orientation
    };
    print!("{}", render_grid_text(&grid, orientation, display, true));
    Ok(())
}

/// Plain-text rendering of the grid, one line per row, followed by a legend.
pub fn render_grid_text(
    grid: &Grid,
    orientation: Orientation,
    display: &DisplayConfig,
    color: bool,
) -> String {
    let palette = ansi_palette(display.palette);
    let gap = " ".repeat(display.spacing as usize);
    let (rows, columns) = grid.dimensions(orientation);

    let mut out = String::new();
    out.push_str(&format!("\n  Your life in weeks: {}\n\n", orientation.display_name()));
    for row in 0..rows {
        out.push_str(&format!("{:>4} ", row + 1));
        for column in 0..columns {
            let Some(cell) = grid.cell_at(orientation, row, column) else {
                continue;
            };
            let glyph = dot_glyph(cell);
            if color {
                let code = match cell.status {
                    WeekStatus::Past => palette.filled,
                    WeekStatus::Current => palette.current,
                    WeekStatus::Future => palette.empty,
                };
                out.push_str(&format!("{}{}{}", code, glyph, RESET));
            } else {
                out.push(glyph);
            }
            if column + 1 < columns {
                out.push_str(&gap);
            }
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "\n  {} weeks lived   ◑ current week   {} future weeks\n\n",
        FILLED_DOT, EMPTY_DOT
    ));
    out
}

// ─── Week ────────────────────────────────────────────────────────────────────

pub fn handle_week(session: &Session, number: i64) -> Result<()> {
    let today = session.today();
    let birthdate = require_birthday(session, today)?;
    let cell = compute_week(birthdate.date(), number, today)
        .with_context(|| format!("Computing week {}", number))?;

    println!();
    println_colored!(BOLD, "  {}", week_tooltip(&cell));
    println_colored!(DIM, "  {}", format_date_range(cell.start_date, cell.end_date));
    println!("  {}", describe_status(&cell));
    if number >= i64::from(session.life_expectancy) * i64::from(WEEKS_PER_YEAR) {
        println_colored!(DIM, "  (beyond the {}-year horizon)", session.life_expectancy);
    }
    println!();
    Ok(())
}

fn describe_status(cell: &WeekCell) -> String {
    match cell.status {
        WeekStatus::Current => format!("Current week, {}% elapsed", cell.percent_elapsed()),
        status => status.display_name().to_string(),
    }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(session: &Session) -> Result<()> {
    let (birthdate, grid, today) = session_grid(session)?;
    let stats = LifeStats::new(&grid, birthdate.date(), today);

    println!();
    println_colored!(TITLE, "  Memento Mori — {}", format_date(today));
    println!();
    println_colored!(BOLD, "  Age:             {} years", stats.age_years);
    println!("  Weeks lived:     {}", stats.weeks_lived);
    println!(
        "  Weeks remaining: {} of {}",
        stats.weeks_remaining, stats.weeks_total
    );
    if stats.outlived_horizon() {
        println_colored!(GREEN, "  You have outlived the {}-year horizon.", session.life_expectancy);
    } else {
        println!(
            "  {}  {}",
            progress_bar(stats.fraction_lived, 30),
            format_percent(stats.percent_lived())
        );
    }
    println!();
    println_colored!(
        DIM,
        "  \"Remember that you will die. Let that inform how you live today.\""
    );
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Export<'a> {
    birthday: Birthdate,
    today: NaiveDate,
    life_expectancy: u32,
    stats: LifeStats,
    weeks: &'a [WeekCell],
}

pub fn handle_export(session: &Session) -> Result<()> {
    let (birthdate, grid, today) = session_grid(session)?;
    println!("{}", export_json(&grid, birthdate, today)?);
    Ok(())
}

pub fn export_json(grid: &Grid, birthdate: Birthdate, today: NaiveDate) -> Result<String> {
    let doc = Export {
        birthday: birthdate,
        today,
        life_expectancy: grid.life_expectancy_years,
        stats: LifeStats::new(grid, birthdate.date(), today),
        weeks: &grid.cells,
    };
    serde_json::to_string_pretty(&doc).context("Serializing calendar")
}
