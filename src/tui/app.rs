use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::{build_grid, CalendarError, Grid, Orientation};
use crate::config::{AppConfig, Session};
use crate::models::{Birthdate, LifeStats, DATE_FORMAT};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::grid::{CellStyle, GridView};
use crate::tui::widgets::toast::{Toast, ToastKind};
use crate::tui::widgets::{details, grid, header, legend, statusbar, toast};
use crate::utils::format::generated_message;

const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Calendar,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    BirthdayInput,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub session: Session,
    /// Where birthday changes are saved; `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,
    pub toasts: Vec<Toast>,

    pub orientation: Orientation,
    pub selected: u32,

    // Rebuilt in full whenever the birthday or today changes
    pub today: NaiveDate,
    pub birthdate: Option<Birthdate>,
    pub grid: Option<Grid>,
    pub stats: Option<LifeStats>,
    pub generated_at: Instant,
    pub has_generated: bool,
}

impl App {
    pub fn new(config: AppConfig, session: Session, config_path: Option<PathBuf>) -> Self {
        let today = session.today();
        let orientation = config.display.orientation;

        let mut app = App {
            view: View::Calendar,
            config,
            session,
            config_path,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            toasts: Vec::new(),
            orientation,
            selected: 0,
            today,
            birthdate: None,
            grid: None,
            stats: None,
            generated_at: Instant::now(),
            has_generated: false,
        };

        match app.session.birthday {
            Some(date) => match Birthdate::new(date, today) {
                Ok(birthdate) => {
                    app.birthdate = Some(birthdate);
                    app.has_generated = true;
                    app.rebuild();
                }
                Err(e) => {
                    log::warn!("Ignoring saved birthday: {}", e);
                    app.push_toast(ToastKind::Error, "Invalid date", e.to_string());
                    app.open_birthday_input();
                }
            },
            None => app.open_birthday_input(),
        }
        app
    }

    /// Recompute grid and stats from the current birthday and today.
    pub fn rebuild(&mut self) {
        let Some(birthdate) = self.birthdate else {
            self.grid = None;
            self.stats = None;
            return;
        };

        match build_grid(birthdate.date(), self.session.life_expectancy, self.today) {
            Ok(grid) => {
                self.stats = Some(LifeStats::new(&grid, birthdate.date(), self.today));
                self.selected = grid
                    .current()
                    .map(|c| c.week_number)
                    .unwrap_or(0)
                    .min(grid.len().saturating_sub(1) as u32);
                self.grid = Some(grid);
                self.generated_at = Instant::now();
            }
            Err(e) => {
                log::warn!("Could not build calendar: {}", e);
                self.grid = None;
                self.stats = None;
                self.push_toast(ToastKind::Error, "Calendar unavailable", e.to_string());
            }
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| !t.is_expired(now));

        // The current week moves on at midnight
        let today = self.session.today();
        if today != self.today {
            log::debug!("Date changed from {} to {}", self.today, today);
            self.today = today;
            self.rebuild();
        }
    }

    pub fn push_toast(&mut self, kind: ToastKind, title: &str, message: impl Into<String>) {
        self.toasts.push(Toast::new(kind, title, message));
    }

    /// Validate and apply a new birthday. Future dates are rejected and the
    /// previous birthday is kept.
    pub fn set_birthday(&mut self, date: NaiveDate) -> Result<(), CalendarError> {
        let birthdate =
            Birthdate::new(date, self.today).inspect_err(|e| self.reject_birthday(e))?;
        self.apply_birthday(birthdate);
        Ok(())
    }

    fn reject_birthday(&mut self, err: &CalendarError) {
        log::warn!("Rejected birthday: {}", err);
        if let CalendarError::FutureBirthdate { .. } = err {
            self.push_toast(
                ToastKind::Error,
                "Invalid date",
                "Your birthday cannot be in the future.",
            );
        }
    }

    fn apply_birthday(&mut self, birthdate: Birthdate) {
        let date = birthdate.date();
        self.birthdate = Some(birthdate);
        self.session.birthday = Some(date);
        self.rebuild();

        // A failed rebuild has already reported itself
        if !self.has_generated && self.grid.is_some() {
            self.has_generated = true;
            self.push_toast(
                ToastKind::Info,
                "Calendar generated",
                generated_message(birthdate, self.today),
            );
        }

        self.config.profile.birthday = Some(date);
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                log::warn!("Could not save birthday: {:#}", e);
                self.push_toast(ToastKind::Error, "Not saved", format!("{:#}", e));
            }
        }
    }

    fn open_birthday_input(&mut self) {
        self.input_mode = InputMode::BirthdayInput;
        self.input_buffer = self
            .birthdate
            .map(|b| b.date().format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        self.input_error = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses — ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::BirthdayInput => self.handle_birthday_input(key),
            InputMode::Normal => match self.view {
                View::Calendar => self.handle_calendar_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('b') => {
                self.open_birthday_input();
            }
            KeyCode::Char('t') => {
                self.orientation = self.orientation.toggled();
            }
            KeyCode::Char('r') => {
                self.today = self.session.today();
                self.rebuild();
                let message = if self.session.is_pinned() {
                    format!("Calendar redrawn for {}.", self.today)
                } else {
                    "Calendar redrawn for today.".to_string()
                };
                self.push_toast(ToastKind::Info, "Refreshed", message);
            }
            KeyCode::Char('c') => {
                if let Some(current) = self.grid.as_ref().and_then(|g| g.current()) {
                    self.selected = current.week_number;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(0, 1),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Calendar;
            }
            _ => {}
        }
    }

    fn handle_birthday_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
            }
            KeyCode::Enter => {
                let trimmed = self.input_buffer.trim().to_string();
                if trimmed.is_empty() {
                    self.input_error = Some("Enter a date first (e.g. 1990-04-21)".to_string());
                    return;
                }
                match Birthdate::parse(&trimmed, self.today) {
                    Ok(birthdate) => {
                        self.apply_birthday(birthdate);
                        self.input_mode = InputMode::Normal;
                        self.input_buffer.clear();
                        self.input_error = None;
                    }
                    Err(e) => {
                        self.reject_birthday(&e);
                        self.input_error = Some(match e {
                            CalendarError::FutureBirthdate { .. } => {
                                "Your birthday cannot be in the future".to_string()
                            }
                            e => e.to_string(),
                        });
                    }
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) if (c.is_ascii_digit() || c == '-') && self.input_buffer.len() < 10 => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    /// Move the selection by whole rows/columns of the on-screen layout,
    /// stopping at the edges.
    fn move_selection(&mut self, d_row: i64, d_col: i64) {
        let Some(grid) = &self.grid else {
            return;
        };
        let (rows, columns) = grid.dimensions(self.orientation);
        let (row, column) = grid.position_of(self.orientation, self.selected);
        let row = (i64::from(row) + d_row).clamp(0, i64::from(rows) - 1) as u32;
        let column = (i64::from(column) + d_col).clamp(0, i64::from(columns) - 1) as u32;
        if let Some(cell) = grid.cell_at(self.orientation, row, column) {
            self.selected = cell.week_number;
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_calendar(frame);

        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
        if self.input_mode == InputMode::BirthdayInput {
            self.draw_birthday_input(frame);
        }

        toast::render(frame, frame.area(), &self.toasts);
    }

    fn draw_calendar(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // legend
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0], self.today, self.orientation);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(36)])
            .split(outer_chunks[1]);

        let style = CellStyle::from_display(&self.config.display);
        match &self.grid {
            Some(g) => {
                let elapsed = self
                    .config
                    .display
                    .reveal_animation
                    .then(|| self.generated_at.elapsed());
                let view = GridView {
                    grid: g,
                    orientation: self.orientation,
                    selected: self.selected,
                    style,
                    elapsed,
                };
                grid::render(frame, body[0], &view);
            }
            None => {
                let placeholder = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "  Each circle represents one week of your life.",
                        theme::dim(),
                    )),
                    Line::from(Span::styled("  Press [b] to enter your birthday.", theme::dim())),
                ])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(theme::border()),
                );
                frame.render_widget(placeholder, body[0]);
            }
        }

        let cell = self.grid.as_ref().and_then(|g| g.get(self.selected));
        details::render(frame, body[1], cell, self.stats.as_ref());

        legend::render(frame, outer_chunks[2], &style.colors);
        statusbar::render(frame, outer_chunks[3]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(12),
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [← ↑ ↓ →]    ", "Move between weeks"),
            ("  [h j k l]    ", "Move between weeks"),
            ("  [c]          ", "Jump to the current week"),
            ("  [b]          ", "Change birthday"),
            ("  [t]          ", "Swap rows and columns"),
            ("  [r]          ", "Refresh for today"),
            ("  [?]          ", "Toggle help"),
            ("  [q] / Esc    ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::accent()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_birthday_input(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = if self.input_error.is_some() { 7 } else { 5 };

        let popup_area = Rect {
            x: area.width / 4,
            y: (area.height / 2).saturating_sub(3),
            width: area.width / 2,
            height,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Your birthday: ", theme::dim()),
                Span::styled(self.input_buffer.as_str(), theme::bold()),
                Span::styled("█", theme::accent()), // block cursor
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  YYYY-MM-DD, then [Enter]  ·  [Esc] cancel",
                theme::dim(),
            )),
        ];

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let border_style = if self.input_error.is_some() {
            theme::red()
        } else {
            theme::accent()
        };

        let block = Block::default()
            .title(Span::styled(" Pick a date ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());

        let paragraph = Paragraph::new(text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(config: AppConfig, session: Session) -> Result<()> {
    let config_path = AppConfig::config_path().ok();
    let mut app = App::new(config, session, config_path);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(TICK_RATE);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Resize(columns, rows)) => {
                log::debug!("Terminal resized to {}x{}", columns, rows);
            }
            Ok(Event::Tick) => app.tick(),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app_with(birthday: Option<NaiveDate>) -> App {
        let mut config = AppConfig::default();
        config.display.reveal_animation = false;
        let session = Session::resolve(&config, birthday, None, Some(date(2024, 6, 8)));
        App::new(config, session, None)
    }

    fn screen(app: &App) -> String {
        screen_sized(app, 160, 60)
    }

    fn screen_sized(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn starts_in_birthday_input_without_a_birthday() {
        let app = app_with(None);
        assert_eq!(app.input_mode, InputMode::BirthdayInput);
        assert!(app.grid.is_none());
        assert!(screen(&app).contains("Pick a date"));
    }

    #[test]
    fn entering_a_birthday_generates_the_calendar() {
        let mut app = app_with(None);
        type_str(&mut app, "1980-06-01");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        let grid = app.grid.as_ref().unwrap();
        assert_eq!(grid.len(), 85 * 52);
        assert_eq!(app.selected, 2296);
        assert_eq!(app.config.profile.birthday, Some(date(1980, 6, 1)));

        let toast = app.toasts.last().unwrap();
        assert_eq!(toast.title, "Calendar generated");
        assert_eq!(
            toast.message,
            "You've lived 44 years. Each circle represents one week of your life."
        );
    }

    #[test]
    fn future_birthday_is_rejected_and_previous_kept() {
        let mut app = app_with(Some(date(1980, 6, 1)));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.input_buffer, "1980-06-01");

        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "2030-01-01");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::BirthdayInput);
        assert!(app.input_error.is_some());
        assert_eq!(app.toasts.last().unwrap().title, "Invalid date");
        assert_eq!(app.birthdate.unwrap().date(), date(1980, 6, 1));
        assert_eq!(app.grid.as_ref().unwrap().len(), 85 * 52);
    }

    #[test]
    fn malformed_input_shows_an_error() {
        let mut app = app_with(None);
        type_str(&mut app, "1980-13-01");
        press(&mut app, KeyCode::Enter);
        assert!(app.input_error.as_deref().unwrap().contains("not a valid date"));
        assert!(app.grid.is_none());
    }

    #[test]
    fn generated_toast_only_on_first_birthday() {
        let mut app = app_with(Some(date(1980, 6, 1)));
        assert!(app.toasts.is_empty());
        app.set_birthday(date(1990, 1, 1)).unwrap();
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut app = app_with(Some(date(1980, 6, 1)));
        app.orientation = Orientation::YearRows;
        app.selected = 0;

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 53);

        app.orientation = Orientation::WeekRows;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected, 105);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.selected, 2296);
    }

    #[test]
    fn transpose_keeps_the_selected_week() {
        let mut app = app_with(Some(date(1980, 6, 1)));
        let before = app.selected;
        let orientation = app.orientation;
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.orientation, orientation.toggled());
        assert_eq!(app.selected, before);
    }

    #[test]
    fn screen_shows_tooltip_for_selected_week() {
        let app = app_with(Some(date(1980, 6, 1)));
        let text = screen(&app);
        assert!(text.contains("Age 44 years, week 9 of life"));
        assert!(text.contains("Jun 2, 2024 - Jun 8, 2024"));
        assert!(text.contains("Weeks lived"));
        assert!(text.contains('●'));
    }

    #[test]
    fn help_and_quit() {
        let mut app = app_with(Some(date(1980, 6, 1)));
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        assert!(screen(&app).contains("Keybindings"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Calendar);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn overlays_fit_short_terminals() {
        let mut app = app_with(Some(date(1980, 6, 1)));
        press(&mut app, KeyCode::Char('?'));
        assert!(screen_sized(&app, 80, 14).contains("Keybindings"));
        screen_sized(&app, 20, 5);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('b'));
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "2030-01-01");
        press(&mut app, KeyCode::Enter);
        assert!(app.input_error.is_some());
        assert!(screen_sized(&app, 80, 14).contains("Pick a date"));
        screen_sized(&app, 20, 5);
    }

    #[test]
    fn no_generated_toast_when_the_calendar_cannot_be_built() {
        let mut config = AppConfig::default();
        config.display.reveal_animation = false;
        let session = Session::resolve(&config, None, Some(1_000_000), Some(date(2024, 6, 8)));
        let mut app = App::new(config, session, None);

        type_str(&mut app, "1980-06-01");
        press(&mut app, KeyCode::Enter);

        assert!(app.grid.is_none());
        let titles: Vec<&str> = app.toasts.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Calendar unavailable"]);
        assert!(!app.has_generated);
    }
}
