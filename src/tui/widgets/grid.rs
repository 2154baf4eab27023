use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::calendar::{Grid, Orientation};
use crate::config::DisplayConfig;
use crate::models::WeekStatus;
use crate::tui::theme::{self, DotColors};
use crate::utils::format::dot_glyph;

const LABEL_WIDTH: u16 = 4;

/// Options shared by every dot the grid draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub spacing: u16,
    pub colors: DotColors,
}

impl CellStyle {
    pub fn from_display(display: &DisplayConfig) -> Self {
        Self {
            spacing: display.spacing,
            colors: theme::dot_colors(display.palette),
        }
    }

    pub fn cell_width(&self) -> u16 {
        1 + self.spacing
    }

    fn dot_style(&self, status: WeekStatus, selected: bool) -> Style {
        let fg = match status {
            WeekStatus::Past => self.colors.filled,
            WeekStatus::Current => self.colors.current,
            WeekStatus::Future => self.colors.empty,
        };
        let style = Style::default().fg(fg);
        if selected {
            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            style
        }
    }
}

/// How long after the grid is generated the dot at `(row, column)` appears.
pub fn reveal_delay(row: u32, column: u32) -> Duration {
    Duration::from_millis(u64::from(row) * 5 + u64::from(column) * 3)
}

/// First index to draw so that `selected` stays inside a window of
/// `visible` items out of `total`.
pub fn scroll_offset(selected: u32, visible: u32, total: u32) -> u32 {
    if visible == 0 || total <= visible {
        return 0;
    }
    let max_offset = total - visible;
    selected.saturating_sub(visible - 1).min(max_offset)
}

pub struct GridView<'a> {
    pub grid: &'a Grid,
    pub orientation: Orientation,
    pub selected: u32,
    pub style: CellStyle,
    /// Time since the grid was generated; `None` draws every dot at once.
    pub elapsed: Option<Duration>,
}

pub fn render(frame: &mut Frame, area: Rect, view: &GridView) {
    let block = Block::default()
        .title(Span::styled(" Your life in weeks ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (rows, columns) = view.grid.dimensions(view.orientation);
    let (sel_row, sel_col) = view.grid.position_of(view.orientation, view.selected);

    let visible_rows = u32::from(inner.height);
    let visible_cols =
        u32::from(inner.width.saturating_sub(LABEL_WIDTH) / view.style.cell_width());
    let row_offset = scroll_offset(sel_row, visible_rows, rows);
    let col_offset = scroll_offset(sel_col, visible_cols, columns);
    let gap = " ".repeat(view.style.spacing as usize);

    let mut lines = Vec::with_capacity(visible_rows as usize);
    for row in row_offset..rows.min(row_offset + visible_rows) {
        let label = if row % 5 == 0 {
            let shown = match view.orientation {
                Orientation::YearRows => row,
                Orientation::WeekRows => row + 1,
            };
            format!("{:>3} ", shown)
        } else {
            " ".repeat(LABEL_WIDTH as usize)
        };
        let mut spans = vec![Span::styled(label, theme::dim())];

        for column in col_offset..columns.min(col_offset + visible_cols) {
            let Some(cell) = view.grid.cell_at(view.orientation, row, column) else {
                continue;
            };
            let revealed = view
                .elapsed
                .is_none_or(|elapsed| elapsed >= reveal_delay(row, column));
            if revealed {
                let selected = cell.week_number == view.selected;
                spans.push(Span::styled(
                    dot_glyph(cell).to_string(),
                    view.style.dot_style(cell.status, selected),
                ));
            } else {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::raw(gap.clone()));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
