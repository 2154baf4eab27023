use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::calendar::Orientation;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate, orientation: Orientation) {
    let today_str = today.format("%A, %b %-d, %Y").to_string();
    let layout_str = match orientation {
        Orientation::YearRows => "Each row represents one year (52 weeks)",
        Orientation::WeekRows => "Each column represents one year (52 weeks)",
    };

    let title_line = Line::from(vec![
        Span::styled("Memento Mori Calendar", theme::bold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(today_str, theme::dim()),
    ]);
    let caption_line = Line::from(Span::styled(layout_str, theme::accent()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, caption_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
