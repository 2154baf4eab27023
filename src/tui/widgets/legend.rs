use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme::{self, DotColors};
use crate::utils::format::{EMPTY_DOT, FILLED_DOT};

pub fn render(frame: &mut Frame, area: Rect, colors: &DotColors) {
    let items = [
        (FILLED_DOT, colors.filled, " Weeks lived"),
        ('◑', colors.current, " Current week"),
        (EMPTY_DOT, colors.empty, " Future weeks"),
    ];

    let mut spans = Vec::new();
    for (i, (glyph, color, label)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("      "));
        }
        spans.push(Span::styled(glyph.to_string(), Style::default().fg(*color)));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
