use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::theme;

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    fn width(&self) -> u16 {
        let text = self.title.width().max(self.message.width()) + 4;
        (text as u16).min(MAX_WIDTH)
    }

    fn height(&self) -> u16 {
        let inner = self.width().saturating_sub(2).max(1) as usize;
        let message_lines = self.message.width().div_ceil(inner).max(1);
        message_lines as u16 + 3
    }
}

/// Draw toasts stacked down the top-right corner of `area`, newest first.
pub fn render(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    let mut y = area.y + 1;
    for toast in toasts.iter().rev() {
        let width = toast.width().min(area.width);
        let height = toast.height();
        if y + height > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height,
        };

        let border = match toast.kind {
            ToastKind::Info => theme::accent(),
            ToastKind::Error => theme::red(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(theme::surface());
        let text = vec![
            Line::from(Span::styled(
                toast.title.as_str(),
                border.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(toast.message.as_str(), theme::dim())),
        ];

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            rect,
        );
        y += height;
    }
}
