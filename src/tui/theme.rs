use ratatui::style::{Color, Modifier, Style};

use crate::config::Palette;

pub const BG: Color = Color::Rgb(15, 23, 42);
pub const SURFACE: Color = Color::Rgb(30, 41, 59);
pub const BORDER: Color = Color::Rgb(51, 65, 85);
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const TEXT_DIM: Color = Color::Rgb(100, 116, 139);
pub const ACCENT: Color = Color::Rgb(148, 163, 184);
pub const GREEN: Color = Color::Rgb(92, 148, 92);
pub const RED: Color = Color::Rgb(180, 82, 62);

/// Colours of the three dot states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotColors {
    pub filled: Color,
    pub current: Color,
    pub empty: Color,
}

pub fn dot_colors(palette: Palette) -> DotColors {
    match palette {
        Palette::Slate => DotColors {
            filled: Color::Rgb(100, 116, 139),
            current: Color::Rgb(226, 232, 240),
            empty: Color::Rgb(51, 65, 85),
        },
        Palette::Ember => DotColors {
            filled: Color::Rgb(210, 138, 60),
            current: Color::Rgb(250, 204, 21),
            empty: Color::Rgb(68, 52, 36),
        },
        Palette::Mono => DotColors {
            filled: Color::White,
            current: Color::Gray,
            empty: Color::DarkGray,
        },
    }
}

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}
