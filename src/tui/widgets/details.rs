use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{LifeStats, WeekCell, WeekStatus};
use crate::tui::theme;
use crate::utils::format::{format_date_range, format_percent, progress_bar, week_tooltip};

const QUOTE: &str = "\"Remember that you will die. Let that inform how you live today.\"";

pub fn render(frame: &mut Frame, area: Rect, cell: Option<&WeekCell>, stats: Option<&LifeStats>) {
    let block = Block::default()
        .title(Span::styled(" Week ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![Line::from("")];

    match cell {
        Some(cell) => {
            lines.push(Line::from(Span::styled(
                format!(" {}", week_tooltip(cell)),
                theme::bold(),
            )));
            lines.push(Line::from(Span::styled(
                format!(" {}", format_date_range(cell.start_date, cell.end_date)),
                theme::dim(),
            )));
            lines.push(Line::from(""));
            let status = match cell.status {
                WeekStatus::Current => Span::styled(
                    format!(" Current week · {}% elapsed", cell.percent_elapsed()),
                    theme::accent().add_modifier(Modifier::BOLD),
                ),
                WeekStatus::Past => Span::styled(" Lived", theme::green()),
                WeekStatus::Future => Span::styled(" Ahead", theme::dim()),
            };
            lines.push(Line::from(status));
            lines.push(Line::from(Span::styled(
                format!(
                    " Year {} · week #{} since birth",
                    cell.year_index() + 1,
                    cell.week_number + 1
                ),
                theme::dim(),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                " No birthday yet",
                theme::bold(),
            )));
            lines.push(Line::from(Span::styled(
                " Press [b] to pick a date",
                theme::dim(),
            )));
        }
    }

    if let Some(stats) = stats {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Age        ", theme::dim()),
            Span::styled(format!("{} years", stats.age_years), theme::bold()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Lived      ", theme::dim()),
            Span::styled(format!("{} weeks", stats.weeks_lived), theme::bold()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Remaining  ", theme::dim()),
            Span::styled(format!("{} weeks", stats.weeks_remaining), theme::bold()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", progress_bar(stats.fraction_lived, 16)), theme::accent()),
            Span::styled(format!(" {}", format_percent(stats.percent_lived())), theme::dim()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(QUOTE, theme::dim())));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
