use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, name: &str, today: NaiveDate) {
    let title_line = Line::from(vec![
        Span::styled("  🌿 greenstep  ", theme::leaf().add_modifier(Modifier::BOLD)),
        Span::styled("eco journey", theme::dim()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(format!("Welcome back, {}!", name), theme::amber()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(today.format("%A, %b %d, %Y").to_string(), theme::dim()),
    ]);

    let text = vec![title_line, Line::from(""), date_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::leaf().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
