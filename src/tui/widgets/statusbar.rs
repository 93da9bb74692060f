use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, flash: Option<&str>) {
    if let Some(msg) = flash {
        let paragraph = Paragraph::new(Line::from(Span::styled(msg, theme::green())))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let hints = [
        ("[Enter]", " log  "),
        ("[c]", " custom  "),
        ("[a]", " more  "),
        ("[Tab]", " goals  "),
        ("[n]", " new goal  "),
        ("[x]", " done  "),
        ("[s]", " stats  "),
        ("[?]", " help  "),
        ("[Esc]", " quit"),
    ];

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::leaf()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
