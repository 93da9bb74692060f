use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{BadgeProgress, Category};
use crate::tui::theme;
use crate::utils::format::{pad_display, plural, ratio_bar};

pub fn render(frame: &mut Frame, area: Rect, badges: &[BadgeProgress]) {
    let block = Block::default()
        .title(Span::styled(" Badges ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![Line::from("")];
    for badge in badges {
        let (status, style) = if badge.earned() {
            (
                plural(badge.earned_count, "badge"),
                theme::green().add_modifier(Modifier::BOLD),
            )
        } else {
            ("not yet".to_string(), theme::dim())
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {}", pad_display(Category::icon_for(&badge.category), 3))),
            Span::styled(format!("{:<15}", badge.category), theme::bold()),
            Span::styled(ratio_bar(badge.fraction, 10), theme::green()),
            Span::styled(format!("  {:<9}", status), style),
            Span::styled(format!("{} to next", badge.remaining_to_next), theme::dim()),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
