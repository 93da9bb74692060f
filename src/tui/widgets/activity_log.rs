use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::progress::EcoSnapshot;
use crate::tui::theme;
use crate::utils::format::format_kg;

pub fn render(frame: &mut Frame, area: Rect, snap: &EcoSnapshot) {
    let block = Block::default()
        .title(Span::styled(" Your Logs ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![Line::from(vec![
        Span::styled("  CO₂ saved  ", theme::dim()),
        Span::styled(
            format_kg(snap.co2_saved_kg),
            theme::green().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   ·  today: {}", snap.logged_today()), theme::dim()),
    ])];
    lines.push(Line::from(""));

    // rows left after the totals and borders
    let room = area.height.saturating_sub(4) as usize;
    if snap.activities.is_empty() {
        lines.push(Line::from(Span::styled("  No logs yet.", theme::dim())));
    } else {
        for record in snap.recent(room) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}  ", record.occurred_at.format("%b %d %H:%M")),
                    theme::dim(),
                ),
                Span::styled(record.activity.clone(), theme::bold()),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
