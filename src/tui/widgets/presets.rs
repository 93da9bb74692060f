use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::progress::emissions::Preset;
use crate::tui::theme;
use crate::utils::format::{format_kg, pad_display};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    presets: &[&Preset],
    focused_idx: usize,
    focused: bool,
    show_all: bool,
) {
    let title = if show_all {
        " 🌱 Log Your Activity (all) "
    } else {
        " 🌱 Log Your Activity "
    };
    let block = Block::default()
        .title(Span::styled(title, theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let items: Vec<ListItem> = presets
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let is_focused = focused && i == focused_idx;
            let icon = p.category.map(|c| c.icon()).unwrap_or("🌳");
            let marker = if is_focused { "▸ " } else { "  " };
            let name_style = if is_focused {
                theme::leaf().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, theme::leaf()),
                Span::raw(pad_display(icon, 3)),
                Span::styled(format!("{:<28}", p.name), name_style),
                Span::styled(format_kg(p.co2_kg), theme::dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
