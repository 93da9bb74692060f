use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{DailyCount, StreakState};
use crate::tui::theme;
use crate::utils::format::{plural, ratio_bar};

pub fn render(frame: &mut Frame, area: Rect, streak: &StreakState, week: &[DailyCount]) {
    let block = Block::default()
        .title(Span::styled(" 🔥 Daily Streak ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    // Filled proportional to streak/30
    let bar = ratio_bar(streak.current as f64 / 30.0, 12);

    let streak_line = Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(bar, theme::amber()),
        Span::styled(
            format!("  {} streak active!", plural(streak.current, "day")),
            theme::amber().add_modifier(Modifier::BOLD),
        ),
    ]);

    let mut dots = vec![Span::styled("  ", theme::dim())];
    for day in week {
        let (dot, style) = match day.activities {
            0 => ("○", theme::dim()),
            1 => ("◑", theme::amber()),
            _ => ("●", theme::green().add_modifier(Modifier::BOLD)),
        };
        dots.push(Span::styled(dot, style));
        dots.push(Span::styled("  ", theme::dim()));
    }

    let active_this_week = week.iter().filter(|d| d.activities > 0).count();
    let meta_line = Line::from(Span::styled(
        format!(
            "  Best: {}  ·  Week: {}/{}",
            streak.best,
            active_this_week,
            week.len()
        ),
        theme::dim(),
    ));

    let text = vec![
        Line::from(""),
        streak_line,
        Line::from(dots),
        meta_line,
    ];
    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
