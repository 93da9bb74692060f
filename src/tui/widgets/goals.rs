use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::{Category, GoalRecord, GoalSummary};
use crate::progress::goals::Encouragement;
use crate::tui::theme;
use crate::utils::format::format_percent;

pub struct GoalsView<'a> {
    pub goals: &'a [GoalRecord],
    pub summary: &'a GoalSummary,
    pub today: NaiveDate,
    pub highlight_overdue: bool,
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &GoalsView,
    state: &mut ListState,
    focused_idx: usize,
    focused: bool,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(
                " Goals  {}/{} · {}% ",
                view.summary.completed, view.summary.total, view.summary.completion_rate_percent
            ),
            theme::leaf(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
        format!("  {}", Encouragement::for_summary(view.summary).message()),
        theme::dim(),
    )))];

    for (i, goal) in view.goals.iter().enumerate() {
        let is_focused = focused && i == focused_idx;
        let overdue = view.highlight_overdue && goal.is_overdue(view.today);

        let (check, check_style) = if goal.completed {
            ("✓", theme::green())
        } else if overdue {
            ("!", theme::red())
        } else {
            ("○", theme::dim())
        };

        let mut text_style = if goal.completed {
            theme::dim().add_modifier(Modifier::CROSSED_OUT)
        } else {
            theme::bold()
        };
        if is_focused {
            text_style = text_style.fg(theme::LEAF).add_modifier(Modifier::BOLD);
        }

        let due = goal
            .deadline
            .map(|d| format!("  due {}", d.format("%b %d")))
            .unwrap_or_default();

        items.push(ListItem::new(Line::from(vec![
            Span::styled(if is_focused { "▸ " } else { "  " }, theme::leaf()),
            Span::styled(check, check_style),
            Span::raw(format!(" {} ", Category::icon_for(&goal.category))),
            Span::styled(goal.text.clone(), text_style),
            Span::styled(due, if overdue { theme::red() } else { theme::dim() }),
        ])));
    }

    if !view.summary.per_category.is_empty() {
        items.push(ListItem::new(Line::from("")));
        let mut spans = vec![Span::styled("  ", theme::dim())];
        for cat in &view.summary.per_category {
            spans.push(Span::raw(format!("{} ", Category::icon_for(&cat.category))));
            spans.push(Span::styled(format!("{}   ", format_percent(cat.percent)), theme::sky()));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    // Row 0 is the encouragement line
    let selected = (focused && focused_idx < view.goals.len()).then_some(focused_idx + 1);
    state.select(selected);

    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, state);
}
