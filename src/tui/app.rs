use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, ListState, Paragraph},
    Frame,
};

use crate::config::AppConfig;
use crate::db::EcoStore;
use crate::models::{NewActivity, NewGoal};
use crate::progress::emissions::{self, Preset};
use crate::progress::EcoSnapshot;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::goals::GoalsView;
use crate::tui::widgets::{activity_log, badges, goals, header, presets, statusbar, streak};
use crate::utils::format::{format_kg, plural};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FocusSection {
    Presets,
    Goals,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    CustomActivity,
    NewGoal,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub focus_section: FocusSection,
    pub focus_idx: usize,
    pub show_all_presets: bool,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,
    /// One-line confirmation shown in place of the key hints
    pub flash: Option<String>,
    pub snapshot: EcoSnapshot,
    /// Scroll position of the goals panel
    pub goals_list: ListState,
}

impl App {
    pub fn new(config: AppConfig, snapshot: EcoSnapshot) -> Self {
        App {
            view: View::Dashboard,
            config,
            focus_section: FocusSection::Presets,
            focus_idx: 0,
            show_all_presets: false,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            flash: None,
            snapshot,
            goals_list: ListState::default(),
        }
    }

    /// Rebuild every derived value from a fresh fetch.
    pub fn load<S: EcoStore>(&mut self, store: &S) -> Result<()> {
        self.snapshot = EcoSnapshot::build(
            store,
            &self.config.profile.user_id,
            Local::now().date_naive(),
            self.config.badges.milestone(),
        )?;
        let max = self.focus_len().saturating_sub(1);
        self.focus_idx = self.focus_idx.min(max);
        Ok(())
    }

    pub fn tick<S: EcoStore>(&mut self, store: &S) {
        // Streak and "today" counts depend on the date, so reload at midnight
        if Local::now().date_naive() != self.snapshot.today {
            if let Err(e) = self.load(store) {
                log::warn!("Reload on date change failed: {:#}", e);
            }
        }
    }

    pub fn visible_presets(&self) -> Vec<&'static Preset> {
        emissions::presets(self.show_all_presets)
    }

    fn focus_len(&self) -> usize {
        match self.focus_section {
            FocusSection::Presets => self.visible_presets().len(),
            FocusSection::Goals => self.snapshot.goals.len(),
        }
    }

    pub fn handle_key<S: EcoStore>(&mut self, key: KeyEvent, store: &S) {
        // Only handle actual key presses — ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::CustomActivity | InputMode::NewGoal => self.handle_input_key(key, store),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, store),
                View::Stats => {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('s')) {
                        self.view = View::Dashboard;
                    }
                }
                View::Help => {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                        self.view = View::Dashboard;
                    }
                }
            },
        }
    }

    fn handle_dashboard_key<S: EcoStore>(&mut self, key: KeyEvent, store: &S) {
        self.flash = None;
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('s') => {
                self.view = View::Stats;
            }
            KeyCode::Char('a') => {
                self.show_all_presets = !self.show_all_presets;
                if self.focus_section == FocusSection::Presets {
                    self.focus_idx = self.focus_idx.min(self.focus_len().saturating_sub(1));
                }
            }
            KeyCode::Char('c') => {
                self.open_input(InputMode::CustomActivity);
            }
            KeyCode::Char('n') => {
                self.open_input(InputMode::NewGoal);
            }
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focus_idx + 1 < self.focus_len() {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Tab | KeyCode::Char('g') => {
                self.focus_section = match self.focus_section {
                    FocusSection::Presets => FocusSection::Goals,
                    FocusSection::Goals => FocusSection::Presets,
                };
                self.focus_idx = 0;
            }
            KeyCode::Enter => match self.focus_section {
                FocusSection::Presets => self.log_focused_preset(store),
                FocusSection::Goals => self.toggle_focused_goal(store),
            },
            KeyCode::Char('x') => {
                if self.focus_section == FocusSection::Goals {
                    self.toggle_focused_goal(store);
                }
            }
            KeyCode::Char('D') => {
                if self.focus_section == FocusSection::Goals {
                    self.delete_focused_goal(store);
                }
            }
            _ => {}
        }
    }

    fn open_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn close_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn handle_input_key<S: EcoStore>(&mut self, key: KeyEvent, store: &S) {
        match key.code {
            KeyCode::Esc => self.close_input(),
            KeyCode::Enter => {
                let result = match self.input_mode {
                    InputMode::CustomActivity => self.submit_custom_activity(store),
                    InputMode::NewGoal => self.submit_goal(store),
                    InputMode::Normal => Ok(()),
                };
                match result {
                    Ok(()) => self.close_input(),
                    Err(e) => self.input_error = Some(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    /// `name` or `name | kg`
    fn submit_custom_activity<S: EcoStore>(&mut self, store: &S) -> Result<()> {
        let mut parts = self.input_buffer.splitn(2, '|').map(str::trim);
        let name = parts.next().unwrap_or("");
        let co2 = match parts.next().filter(|s| !s.is_empty()) {
            None => None,
            Some(s) => Some(
                s.trim_end_matches("kg")
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| anyhow::anyhow!("'{}' is not a valid number", s))?,
            ),
        };
        let new = emissions::resolve_log(name, None, co2, Local::now().naive_local())?;
        self.log(store, &new)
    }

    /// `text | category [| YYYY-MM-DD]`
    fn submit_goal<S: EcoStore>(&mut self, store: &S) -> Result<()> {
        let parts: Vec<&str> = self.input_buffer.split('|').map(str::trim).collect();
        let (text, category, deadline) = match parts.as_slice() {
            [text, category] => (*text, *category, None),
            [text, category, deadline] => (*text, *category, Some(*deadline)),
            _ => anyhow::bail!("Use: text | category [| YYYY-MM-DD]"),
        };
        let goal = NewGoal::parse(text, category, deadline)?;
        store.add_goal(&self.config.profile.user_id, &goal)?;
        self.flash = Some(format!("✓ Added goal: {}", goal.text));
        self.load(store)
    }

    fn log<S: EcoStore>(&mut self, store: &S, new: &NewActivity) -> Result<()> {
        store.log_activity(&self.config.profile.user_id, new)?;
        let custom = store.custom_emissions(&self.config.profile.user_id)?;
        self.flash = Some(format!(
            "✓ Logged {} — {} CO₂ saved",
            new.activity,
            format_kg(emissions::co2_for(&new.activity, &custom))
        ));
        self.load(store)
    }

    fn log_focused_preset<S: EcoStore>(&mut self, store: &S) {
        let Some(preset) = self.visible_presets().get(self.focus_idx).copied() else {
            return;
        };
        let result = emissions::resolve_log(preset.name, None, None, Local::now().naive_local())
            .map_err(anyhow::Error::from)
        .and_then(|new| self.log(store, &new));
        if let Err(e) = result {
            log::warn!("Logging preset failed: {:#}", e);
        }
    }

    fn toggle_focused_goal<S: EcoStore>(&mut self, store: &S) {
        let Some(goal) = self.snapshot.goals.get(self.focus_idx) else {
            return;
        };
        let id = goal.id;
        let result = store
            .toggle_goal(&self.config.profile.user_id, id)
            .and_then(|_| self.load(store));
        if let Err(e) = result {
            log::warn!("Toggling goal {} failed: {:#}", id, e);
        }
    }

    fn delete_focused_goal<S: EcoStore>(&mut self, store: &S) {
        let Some(goal) = self.snapshot.goals.get(self.focus_idx) else {
            return;
        };
        let id = goal.id;
        let result = store
            .delete_goal(&self.config.profile.user_id, id)
            .and_then(|_| self.load(store));
        match result {
            Ok(()) => self.flash = Some(format!("Deleted goal #{}", id)),
            Err(e) => log::warn!("Deleting goal {} failed: {:#}", id, e),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Stats => self.draw_stats(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if self.input_mode != InputMode::Normal {
            self.draw_input(frame);
        }
    }

    fn draw_dashboard(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            &self.config.profile.name,
            self.snapshot.today,
        );
        statusbar::render(frame, outer_chunks[2], self.flash.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer_chunks[1]);

        // Left column: presets + log
        let preset_list = self.visible_presets();
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(preset_list.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        presets::render(
            frame,
            left_chunks[0],
            &preset_list,
            self.focus_idx,
            self.focus_section == FocusSection::Presets,
            self.show_all_presets,
        );
        activity_log::render(frame, left_chunks[1], &self.snapshot);

        // Right column: streak + badges + goals
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // streak
                Constraint::Length(7), // badges
                Constraint::Min(0),    // goals
            ])
            .split(columns[1]);

        streak::render(
            frame,
            right_chunks[0],
            &self.snapshot.streak,
            &self.snapshot.last_week,
        );
        badges::render(frame, right_chunks[1], &self.snapshot.badges);
        goals::render(
            frame,
            right_chunks[2],
            &GoalsView {
                goals: &self.snapshot.goals,
                summary: &self.snapshot.goal_summary,
                today: self.snapshot.today,
                highlight_overdue: self.config.goals.highlight_overdue,
            },
            &mut self.goals_list,
            self.focus_idx,
            self.focus_section == FocusSection::Goals,
        );
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  Stats  ", theme::leaf().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let snap = &self.snapshot;
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Streak (current):  ", theme::dim()),
                Span::styled(
                    plural(snap.streak.current, "day"),
                    theme::amber().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Streak (best):     ", theme::dim()),
                Span::styled(plural(snap.streak.best, "day"), theme::amber()),
            ]),
            Line::from(vec![
                Span::styled("  Active days:       ", theme::dim()),
                Span::styled(format!("{}", snap.streak.active_days), theme::bold()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  CO₂ saved:         ", theme::dim()),
                Span::styled(format_kg(snap.co2_saved_kg), theme::green()),
            ]),
            Line::from(vec![
                Span::styled("  Goals completed:   ", theme::dim()),
                Span::styled(
                    format!(
                        "{}/{}  ({}%)",
                        snap.goal_summary.completed,
                        snap.goal_summary.total,
                        snap.goal_summary.completion_rate_percent
                    ),
                    theme::sky(),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled("  Last 7 Days", theme::leaf())),
            Line::from(""),
        ];

        for day in &snap.last_week {
            let bar = crate::utils::format::progress_bar(day.activities.min(6), 6, 12);
            let style = match day.activities {
                0 => theme::dim(),
                1 | 2 => theme::amber(),
                _ => theme::green(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}  ", bar), style),
                Span::styled(format!("{}  {}", day.date, day.activities), theme::dim()),
            ]));
        }

        if !snap.top_activities.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("  Top Activities", theme::leaf())));
            lines.push(Line::from(""));
            for (name, count) in snap.top_activities.iter().take(5) {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<30}", name), theme::bold()),
                    Span::styled(format!("×{}", count), theme::dim()),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[↑ ↓]        ", "Navigate items"),
            ("[Enter]      ", "Log preset / toggle goal"),
            ("[Tab] / [g]  ", "Switch presets ↔ goals"),
            ("[a]          ", "Show more presets"),
            ("[c]          ", "Log a custom activity"),
            ("[n]          ", "Set a new goal"),
            ("[x]          ", "Toggle focused goal"),
            ("[D]          ", "Delete focused goal"),
            ("[s]          ", "Stats view"),
            ("[?]          ", "Toggle help"),
            ("[Esc]        ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::leaf().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {}", key), theme::leaf()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::leaf()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::leaf())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_input(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = if self.input_error.is_some() { 7 } else { 5 };

        let popup_area = Rect {
            x: area.width / 6,
            y: (area.height / 2).saturating_sub(3),
            width: area.width * 2 / 3,
            height,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let (title, prompt, hint) = match self.input_mode {
            InputMode::NewGoal => (
                " Set a New Goal ",
                "  Goal: ",
                "  text | category [| YYYY-MM-DD], then [Enter]  ·  [Esc] cancel",
            ),
            _ => (
                " Log Custom Activity ",
                "  Activity: ",
                "  name [| kg CO₂ saved], then [Enter]  ·  [Esc] cancel",
            ),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(prompt, theme::dim()),
                Span::styled(
                    self.input_buffer.as_str(),
                    theme::leaf().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", theme::amber()),
            ]),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim())),
        ];

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let block = Block::default()
            .title(Span::styled(title, theme::leaf()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.input_error.is_some() {
                theme::red()
            } else {
                theme::amber()
            })
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run<S: EcoStore>(store: S, config: AppConfig) -> Result<()> {
    let snapshot = EcoSnapshot::build(
        &store,
        &config.profile.user_id,
        Local::now().date_naive(),
        config.badges.milestone(),
    )?;
    let mut app = App::new(config, snapshot);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(1000);

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key, &store);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Resize) => {}
            Ok(Event::Tick) => app.tick(&store),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use rusqlite::Connection;

    fn setup() -> (Connection, App) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let config = AppConfig::default();
        let snapshot =
            EcoSnapshot::build(&conn, "local", Local::now().date_naive(), 5).unwrap();
        (conn, App::new(config, snapshot))
    }

    fn press(app: &mut App, conn: &Connection, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), conn);
    }

    fn type_str(app: &mut App, conn: &Connection, s: &str) {
        for c in s.chars() {
            press(app, conn, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_logs_focused_preset() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Down);
        press(&mut app, &conn, KeyCode::Enter);

        assert_eq!(app.snapshot.activities.len(), 1);
        assert_eq!(app.snapshot.activities[0].activity, "Biked to Work");
        assert_eq!(app.snapshot.streak.current, 1);
        assert!(app.flash.as_deref().unwrap().contains("3.2 kg"));
    }

    #[test]
    fn more_presets_extend_navigation() {
        let (conn, mut app) = setup();
        for _ in 0..10 {
            press(&mut app, &conn, KeyCode::Down);
        }
        assert_eq!(app.focus_idx, 4);
        press(&mut app, &conn, KeyCode::Char('a'));
        for _ in 0..20 {
            press(&mut app, &conn, KeyCode::Down);
        }
        assert_eq!(app.focus_idx, emissions::PRESETS.len() - 1);
        press(&mut app, &conn, KeyCode::Char('a'));
        assert_eq!(app.focus_idx, 4);
    }

    #[test]
    fn custom_activity_with_co2() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('c'));
        assert_eq!(app.input_mode, InputMode::CustomActivity);
        type_str(&mut app, &conn, "Fixed a bike | 4.5");
        press(&mut app, &conn, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.snapshot.activities[0].activity, "Fixed a bike");
        assert!((app.snapshot.co2_saved_kg - 4.5).abs() < 1e-9);
    }

    #[test]
    fn bad_custom_input_keeps_popup_open() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('c'));
        type_str(&mut app, &conn, "Fixed a bike | lots");
        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::CustomActivity);
        assert!(app.input_error.is_some());
        assert!(app.snapshot.activities.is_empty());

        press(&mut app, &conn, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn new_goal_then_toggle() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('n'));
        type_str(&mut app, &conn, "Bike daily | transport | 2099-01-01");
        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.snapshot.goals.len(), 1);
        assert_eq!(app.snapshot.goals[0].category, "Transportation");

        press(&mut app, &conn, KeyCode::Tab);
        press(&mut app, &conn, KeyCode::Char('x'));
        assert!(app.snapshot.goals[0].completed);
        assert_eq!(app.snapshot.goal_summary.completion_rate_percent, 100);

        press(&mut app, &conn, KeyCode::Char('D'));
        assert!(app.snapshot.goals.is_empty());
    }

    #[test]
    fn goal_input_needs_category() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('n'));
        type_str(&mut app, &conn, "Bike daily");
        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::NewGoal);
        assert!(app.input_error.is_some());
    }

    fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn focused_goal_scrolls_into_view() {
        let (conn, mut app) = setup();
        for i in 0..30 {
            let goal = NewGoal::parse(&format!("target {}", i), "Energy", None).unwrap();
            conn.add_goal("local", &goal).unwrap();
        }
        app.load(&conn).unwrap();

        press(&mut app, &conn, KeyCode::Tab);
        for _ in 0..25 {
            press(&mut app, &conn, KeyCode::Down);
        }
        assert_eq!(app.focus_idx, 25);

        let rows = render(&mut app, 120, 40);
        let focused_row = rows
            .iter()
            .find(|row| row.contains("target 25"))
            .expect("focused goal is drawn");
        assert!(focused_row.contains('▸'));

        let doomed = app.snapshot.goals[25].id;
        press(&mut app, &conn, KeyCode::Char('D'));
        assert_eq!(app.snapshot.goals.len(), 29);
        assert!(app.snapshot.goals.iter().all(|g| g.id != doomed));
        assert!(app.snapshot.goals.iter().all(|g| g.text != "target 25"));
    }

    #[test]
    fn goals_panel_shows_category_percent() {
        let (conn, mut app) = setup();
        for (text, category) in [("a", "Diet"), ("b", "Diet"), ("c", "Energy")] {
            let goal = NewGoal::parse(text, category, None).unwrap();
            conn.add_goal("local", &goal).unwrap();
        }
        let first = conn.fetch_goals("local").unwrap()[0].id;
        conn.toggle_goal("local", first).unwrap();
        app.load(&conn).unwrap();

        let rows = render(&mut app, 120, 40);
        let percents = rows
            .iter()
            .find(|row| row.contains("50%"))
            .expect("category row is drawn");
        assert!(percents.split("50%").nth(1).unwrap().contains(" 0%"));
        assert!(rows.iter().any(|row| row.contains("1/3 · 33%")));
    }

    #[test]
    fn popups_fit_short_terminals() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('c'));
        render(&mut app, 60, 4);

        type_str(&mut app, &conn, "Fixed a bike | lots");
        press(&mut app, &conn, KeyCode::Enter);
        assert!(app.input_error.is_some());
        render(&mut app, 60, 4);

        press(&mut app, &conn, KeyCode::Esc);
        press(&mut app, &conn, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        render(&mut app, 60, 4);
    }

    #[test]
    fn custom_input_naming_a_preset_stores_no_custom_co2() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('c'));
        type_str(&mut app, &conn, "biked to work | 99");
        press(&mut app, &conn, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.snapshot.activities[0].activity, "Biked to Work");
        assert_eq!(
            app.snapshot.activities[0].category.as_deref(),
            Some("Transportation")
        );
        assert!(conn.custom_emissions("local").unwrap().is_empty());
        assert!((app.snapshot.co2_saved_kg - 3.2).abs() < 1e-9);
    }

    #[test]
    fn views_and_quit() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('s'));
        assert_eq!(app.view, View::Stats);
        press(&mut app, &conn, KeyCode::Esc);
        assert_eq!(app.view, View::Dashboard);
        press(&mut app, &conn, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        press(&mut app, &conn, KeyCode::Char('?'));
        press(&mut app, &conn, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
