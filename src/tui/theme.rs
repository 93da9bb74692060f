use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 20, 16);
pub const SURFACE: Color = Color::Rgb(22, 31, 25);
pub const BORDER: Color = Color::Rgb(44, 66, 50);
pub const TEXT: Color = Color::Rgb(220, 232, 214);
pub const TEXT_DIM: Color = Color::Rgb(112, 136, 116);
pub const LEAF: Color = Color::Rgb(120, 190, 110);
pub const GREEN: Color = Color::Rgb(72, 170, 96);
pub const AMBER: Color = Color::Rgb(214, 160, 64);
pub const RED: Color = Color::Rgb(196, 86, 70);
pub const SKY: Color = Color::Rgb(96, 165, 250);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn leaf() -> Style {
    Style::default().fg(LEAF)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn sky() -> Style {
    Style::default().fg(SKY)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        leaf()
    } else {
        Style::default().fg(BORDER)
    }
}
