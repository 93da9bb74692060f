use unicode_width::UnicodeWidthStr;

/// Format kilograms of CO₂ with one decimal place
pub fn format_kg(kg: f64) -> String {
    format!("{:.1} kg", kg)
}

/// "1 day", "3 days"
pub fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Format a percentage, dropping a trailing ".0"
pub fn format_percent(p: f64) -> String {
    if p == p.floor() {
        format!("{}%", p as i64)
    } else {
        format!("{:.1}%", p)
    }
}

/// Create a simple ASCII progress bar from a ratio in [0, 1]
pub fn ratio_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    ratio_bar(filled as f64 / total as f64, width)
}

/// Left-align to a display width; emoji count as two columns.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
