//! Neon-on-charcoal palette and the style helpers the panels draw with.
//!
//! Price moves follow the Tokyo board convention: rises are red, falls are
//! green.

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const ERROR: Color = Color::Rgb(255, 20, 147);
pub const TEXT: Color = Color::White;

/// Price rose.
pub const RISE: Color = Color::Rgb(255, 68, 68);
/// Price fell.
pub const FALL: Color = Color::Rgb(0, 255, 128);

/// Chart line colour for a series key.
pub fn series_color(key: &str) -> Color {
    match key {
        "Nikkei225" => Color::Rgb(255, 68, 68),
        "AI_Robot" => Color::Rgb(0, 212, 255),
        "Semi" => Color::Rgb(0, 255, 136),
        "Bio" => Color::Rgb(255, 0, 170),
        "Quantum" => Color::Rgb(170, 0, 255),
        "Fusion" => Color::Rgb(255, 170, 0),
        "Space" => Color::White,
        _ => Color::Rgb(170, 170, 170),
    }
}

/// Colour for a percent change. Zero and non-finite values stay neutral.
pub fn change_color(value: f64) -> Color {
    if !value.is_finite() || value == 0.0 {
        TEXT
    } else if value > 0.0 {
        RISE
    } else {
        FALL
    }
}

pub fn change(value: f64) -> Style {
    Style::default().fg(change_color(value))
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(ERROR)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn marker() -> Style {
    Style::default().fg(MAGENTA)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Highlight for the selected card or row.
pub fn selected() -> Style {
    Style::default()
        .fg(BACKGROUND)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}
