//! Panel 3: Help: keyboard shortcuts and what the figures mean.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "r", "Cycle chart range (1M → 6M → YTD → ALL)");
    key(&mut lines, "R", "Reload the feed");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Sectors");
    key(&mut lines, "h / j / k / l", "Move between sector cards");
    key(&mut lines, "Enter", "Open the sector's holdings");
    lines.push(Line::from(""));

    section(&mut lines, "Holdings overlay");
    key(&mut lines, "j / k", "Scroll holdings");
    key(&mut lines, "h / l", "Previous / next sector");
    key(&mut lines, "Esc", "Close");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Chart");
    key(&mut lines, "", "Normalized % performance of the Nikkei 225 and all sectors");
    key(&mut lines, "", "The magenta line marks the reference date");
    lines.push(Line::from(""));

    section(&mut lines, "Figures");
    key(
        &mut lines,
        "Since ref",
        &format!("Change since {} (税制改正), from history", app.dashboard.reference_date),
    );
    key(&mut lines, "1D", "Latest daily change reported by the feed");
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", "Colours"), theme::accent()),
        Span::styled("rise", theme::change(1.0)),
        Span::styled(" / ", theme::muted()),
        Span::styled("fall", theme::change(-1.0)),
        Span::styled(" (Tokyo convention)", theme::muted()),
    ]));
    lines.push(Line::from(""));

    section(&mut lines, "Feed");
    key(&mut lines, "Source", &app.source_label);

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
