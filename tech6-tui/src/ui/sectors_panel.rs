//! Panel 1: Sectors: header with the Nikkei badge and a grid of sector cards.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tech6_core::{format_change, format_yen, SectorCard};

use crate::app::{AppState, GRID_COLS};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_header(f, chunks[0], app);
    render_grid(f, chunks[1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let dash = &app.dashboard;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("JAPAN TECH 6", theme::accent_bold()),
        Span::styled("  National Strategic Sectors", theme::muted()),
    ]));

    let nikkei = match &dash.nikkei {
        Some(badge) => vec![
            Span::styled("NIKKEI 225  ", theme::muted()),
            Span::styled(format_yen(badge.price), theme::text().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format_change(badge.change_since_reference),
                theme::change(badge.change_since_reference),
            ),
            Span::styled(format!(" since {}", dash.reference_date), theme::muted()),
        ],
        None => vec![
            Span::styled("NIKKEI 225  ", theme::muted()),
            Span::styled("---", theme::muted()),
        ],
    };
    lines.push(Line::from(nikkei));

    let updated = dash.last_updated_display();
    lines.push(Line::from(vec![
        Span::styled("Last Updated: ", theme::muted()),
        Span::styled(
            if updated.is_empty() { "-".to_string() } else { updated },
            theme::neutral(),
        ),
        Span::styled("   Reference: ", theme::muted()),
        Span::styled(format!("{} 税制改正", dash.reference_date), theme::marker()),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_grid(f: &mut Frame, area: Rect, app: &AppState) {
    let cards = &app.dashboard.cards;
    if cards.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No sectors configured.", theme::muted())),
            area,
        );
        return;
    }

    let rows = cards.len().div_ceil(GRID_COLS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (r, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS])
            .split(*row_area);

        for (c, cell) in cells.iter().enumerate() {
            let idx = r * GRID_COLS + c;
            if let Some(card) = cards.get(idx) {
                render_card(f, *cell, card, &app.dashboard.reference_date, idx == app.cursor);
            }
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &SectorCard, reference_date: &str, selected: bool) {
    let title_style = if selected {
        theme::selected()
    } else {
        theme::accent_bold()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(selected))
        .title(Span::styled(format!(" {} {} ", card.icon, card.name), title_style));

    let change = card.change_since_reference;
    let lines = vec![
        Line::from(Span::styled(
            format_change(change),
            theme::change(change).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("since {reference_date}"), theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("1D ", theme::muted()),
            Span::styled(format_change(card.daily_change), theme::change(card.daily_change)),
        ]),
        Line::from(vec![
            Span::styled(format!("{} holdings", card.holdings.len()), theme::muted()),
            Span::styled(if selected { "  [Enter]" } else { "" }, theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
