//! Overlay widgets: welcome, sector holdings, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tech6_core::{format_change, format_yen, Holding, SectorCatalog};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Placeholder for a quote the feed did not supply.
const NO_QUOTE: &str = "---";

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to JAPAN TECH 6 ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Each card shows a sector's change since the reference date",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Move with h/j/k/l and press Enter for holdings",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press 2 for the trend chart, r to change its range",
            theme::muted(),
        )),
        Line::from(Span::styled("  4. Press R to reload the feed", theme::muted())),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Holdings of one sector: name, ticker, change, price and quote link.
pub fn render_holdings(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(80, 80, area);
    f.render_widget(Clear, popup);

    let Some(card) = app.dashboard.cards.get(idx) else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::accent())
            .title(" Holdings [Esc]close ");
        let para = Paragraph::new(Span::styled("Sector not found.", theme::muted())).block(block);
        f.render_widget(para, popup);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(Line::from(vec![
            Span::styled(format!(" {} {} ", card.icon, card.name), theme::accent_bold()),
            Span::styled(
                format_change(card.change_since_reference),
                theme::change(card.change_since_reference),
            ),
            Span::styled(" [Esc]close [j/k]scroll [h/l]sector ", theme::muted()),
        ]));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if card.holdings.is_empty() {
        let text = Paragraph::new(Span::styled("No holdings in the feed.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    // Two lines per holding.
    let visible = (inner.height as usize / 2).max(1);
    let start = app.holdings_scroll.min(card.holdings.len().saturating_sub(1));
    let end = (start + visible).min(card.holdings.len());

    let mut lines: Vec<Line> = Vec::new();
    for holding in &card.holdings[start..end] {
        let row = HoldingRow::new(holding, &app.catalog);
        let change_style = match holding.change {
            Some(c) if holding.has_quote() => theme::change(c),
            _ => theme::muted(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", row.ticker), theme::accent()),
            Span::styled(format!("{:>10}", row.change), change_style),
            Span::styled(format!("{:>14}  ", row.price), theme::text()),
            Span::styled(row.name, theme::text().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(format!("        {}", row.link), theme::muted())));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Display strings for one holding.
#[derive(Debug, PartialEq)]
struct HoldingRow {
    name: String,
    ticker: String,
    change: String,
    price: String,
    link: String,
}

impl HoldingRow {
    fn new(holding: &Holding, catalog: &SectorCatalog) -> Self {
        // Without a price the quote is treated as missing altogether.
        let (change, price) = match holding.price {
            Some(price) => (
                holding.change.map(format_change).unwrap_or_else(|| NO_QUOTE.into()),
                format_yen(price),
            ),
            None => (NO_QUOTE.into(), NO_QUOTE.into()),
        };
        Self {
            name: catalog.display_name(&holding.ticker).to_string(),
            ticker: holding.ticker.clone(),
            change,
            price,
            link: SectorCatalog::quote_url(&holding.ticker),
        }
    }
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme::muted()),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_holding() {
        let catalog = SectorCatalog::default_jp();
        let holding = Holding {
            ticker: "8035.T".into(),
            change: Some(-1.5),
            price: Some(38_500.0),
        };
        let row = HoldingRow::new(&holding, &catalog);
        assert_eq!(row.name, "東京エレクトロン");
        assert_eq!(row.change, "-1.50%");
        assert_eq!(row.price, "¥38,500");
        assert_eq!(row.link, "https://finance.yahoo.co.jp/quote/8035.T");
    }

    #[test]
    fn bare_ticker_shows_placeholders() {
        let catalog = SectorCatalog::default_jp();
        let holding = Holding {
            ticker: "9999.T".into(),
            change: None,
            price: None,
        };
        let row = HoldingRow::new(&holding, &catalog);
        assert_eq!(row.name, "9999.T");
        assert_eq!(row.change, "---");
        assert_eq!(row.price, "---");
    }

    #[test]
    fn change_without_price_is_hidden() {
        let catalog = SectorCatalog::default_jp();
        let holding = Holding {
            ticker: "6954.T".into(),
            change: Some(2.0),
            price: None,
        };
        assert_eq!(HoldingRow::new(&holding, &catalog).change, "---");
    }
}
