//! Panel 2: Chart: normalized performance of every series over the selected
//! range, with a vertical marker at the reference date.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use tech6_core::change::reference_index;
use tech6_core::{Snapshot, TimeRange, NIKKEI_KEY};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_range_tabs(f, chunks[0], app.range);

    let today = chrono::Local::now().date_naive();
    let rows = app.dashboard.chart_history(app.range, today);
    if rows.is_empty() {
        render_empty(f, chunks[1], app.range);
    } else {
        render_chart(f, chunks[1], app, &rows);
    }
}

fn render_range_tabs(f: &mut Frame, area: Rect, current: TimeRange) {
    let mut spans = vec![Span::styled("Range: ", theme::muted())];
    for range in TimeRange::ALL_RANGES {
        let style = if range == current {
            theme::selected()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {} ", range.tag()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("  [r]cycle", theme::muted()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_empty(f: &mut Frame, area: Rect, range: TimeRange) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("No history in range {range}."),
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to widen the range or R to reload the feed.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState, rows: &[&Snapshot]) {
    let keys: Vec<(&str, &str)> = std::iter::once((NIKKEI_KEY, "日経225"))
        .chain(
            app.catalog
                .sectors
                .iter()
                .map(|s| (s.key.as_str(), s.name.as_str())),
        )
        .collect();

    let series: Vec<Vec<(f64, f64)>> = keys.iter().map(|(key, _)| points(rows, key)).collect();

    let Some((y_min, y_max)) = y_bounds(&series) else {
        render_empty(f, area, app.range);
        return;
    };
    let x_max = (rows.len().saturating_sub(1) as f64).max(1.0);

    let marker: Vec<(f64, f64)> = match marker_position(rows, &app.dashboard.reference_date) {
        Some(idx) => {
            let x = idx as f64;
            let steps = 40;
            (0..=steps)
                .map(|i| (x, y_min + (y_max - y_min) * i as f64 / steps as f64))
                .collect()
        }
        None => Vec::new(),
    };

    let mut datasets: Vec<Dataset> = keys
        .iter()
        .zip(series.iter())
        .filter(|(_, data)| !data.is_empty())
        .map(|((key, label), data)| {
            Dataset::default()
                .name(*label)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(key)))
                .graph_type(GraphType::Line)
                .data(data)
        })
        .collect();

    if !marker.is_empty() {
        datasets.push(
            Dataset::default()
                .name("税制改正")
                .marker(symbols::Marker::Dot)
                .style(theme::marker())
                .graph_type(GraphType::Scatter)
                .data(&marker),
        );
    }

    let first = rows.first().map(|s| short_date(&s.date)).unwrap_or_default();
    let middle = rows.get(rows.len() / 2).map(|s| short_date(&s.date)).unwrap_or_default();
    let last = rows.last().map(|s| short_date(&s.date)).unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(middle, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("%", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}%"), theme::muted()),
                    Span::styled(format!("{:.0}%", (y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(format!("{y_max:.0}%"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// (index, value) pairs for one key; rows without the key are skipped.
fn points(rows: &[&Snapshot], key: &str) -> Vec<(f64, f64)> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, s)| s.value(key).filter(|v| v.is_finite()).map(|v| (i as f64, v)))
        .collect()
}

/// Padded y range across all series, or None when nothing is plottable.
fn y_bounds(series: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    let (min, max) = series
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let padding = ((max - min).abs() * 0.05).max(1.0);
    Some((min - padding, max + padding))
}

/// Row where the reference marker goes: the first row on or after the
/// reference date, as long as the window actually contains that date.
fn marker_position(rows: &[&Snapshot], reference_date: &str) -> Option<usize> {
    let idx = reference_index(rows, reference_date)?;
    if idx == 0 && !rows[0].date.starts_with(reference_date) {
        return None;
    }
    Some(idx)
}

/// `2025-11-26` → `11/26`.
fn short_date(date: &str) -> String {
    date.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.format("%-m/%-d").to_string())
        .unwrap_or_else(|| date.to_string())
}
