use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_date, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_summary(frame, app, chunks[0]);
    render_recent_census(frame, app, chunks[1]);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let surveyed_squares = app
        .squares
        .iter()
        .filter(|s| s.is_fully_surveyed())
        .count();
    let assigned_buildings = app
        .buildings
        .iter()
        .filter(|b| b.is_assigned())
        .count();

    let lines = vec![
        Line::from(""),
        stat_line("Districts", app.districts.len().to_string()),
        stat_line("Residential squares", app.squares.len().to_string()),
        stat_line(
            "Squares fully surveyed",
            format!("{}/{}", surveyed_squares, app.squares.len()),
        ),
        stat_line("Buildings (total)", app.buildings_total.to_string()),
        stat_line(
            "Assigned on this page",
            format!("{}/{}", assigned_buildings, app.buildings.len()),
        ),
        stat_line("Representatives", app.representatives.len().to_string()),
        Line::from(""),
        stat_line("Census entries loaded", app.census.len().to_string()),
        stat_line(
            "Potential voters recorded",
            app.total_potential_voters().to_string(),
        ),
    ];

    let block = Block::default()
        .title(" Campaign Summary ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<26}", label), styles::muted_style()),
        Span::styled(value, styles::highlight_style()),
    ])
}

fn render_recent_census(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from("")];

    if app.census.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No census entries yet",
            styles::muted_style(),
        )));
    }

    let visible = area.height.saturating_sub(3) as usize;
    for record in app.census.iter().take(visible) {
        let date = record
            .surveyed_at
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", date), styles::muted_style()),
            Span::raw(format!(
                "{:<24} {:<8} {}",
                truncate_string(&record.head_of_household, 24),
                record.building_code,
                record.card_summary(),
            )),
        ]));
    }

    let block = Block::default()
        .title(format!(" Recent Census Entries ({}) ", app.census.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
