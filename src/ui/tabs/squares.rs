use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::format_phone;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_square_list(frame, app, chunks[0]);
    render_square_detail(frame, app, chunks[1]);
}

fn render_square_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .squares
        .iter()
        .enumerate()
        .map(|(i, square)| {
            let done = if square.is_fully_surveyed() { "✓" } else { " " };
            let line = Line::from(format!(
                " {} {:<12} surveyed {}",
                done,
                square.display_name(),
                square.progress_display()
            ));

            let style = if i == app.squares_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Residential Squares ({}) ", app.squares.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.squares_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Exact count from the per-square fetch when it has landed, otherwise the
/// count seen in the recent-entries window.
fn census_count_display(app: &App, square_id: &str) -> String {
    match app.square_census.as_ref() {
        Some((id, rows)) if id == square_id => rows.len().to_string(),
        _ => app.census_count_for_square(square_id).to_string(),
    }
}

fn render_square_detail(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.squares.get(app.squares_selection);

    let (title, content) = match selected {
        Some(square) => {
            let title = format!(" {} ", square.display_name());

            let district = square
                .district_id
                .as_deref()
                .and_then(|id| app.districts.iter().find(|d| d.id == id))
                .map(|d| d.display_name())
                .unwrap_or_else(|| "No district".to_string());

            let rep_profile = square
                .assigned_representative_id
                .as_deref()
                .and_then(|id| app.representatives.iter().find(|p| p.id == id));
            let rep = rep_profile
                .map(|p| p.full_name.as_str())
                .unwrap_or("Unassigned");
            let rep_phone = rep_profile
                .and_then(|p| p.phone.as_deref())
                .map(format_phone)
                .unwrap_or_else(|| "-".to_string());

            let mut lines = vec![
                Line::from(vec![
                    Span::styled("District:       ", styles::highlight_style()),
                    Span::raw(district),
                ]),
                Line::from(vec![
                    Span::styled("Representative: ", styles::highlight_style()),
                    Span::raw(rep.to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Phone:          ", styles::highlight_style()),
                    Span::raw(rep_phone),
                ]),
                Line::from(vec![
                    Span::styled("Progress:       ", styles::highlight_style()),
                    Span::raw(format!(
                        "{} buildings surveyed, {} remaining",
                        square.surveyed_buildings.unwrap_or(0),
                        square.remaining_buildings()
                    )),
                ]),
                Line::from(vec![
                    Span::styled("Census entries: ", styles::highlight_style()),
                    Span::raw(census_count_display(app, &square.id)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Building codes ({})", square.building_codes.len()),
                    styles::title_style(),
                )),
                Line::from(""),
            ];

            if square.building_codes.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  No building codes recorded",
                    styles::muted_style(),
                )));
            } else {
                for chunk in square.building_codes.chunks(6) {
                    lines.push(Line::from(format!("  {}", chunk.join("  "))));
                }
            }

            // Latest households from the per-square fetch
            if let Some((id, rows)) = app.square_census.as_ref() {
                if id == &square.id && !rows.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Recent households",
                        styles::title_style(),
                    )));
                    lines.push(Line::from(""));
                    for record in rows.iter().take(5) {
                        lines.push(Line::from(format!(
                            "  {:<8} {}",
                            record.building_code, record.head_of_household
                        )));
                    }
                }
            }

            (title, lines)
        }
        None => (
            " No Square Selected ".to_string(),
            vec![Line::from(Span::styled(
                "Select a square from the list",
                styles::muted_style(),
            ))],
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}
