use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate_string;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_district_list(frame, app, chunks[0]);
    render_district_detail(frame, app, chunks[1]);
}

fn render_district_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .districts
        .iter()
        .enumerate()
        .map(|(i, district)| {
            let line = Line::from(format!(
                " {:<34} {}",
                truncate_string(&district.display_name(), 34),
                district.priority_level.as_deref().unwrap_or("")
            ));

            let style = if i == app.districts_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Districts ({}) ", app.districts.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.districts_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_district_detail(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.districts.get(app.districts_selection);

    let (title, content) = match selected {
        Some(district) => {
            let title = format!(" {} ", district.display_name());

            let squares: Vec<_> = app
                .squares
                .iter()
                .filter(|s| s.district_id.as_deref() == Some(district.id.as_str()))
                .collect();
            let surveyed = squares.iter().filter(|s| s.is_fully_surveyed()).count();

            let lines = vec![
                Line::from(vec![
                    Span::styled("Coordinator: ", styles::highlight_style()),
                    Span::raw(district.coordinator_display().to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Target votes: ", styles::highlight_style()),
                    Span::raw(
                        district
                            .target_votes
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Priority: ", styles::highlight_style()),
                    Span::raw(district.priority_level.clone().unwrap_or_else(|| "-".to_string())),
                ]),
                Line::from(vec![
                    Span::styled("Status: ", styles::highlight_style()),
                    Span::raw(district.status.clone().unwrap_or_else(|| "-".to_string())),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Squares: ", styles::highlight_style()),
                    Span::raw(format!("{} ({} fully surveyed)", squares.len(), surveyed)),
                ]),
            ];

            (title, lines)
        }
        None => (
            " No District Selected ".to_string(),
            vec![Line::from(Span::styled(
                "Select a district from the list",
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
