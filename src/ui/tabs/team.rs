use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_optional, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_member_list(frame, app, chunks[0]);
    render_member_detail(frame, app, chunks[1]);
}

fn render_member_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .team
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let line = Line::from(format!(
                " {:<24} {}",
                truncate_string(&member.name, 24),
                truncate_string(&member.role, 20)
            ));

            let style = if i == app.team_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Team ({}) ", app.team.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.team_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_member_detail(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.team.get(app.team_selection);

    let (title, content) = match selected {
        Some(member) => {
            let title = format!(" {} ", member.name);

            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Role:      ", styles::highlight_style()),
                    Span::raw(member.role.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Team type: ", styles::highlight_style()),
                    Span::raw(format_optional(&member.team_type, "-")),
                ]),
                Line::from(vec![
                    Span::styled("Status:    ", styles::highlight_style()),
                    Span::raw(format_optional(&member.status, "-")),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Responsibilities ({})", member.responsibilities.len()),
                    styles::title_style(),
                )),
                Line::from(""),
            ];

            if member.responsibilities.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  None recorded",
                    styles::muted_style(),
                )));
            } else {
                for resp in &member.responsibilities {
                    lines.push(Line::from(format!("  • {}", resp)));
                }
            }

            (title, lines)
        }
        None => (
            " No Member Selected ".to_string(),
            vec![Line::from(Span::styled(
                "Select a team member from the list",
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
