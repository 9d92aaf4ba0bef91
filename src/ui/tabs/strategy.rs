use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
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

    render_item_list(frame, app, chunks[0]);
    render_item_detail(frame, app, chunks[1]);
}

fn render_item_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .strategy
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let line = Line::from(format!(
                " {:<30} {:>3}%  {}",
                truncate_string(&item.title, 30),
                item.progress_percent(),
                item.status.as_deref().unwrap_or("")
            ));

            let style = if i == app.strategy_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Strategy ({}) ", app.strategy.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.strategy_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let item = match app.strategy.get(app.strategy_selection) {
        Some(item) => item,
        None => {
            let block = Block::default()
                .title(" No Item Selected ")
                .borders(Borders::ALL)
                .border_style(styles::border_style(false));
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "Select a strategy item from the list",
                styles::muted_style(),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(styles::success_style())
        .percent(item.progress_percent());
    frame.render_widget(gauge, rows[0]);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status:   ", styles::highlight_style()),
            Span::raw(item.status.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", styles::highlight_style()),
            Span::raw(item.priority.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(""),
        Line::from(Span::styled("Tactics", styles::title_style())),
        Line::from(""),
    ];

    let tactics = item.tactic_lines();
    if tactics.is_empty() {
        lines.push(Line::from(Span::styled(
            "  None recorded",
            styles::muted_style(),
        )));
    } else {
        for tactic in tactics {
            lines.push(Line::from(format!("  • {}", tactic)));
        }
    }

    let block = Block::default()
        .title(format!(" {} ", item.title))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), rows[1]);
}
