use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_money, truncate_string};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_item_list(frame, app, chunks[0]);
    render_item_detail(frame, app, chunks[1]);
}

fn render_item_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .budget
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let over = if item.is_overspent() { "!" } else { " " };
            let line = Line::from(format!(
                " {}{:<20} {:>12} / {:>12}",
                over,
                truncate_string(&item.category, 20),
                format_money(item.spent),
                format_money(item.allocated),
            ));

            let style = if i == app.budget_selection {
                styles::selected_style()
            } else if item.is_overspent() {
                styles::error_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let total_allocated: f64 = app.budget.iter().map(|i| i.allocated).sum();
    let total_spent: f64 = app.budget.iter().map(|i| i.spent).sum();

    let block = Block::default()
        .title(format!(
            " Budget - {} of {} spent ",
            format_money(total_spent),
            format_money(total_allocated)
        ))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.budget_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.budget.get(app.budget_selection);

    let item = match selected {
        Some(item) => item,
        None => {
            let block = Block::default()
                .title(" No Item Selected ")
                .borders(Borders::ALL)
                .border_style(styles::border_style(false));
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "Select a budget item from the list",
                styles::muted_style(),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Description: ", styles::highlight_style()),
            Span::raw(item.description.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Allocated:   ", styles::highlight_style()),
            Span::raw(format_money(item.allocated)),
        ]),
        Line::from(vec![
            Span::styled("Spent:       ", styles::highlight_style()),
            Span::raw(format_money(item.spent)),
        ]),
        Line::from(vec![
            Span::styled("Remaining:   ", styles::highlight_style()),
            Span::styled(
                format_money(item.remaining()),
                if item.is_overspent() {
                    styles::error_style()
                } else {
                    styles::success_style()
                },
            ),
        ]),
        Line::from(vec![
            Span::styled("Status:      ", styles::highlight_style()),
            Span::raw(item.status.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Priority:    ", styles::highlight_style()),
            Span::raw(item.priority.clone().unwrap_or_else(|| "-".to_string())),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", item.category))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), rows[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Spent "))
        .gauge_style(if item.is_overspent() {
            styles::error_style()
        } else {
            styles::success_style()
        })
        .percent(item.spent_percent());
    frame.render_widget(gauge, rows[1]);
}
