use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, AssignmentFocus, BUILDINGS_PAGE_SIZE};
use crate::assignment::MAX_BUILDINGS_PER_REP;
use crate::ui::styles;
use crate::utils::truncate_string;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_representatives(frame, app, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_building_picker(frame, app, right[0]);
    render_buildings_page(frame, app, right[1]);
}

fn render_representatives(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .representatives
        .iter()
        .enumerate()
        .map(|(i, rep)| {
            let holdings = if i == app.rep_selection {
                match app.selected_rep_holdings {
                    Some(count) => format!("{}/{}", count, MAX_BUILDINGS_PER_REP),
                    None => "…".to_string(),
                }
            } else {
                String::new()
            };
            let line = Line::from(format!(
                " {:<26} {}",
                truncate_string(&rep.full_name, 26),
                holdings
            ));

            let style = if i == app.rep_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let focused = app.assignment_focus == AssignmentFocus::Representatives;
    let block = Block::default()
        .title(format!(" Representatives ({}) ", app.representatives.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.rep_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_building_picker(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .unassigned_buildings
        .iter()
        .enumerate()
        .map(|(i, building)| {
            let ticked = app.selected_building_ids.contains(&building.id);
            let marker = if ticked { "[x]" } else { "[ ]" };
            let address = building.address.as_deref().unwrap_or("No address");
            let line = Line::from(format!(
                " {} #{:<6} {}",
                marker,
                building.building_number,
                truncate_string(address, 34)
            ));

            let style = if i == app.building_selection
                && app.assignment_focus == AssignmentFocus::Buildings
            {
                styles::selected_style()
            } else if ticked {
                styles::success_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let focused = app.assignment_focus == AssignmentFocus::Buildings;
    let block = Block::default()
        .title(format!(
            " Unassigned Buildings ({}) - {} ticked ",
            app.unassigned_buildings.len(),
            app.selected_building_ids.len()
        ))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.building_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_buildings_page(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.buildings_offset / BUILDINGS_PAGE_SIZE + 1;
    let pages = app.buildings_total.div_ceil(BUILDINGS_PAGE_SIZE).max(1);
    let focused = app.assignment_focus == AssignmentFocus::AllBuildings;

    let items: Vec<ListItem> = app
        .buildings
        .iter()
        .enumerate()
        .map(|(i, building)| {
            let rep = building
                .assigned_representative_id
                .as_deref()
                .and_then(|id| app.representative_name(id))
                .unwrap_or("-");
            let line = Line::from(vec![
                Span::raw(format!(
                    " #{:<6} {:<26} {:<6}",
                    building.building_number,
                    truncate_string(building.address.as_deref().unwrap_or(""), 26),
                    building.progress_display(),
                )),
                Span::styled(rep.to_string(), styles::muted_style()),
            ]);

            let style = if focused && i == app.all_buildings_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(
            " All Buildings - page {}/{} of {} ([n]/[p] page, [s] assign, [x] release) ",
            page, pages, app.buildings_total
        ))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.all_buildings_selection));

    frame.render_stateful_widget(list, area, &mut state);
}
