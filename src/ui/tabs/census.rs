use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, CensusFocus};
use crate::forms::CensusField;
use crate::ui::styles;
use crate::utils::truncate_string;

const FIELDS: [CensusField; 6] = [
    CensusField::ApartmentNumber,
    CensusField::HeadOfHousehold,
    CensusField::PhoneNumber,
    CensusField::VotersWithCards,
    CensusField::VotersWithoutCards,
    CensusField::Notes,
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_location_selectors(frame, app, chunks[0]);
    render_form(frame, app, chunks[1]);
}

fn render_location_selectors(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_district_list(frame, app, rows[0]);
    render_square_list(frame, app, rows[1]);
    render_building_list(frame, app, rows[2]);
}

fn render_district_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .districts
        .iter()
        .enumerate()
        .map(|(i, district)| {
            let picked = app.census_form.district_id.as_deref() == Some(district.id.as_str());
            let marker = if picked { "●" } else { " " };
            let line = Line::from(format!(
                " {} {}",
                marker,
                truncate_string(&district.display_name(), 30)
            ));
            let style = if i == app.census_district_selection
                && app.census_focus == CensusFocus::Districts
            {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let focused = app.census_focus == CensusFocus::Districts;
    let block = Block::default()
        .title(" 1. District ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.census_district_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_square_list(frame: &mut Frame, app: &App, area: Rect) {
    let squares = app.census_squares();

    let items: Vec<ListItem> = squares
        .iter()
        .enumerate()
        .map(|(i, square)| {
            let picked = app.census_form.square_id.as_deref() == Some(square.id.as_str());
            let marker = if picked { "●" } else { " " };
            let line = Line::from(format!(
                " {} {} ({} codes)",
                marker,
                square.display_name(),
                square.building_codes.len()
            ));
            let style =
                if i == app.census_square_selection && app.census_focus == CensusFocus::Squares {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };
            ListItem::new(line).style(style)
        })
        .collect();

    let focused = app.census_focus == CensusFocus::Squares;
    let title = if app.census_form.district_id.is_some() {
        format!(" 2. Square ({}) ", squares.len())
    } else {
        " 2. Square (pick a district first) ".to_string()
    };
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.census_square_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_building_list(frame: &mut Frame, app: &App, area: Rect) {
    let codes = app.census_form.available_buildings();

    let items: Vec<ListItem> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let picked = app.census_form.building_code.as_deref() == Some(code.as_str());
            let marker = if picked { "●" } else { " " };
            let line = Line::from(format!(" {} {}", marker, code));
            let style = if i == app.census_building_selection
                && app.census_focus == CensusFocus::Buildings
            {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let focused = app.census_focus == CensusFocus::Buildings;
    let title = if app.census_form.square_id.is_some() {
        format!(" 3. Building ({}) ", codes.len())
    } else {
        " 3. Building (pick a square first) ".to_string()
    };
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.census_building_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.census_form;
    let focused = app.census_focus == CensusFocus::Fields;

    let mut lines = vec![Line::from("")];

    for field in FIELDS {
        let active = focused && form.active_field == Some(field);
        let value = form.field_value(field);
        let cursor = if active { "▌" } else { "" };
        let value_style = if active {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<22}", field.label()), styles::muted_style()),
            Span::styled(format!("{}{}", value, cursor), value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Total potential voters  ", styles::muted_style()),
        Span::styled(
            form.total_potential_voters().to_string(),
            styles::highlight_style(),
        ),
    ]));
    lines.push(Line::from(""));

    if form.ready_to_submit() {
        lines.push(Line::from(Span::styled(
            "  Ready - press [s] to submit",
            styles::success_style(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Required: district, square, building, head of household, card counts",
            styles::muted_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Tab: next pane | Enter: pick / next field | s: submit",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(" Household Survey ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
