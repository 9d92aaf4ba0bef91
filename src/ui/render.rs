use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, Tab};
use crate::auth::Access;

use super::styles;
use super::tabs::{assignments, budget, census, districts, overview, squares, strategy, team};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::Editing) {
        render_editor_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Canvass";
    let who = match app.profile.as_ref() {
        Some(p) => format!("{} ({})", p.full_name, p.role().display_name()),
        None => app
            .session
            .data
            .as_ref()
            .map(|d| d.email.clone())
            .unwrap_or_else(|| "not signed in".to_string()),
    };
    let help_hint = format!("{}  [?] Help", who);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.len() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let is_admin = matches!(app.admin_access(), Access::Granted);

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let lock = if tab.admin_only() && !is_admin { "*" } else { "" };
        let label = format!("[{}] {}{}", i + 1, tab.title(), lock);
        if *tab == app.current_tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else if tab.admin_only() && !is_admin {
            spans.push(Span::styled(label, styles::muted_style()));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    let line = Line::from(spans);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    // Admin tabs render nothing until access is settled, and are never shown
    // to non-admins even if the tab state slipped through.
    if app.current_tab.admin_only() {
        match app.admin_access() {
            Access::Granted => {}
            Access::Pending => {
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    "  Checking permissions...",
                    styles::muted_style(),
                )));
                frame.render_widget(paragraph, area);
                return;
            }
            Access::Denied { notice } => {
                let paragraph = Paragraph::new(Line::from(Span::styled(
                    format!("  {}", notice),
                    styles::error_style(),
                )));
                frame.render_widget(paragraph, area);
                return;
            }
        }
    }

    match app.current_tab {
        Tab::Overview => overview::render(frame, app, area),
        Tab::Census => census::render(frame, app, area),
        Tab::Squares => squares::render(frame, app, area),
        Tab::Assignments => assignments::render(frame, app, area),
        Tab::Districts => districts::render(frame, app, area),
        Tab::Budget => budget::render(frame, app, area),
        Tab::Team => team::render(frame, app, area),
        Tab::Strategy => strategy::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let last_updated = app.cache_ages.last_updated();
    let shortcuts = "[u]pdate | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        format!(" Updated {} ", last_updated)
    };

    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let area = centered_rect_fixed(52, 29, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            "     ╔═╗╔═╗╔╗╔╦  ╦╔═╗╔═╗╔═╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "     ║  ╠═╣║║║╚╗╔╝╠═╣╚═╗╚═╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "     ╚═╝╩ ╩╝╚╝ ╚╝ ╩ ╩╚═╝╚═╝",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("          version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1-8       ", styles::help_key_style()),
            Span::styled("Switch tabs (* needs admin)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ←/→       ", styles::help_key_style()),
            Span::styled("Prev/next tab", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓       ", styles::help_key_style()),
            Span::styled("Navigate list", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", styles::help_key_style()),
            Span::styled("Switch pane focus", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", styles::help_key_style()),
            Span::styled("Select / confirm", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  Space     ", styles::help_key_style()),
            Span::styled("Tick building in assignment picker", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  s         ", styles::help_key_style()),
            Span::styled("Submit census entry / assignment", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  n/p       ", styles::help_key_style()),
            Span::styled("Next/previous buildings page", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  x         ", styles::help_key_style()),
            Span::styled("Release building (all buildings pane)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  a         ", styles::help_key_style()),
            Span::styled("Add item on admin tabs", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  d d       ", styles::help_key_style()),
            Span::styled("Delete selected item (press twice)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  +/-       ", styles::help_key_style()),
            Span::styled("Adjust strategy progress", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  u         ", styles::help_key_style()),
            Span::styled("Update data from server", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  l         ", styles::help_key_style()),
            Span::styled("Log out", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(48, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        "       ╔═╗╔═╗╔╗╔╦  ╦╔═╗╔═╗╔═╗",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "       ║  ╠═╣║║║╚╗╔╝╠═╣╚═╗╚═╗",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "       ╚═╝╩ ╩╝╚╝ ╚╝ ╩ ╩╚═╝╚═╝",
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    let username_focused = app.login_focus == LoginFocus::Username;
    let username_style = if username_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let username_display = format!("{:<24}", app.login_username);
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(format!("{}{}", username_display, cursor), username_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_masked: String = "*".repeat(app.login_password.len().min(24));
    let password_display = format!("{:<24}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("             ["),
            Span::styled(" ▶ Login ◀ ", button_style),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("             ["),
            Span::styled("   Login   ", button_style),
            Span::raw("]"),
        ]));
    }

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

fn render_editor_overlay(frame: &mut Frame, app: &App) {
    let form = match app.editor.as_ref() {
        Some(form) => form,
        None => return,
    };

    let height = form.fields.len() as u16 + 5;
    let area = centered_rect_fixed(54, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.active;
        let value_style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let marker = if field.required { "*" } else { " " };
        let value_display = format!("{:<28}", field.value);
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{}{:<16}[", marker, field.label),
                styles::muted_style(),
            ),
            Span::styled(format!("{}{}", value_display, cursor), value_style),
            Span::styled("]", styles::muted_style()),
        ]));
    }

    lines.push(Line::from(""));
    let hint = if form.ready() {
        Line::from(Span::styled(
            " Enter on the last field saves, Esc cancels",
            styles::muted_style(),
        ))
    } else {
        Line::from(Span::styled(
            " Fields marked * are required",
            styles::error_style(),
        ))
    };
    lines.push(hint);

    let block = Block::default()
        .title(form.title)
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 9, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "      ╔═╗╔═╗╔╗╔╦  ╦╔═╗╔═╗╔═╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "      ║  ╠═╣║║║╚╗╔╝╠═╣╚═╗╚═╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "      ╚═╝╩ ╩╝╚╝ ╚╝ ╩ ╩╚═╝╚═╝",
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
