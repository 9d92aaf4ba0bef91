//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_password_char, can_add_username_char, App, AppState, AssignmentFocus, CensusFocus,
    LoginFocus, Tab, PAGE_SCROLL_SIZE,
};
use crate::forms::CensusField;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    // Handle the add-item editor overlay
    if matches!(app.state, AppState::Editing) {
        handle_editor_input(app, key);
        return Ok(false);
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // When the census form fields have focus, printable keys are text input
    // and must not trigger global shortcuts.
    if app.current_tab == Tab::Census && app.census_focus == CensusFocus::Fields {
        return handle_census_field_input(app, key);
    }

    // Any key other than a repeat 'd' disarms a pending delete
    if key.code != KeyCode::Char('d') {
        app.clear_pending_delete();
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as usize - '1' as usize;
            app.select_tab(Tab::ALL[index]);
        }
        KeyCode::Left => {
            app.select_tab(app.current_tab.prev());
        }
        KeyCode::Right => {
            app.select_tab(app.current_tab.next());
        }
        KeyCode::Char('u') => {
            app.refresh_all_background();
        }
        KeyCode::Char('l') => {
            app.sign_out();
        }
        KeyCode::Esc => {
            app.status_message = None;
        }
        _ => {
            // Tab-specific input
            match app.current_tab {
                Tab::Overview => {}
                Tab::Census => handle_census_input(app, key),
                Tab::Squares => {
                    let before = app.squares_selection;
                    move_selection(&mut app.squares_selection, app.squares.len(), key);
                    if app.squares_selection != before {
                        app.on_square_selected();
                    }
                }
                Tab::Assignments => handle_assignments_input(app, key),
                Tab::Districts | Tab::Budget | Tab::Team | Tab::Strategy => {
                    handle_admin_list_input(app, key)
                }
            }
        }
    }

    Ok(false)
}

/// Generic up/down/page movement for a single-list tab.
fn move_selection(selection: &mut usize, len: usize, key: KeyEvent) {
    let max_index = len.saturating_sub(1);
    match key.code {
        KeyCode::Up => *selection = selection.saturating_sub(1),
        KeyCode::Down => *selection = (*selection + 1).min(max_index),
        KeyCode::PageUp => *selection = selection.saturating_sub(PAGE_SCROLL_SIZE),
        KeyCode::PageDown => *selection = (*selection + PAGE_SCROLL_SIZE).min(max_index),
        KeyCode::Home => *selection = 0,
        KeyCode::End => *selection = max_index,
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password => {
                app.login_focus = LoginFocus::Button;
            }
            LoginFocus::Button => {
                let _ = app.attempt_login().await;
                // If successful, state is Normal and login_error is unset
                if app.state == AppState::Normal {
                    app.refresh_all_background();
                }
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

// =============================================================================
// Add-item editor overlay
// =============================================================================

fn handle_editor_input(app: &mut App, key: KeyEvent) {
    let form = match app.editor.as_mut() {
        Some(form) => form,
        None => {
            app.state = AppState::Normal;
            return;
        }
    };

    match key.code {
        KeyCode::Esc => {
            app.cancel_editor();
        }
        KeyCode::Tab | KeyCode::Down => {
            form.next_field();
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.prev_field();
        }
        KeyCode::Enter => {
            // Enter on the last field submits instead of wrapping
            if form.active + 1 == form.fields.len() {
                app.submit_editor();
            } else {
                form.next_field();
            }
        }
        KeyCode::Backspace => {
            form.active_value_mut().pop();
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                form.active_value_mut().push(c);
            }
        }
        _ => {}
    }
}

// =============================================================================
// Admin list tabs (Districts, Budget, Team, Strategy)
// =============================================================================

fn handle_admin_list_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => {
            app.open_editor();
            return;
        }
        KeyCode::Char('d') => {
            app.request_delete();
            return;
        }
        KeyCode::Char('+') | KeyCode::Char('=') if app.current_tab == Tab::Strategy => {
            app.adjust_strategy_progress(10);
            return;
        }
        KeyCode::Char('-') if app.current_tab == Tab::Strategy => {
            app.adjust_strategy_progress(-10);
            return;
        }
        _ => {}
    }

    match app.current_tab {
        Tab::Districts => move_selection(&mut app.districts_selection, app.districts.len(), key),
        Tab::Budget => move_selection(&mut app.budget_selection, app.budget.len(), key),
        Tab::Team => move_selection(&mut app.team_selection, app.team.len(), key),
        Tab::Strategy => move_selection(&mut app.strategy_selection, app.strategy.len(), key),
        _ => {}
    }
}

// =============================================================================
// Census tab
// =============================================================================

fn handle_census_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => {
            app.census_focus = match app.census_focus {
                CensusFocus::Districts => CensusFocus::Squares,
                CensusFocus::Squares => CensusFocus::Buildings,
                CensusFocus::Buildings => CensusFocus::Fields,
                CensusFocus::Fields => CensusFocus::Districts,
            };
            if app.census_focus == CensusFocus::Fields
                && app.census_form.active_field.is_none()
            {
                app.census_form.active_field = Some(CensusField::ApartmentNumber);
            }
        }
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home
        | KeyCode::End => match app.census_focus {
            CensusFocus::Districts => {
                move_selection(&mut app.census_district_selection, app.districts.len(), key)
            }
            CensusFocus::Squares => {
                let len = app.census_squares().len();
                move_selection(&mut app.census_square_selection, len, key)
            }
            CensusFocus::Buildings => {
                let len = app.census_form.available_buildings().len();
                move_selection(&mut app.census_building_selection, len, key)
            }
            CensusFocus::Fields => {}
        },
        KeyCode::Enter => match app.census_focus {
            CensusFocus::Districts => {
                if let Some(district) = app.districts.get(app.census_district_selection).cloned() {
                    app.census_form.select_district(&district);
                    app.census_square_selection = 0;
                    app.census_building_selection = 0;
                    app.census_focus = CensusFocus::Squares;
                }
            }
            CensusFocus::Squares => {
                let square = app
                    .census_squares()
                    .get(app.census_square_selection)
                    .map(|s| (*s).clone());
                if let Some(square) = square {
                    app.census_form.select_square(&square);
                    app.census_building_selection = 0;
                    app.census_focus = CensusFocus::Buildings;
                }
            }
            CensusFocus::Buildings => {
                let code = app
                    .census_form
                    .available_buildings()
                    .get(app.census_building_selection)
                    .cloned();
                if let Some(code) = code {
                    app.census_form.select_building_code(&code);
                    app.census_focus = CensusFocus::Fields;
                    if app.census_form.active_field.is_none() {
                        app.census_form.active_field = Some(CensusField::ApartmentNumber);
                    }
                }
            }
            CensusFocus::Fields => {}
        },
        KeyCode::Char('s') => {
            app.submit_census();
        }
        _ => {}
    }
}

/// Text input into the census household fields.
fn handle_census_field_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let field = match app.census_form.active_field {
        Some(field) => field,
        None => {
            app.census_focus = CensusFocus::Districts;
            return Ok(false);
        }
    };

    match key.code {
        KeyCode::Esc => {
            app.census_focus = CensusFocus::Districts;
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
            // Enter on the last field submits instead of wrapping
            if key.code == KeyCode::Enter && field == CensusField::Notes {
                app.submit_census();
            } else {
                app.census_form.active_field = Some(field.next());
            }
        }
        KeyCode::Backspace => {
            app.census_form.field_value_mut(field).pop();
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.census_form.field_value_mut(field).push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

// =============================================================================
// Assignments tab
// =============================================================================

fn handle_assignments_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => {
            app.assignment_focus = match app.assignment_focus {
                AssignmentFocus::Representatives => AssignmentFocus::Buildings,
                AssignmentFocus::Buildings => AssignmentFocus::AllBuildings,
                AssignmentFocus::AllBuildings => AssignmentFocus::Representatives,
            };
        }
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home
        | KeyCode::End => match app.assignment_focus {
            AssignmentFocus::Representatives => {
                let before = app.rep_selection;
                move_selection(&mut app.rep_selection, app.representatives.len(), key);
                if app.rep_selection != before {
                    app.on_representative_selected();
                }
            }
            AssignmentFocus::Buildings => move_selection(
                &mut app.building_selection,
                app.unassigned_buildings.len(),
                key,
            ),
            AssignmentFocus::AllBuildings => move_selection(
                &mut app.all_buildings_selection,
                app.buildings.len(),
                key,
            ),
        },
        KeyCode::Char(' ') => {
            if app.assignment_focus == AssignmentFocus::Buildings {
                app.toggle_building_selection();
            }
        }
        KeyCode::Char('x') => {
            if app.assignment_focus == AssignmentFocus::AllBuildings {
                app.unassign_selected_building();
            }
        }
        KeyCode::Char('s') | KeyCode::Enter => {
            app.submit_assignment();
        }
        KeyCode::Char('n') => {
            app.next_buildings_page();
        }
        KeyCode::Char('p') => {
            app.prev_buildings_page();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut sel = 0;
        move_selection(&mut sel, 3, key(KeyCode::Down));
        assert_eq!(sel, 1);
        move_selection(&mut sel, 3, key(KeyCode::End));
        assert_eq!(sel, 2);
        move_selection(&mut sel, 3, key(KeyCode::Down));
        assert_eq!(sel, 2);
        move_selection(&mut sel, 3, key(KeyCode::Home));
        assert_eq!(sel, 0);
        move_selection(&mut sel, 3, key(KeyCode::Up));
        assert_eq!(sel, 0);
    }

    #[test]
    fn test_move_selection_empty_list() {
        let mut sel = 0;
        move_selection(&mut sel, 0, key(KeyCode::Down));
        assert_eq!(sel, 0);
        move_selection(&mut sel, 0, key(KeyCode::End));
        assert_eq!(sel, 0);
    }
}
