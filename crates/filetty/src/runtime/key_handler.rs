use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, NodeEvent, Pane};
use crate::runtime::EventResult;

/// Routes one key event to search editing or browser bindings.
pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if app.editing_search {
        return handle_search_key(app, key);
    }

    handle_browser_key(app, key)
}

/// Handles keys while the search field is capturing input.
fn handle_search_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.editing_search = false;
        }
        KeyCode::Backspace => {
            app.search_value.pop();
            app.content_cursor = 0;
        }
        KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_value.push(character);
            app.content_cursor = 0;
        }
        _ => {}
    }

    EventResult::Continue
}

/// Handles browser keys: cursor movement, activation, disclosure, and the
/// toolbar shortcuts.
fn handle_browser_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return EventResult::Quit,
        KeyCode::Char('r') => return EventResult::RefreshRequested,
        KeyCode::Char('/') => {
            app.editing_search = true;
        }
        KeyCode::Char('s') => {
            app.sort_key = app.sort_key.toggled();
            app.content_cursor = 0;
        }
        KeyCode::Char('d') => {
            app.apply_event(NodeEvent::DownloadRequested);
        }
        KeyCode::Char('m') => {
            // The context-menu gesture on a content row fires the host
            // folder event without selecting or navigating.
            if app.focus == Pane::Content && !app.visible_items().is_empty() {
                app.apply_event(NodeEvent::FolderContextMenu);
            }
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Pane::Navigation => Pane::Content,
                Pane::Content => Pane::Navigation,
            };
        }
        KeyCode::Backspace => {
            app.apply_event(NodeEvent::BackRequested);
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char(' ') => toggle_disclosure(app),
        KeyCode::Enter => activate_row(app),
        _ => {}
    }

    EventResult::Continue
}

/// Moves the focused pane's cursor by `offset`, clamped to its row count.
fn move_cursor(app: &mut App, offset: isize) {
    let row_count = match app.focus {
        Pane::Navigation => app.navigation_rows().len(),
        Pane::Content => app.visible_items().len(),
    };
    let cursor = match app.focus {
        Pane::Navigation => &mut app.nav_cursor,
        Pane::Content => &mut app.content_cursor,
    };

    if offset.is_negative() {
        *cursor = cursor.saturating_sub(offset.unsigned_abs());

        return;
    }

    *cursor = cursor
        .saturating_add(offset.unsigned_abs())
        .min(row_count.saturating_sub(1));
}

/// Toggles the disclosure flag for the folder row under the navigation
/// cursor.
fn toggle_disclosure(app: &mut App) {
    if app.focus != Pane::Navigation {
        return;
    }

    let rows = app.navigation_rows();
    let Some(row) = rows.get(app.nav_cursor) else {
        return;
    };
    if !row.node.is_folder() {
        return;
    }

    app.apply_event(NodeEvent::DisclosureToggled {
        row_id: row.row_id.clone(),
    });
}

/// Activates the row under the focused pane's cursor: folders navigate,
/// files select.
fn activate_row(app: &mut App) {
    let node = match app.focus {
        Pane::Navigation => app
            .navigation_rows()
            .get(app.nav_cursor)
            .map(|row| row.node.clone()),
        Pane::Content => app.visible_items().get(app.content_cursor).cloned(),
    };
    let Some(node) = node else {
        return;
    };

    if node.is_folder() {
        app.apply_event(NodeEvent::FolderClicked(node));

        return;
    }

    app.apply_event(NodeEvent::FileClicked(node));
}
