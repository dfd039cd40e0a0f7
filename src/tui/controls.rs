//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char('+' | '=') | KeyCode::Right | KeyCode::Up => app.horizon_up(),
        KeyCode::Char('-') | KeyCode::Left | KeyCode::Down => app.horizon_down(),
        KeyCode::Char('d') => app.toggle_raw(),
        KeyCode::Char('n') => app.toggle_view(),
        KeyCode::Char('r') => app.regenerate(),
        _ => {}
    }
}
