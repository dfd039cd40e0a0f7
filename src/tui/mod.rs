//! Interactive terminal dashboard for the forecast.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Dashboard application state.
pub mod runtime;
mod style;

use std::io;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::error;

use crate::config::ForecastConfig;
use crate::data::NeighborhoodProjection;
use runtime::App;

/// Launches the dashboard for the given configuration.
///
/// Fits the model before touching the terminal so pipeline errors print
/// normally, then runs the event loop and restores the terminal on exit.
pub fn run(cfg: ForecastConfig, neighborhoods: Vec<NeighborhoodProjection>) {
    let mut app = App::new(cfg, neighborhoods).unwrap_or_else(|e| {
        error!("forecast run failed: {e}");
        std::process::exit(1);
    });

    enable_raw_mode().unwrap_or_else(|e| {
        eprintln!("error: failed to enable raw mode: {e}");
        std::process::exit(1);
    });

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).unwrap_or_else(|e| {
        let _ = disable_raw_mode();
        eprintln!("error: failed to enter alternate screen: {e}");
        std::process::exit(1);
    });

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).unwrap_or_else(|e| {
        let _ = disable_raw_mode();
        eprintln!("error: failed to create terminal: {e}");
        std::process::exit(1);
    });

    let result = event_loop(&mut terminal, &mut app);

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Err(e) = result {
        eprintln!("error: TUI crashed: {e}");
        std::process::exit(1);
    }
}

/// Draw, then block for the next input event.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, app))?;

        if app.quit {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            controls::handle_key(app, key);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        App::new(ForecastConfig::reproducible(), Vec::new()).unwrap()
    }

    #[test]
    fn keys_drive_the_slider() {
        let mut app = app();
        controls::handle_key(&mut app, press(KeyCode::Char('+')));
        controls::handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.horizon.days(), 9);
        controls::handle_key(&mut app, press(KeyCode::Char('-')));
        assert_eq!(app.horizon.days(), 8);
        assert_eq!(app.forecast.len(), 8);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        controls::handle_key(&mut app, key);
        assert!(!app.quit);
        controls::handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        let mut key = press(KeyCode::Char('c'));
        key.modifiers = KeyModifiers::CONTROL;
        controls::handle_key(&mut app, key);
        assert!(app.quit);
    }

    #[test]
    fn renders_every_panel() {
        let mut app = app();
        app.neighborhoods.push(NeighborhoodProjection {
            neighborhood: "Kharadi".into(),
            projected_population: 90_000.0,
            predicted_order_volume: 3_100.0,
        });
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| layout::render(f, &app)).unwrap();
        controls::handle_key(&mut app, press(KeyCode::Char('d')));
        terminal.draw(|f| layout::render(f, &app)).unwrap();
        controls::handle_key(&mut app, press(KeyCode::Char('n')));
        terminal.draw(|f| layout::render(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Neighborhood Projections"));
        assert!(text.contains("Kharadi"));
    }
}
