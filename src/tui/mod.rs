pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::catalog::Phone;
use crate::ranking::RankedItem;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);

type SearchResult = Result<anyhow::Result<Vec<RankedItem<Phone>>>, tokio::time::error::Elapsed>;

/// Start a background search for the app's current filters
fn spawn_search(app: &App, client: &reqwest::Client, base_url: &str) -> JoinHandle<SearchResult> {
    let client = client.clone();
    let base_url = base_url.to_string();
    let query = app.query();
    tokio::spawn(async move {
        tokio::time::timeout(
            SEARCH_TIMEOUT,
            crate::fetch::fetch_and_rank(&client, &base_url, &query),
        )
        .await
    })
}

pub async fn run_tui(mut app: App, client: reqwest::Client, base_url: String) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);
    // Pending search task, tagged with the generation it was started for
    let mut pending_search: Option<(u64, JoinHandle<SearchResult>)> = None;

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => {
                app.update_flash();
                app.advance_spinner();
            }
            None => app.should_quit = true,
        }

        // A search started for an older generation was superseded or
        // cancelled; its response must not reach the app
        if pending_search
            .as_ref()
            .is_some_and(|(generation, _)| *generation != app.search_generation)
        {
            if let Some((generation, handle)) = pending_search.take() {
                debug!(generation, "aborting stale search");
                handle.abort();
            }
        }

        if app.search_requested {
            app.search_requested = false;
            pending_search = Some((
                app.search_generation,
                spawn_search(&app, &client, &base_url),
            ));
        }

        if pending_search
            .as_ref()
            .is_some_and(|(_, handle)| handle.is_finished())
        {
            if let Some((generation, handle)) = pending_search.take() {
                let result = match handle.await {
                    Ok(Ok(result)) => result,
                    Ok(Err(_elapsed)) => Err(anyhow::anyhow!(
                        "request timed out after {}s",
                        SEARCH_TIMEOUT.as_secs()
                    )),
                    Err(e) => Err(anyhow::anyhow!("search task failed: {}", e)),
                };
                app.apply_search(generation, result);
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    if let Some((_, handle)) = pending_search.take() {
        handle.abort();
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    outcome
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match app.screen {
            app::Screen::Mode => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => app.next_mode(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_mode(),
                KeyCode::Enter => app.choose_mode(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            app::Screen::Brand => match key.code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Esc => app.go_back(),
                KeyCode::Char('j') | KeyCode::Down => app.next_brand(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_brand(),
                KeyCode::Enter => app.choose_brand(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            app::Screen::Results => match key.code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Esc => app.go_back(),

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Open price link in browser
                KeyCode::Enter | KeyCode::Char('o') => app.open_selected(),

                // Filters (each one searches again)
                KeyCode::Char('m') => app.cycle_mode(),
                KeyCode::Char('b') => app.cycle_brand(),
                KeyCode::Char('p') => app.step_price(true),
                KeyCode::Char('P') => app.step_price(false),

                KeyCode::Char('/') | KeyCode::Char('r') => app.request_search(),
                KeyCode::Char('i') => app.show_breakdown(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
        },
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('q') => app.dismiss_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn test_app() -> App {
        App::new(&Config {
            theme: Theme::Dark,
            ..Config::default()
        })
    }

    #[test]
    fn test_keys_walk_the_wizard() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Down)); // flagship
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.screen, app::Screen::Brand);
        assert_eq!(app.mode, crate::filters::Mode::Flagship);

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.screen, app::Screen::Results);
        assert!(app.search_requested);

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.screen, app::Screen::Brand);
        assert!(!app.search_requested);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_price_keys() {
        let mut app = test_app();
        app.screen = app::Screen::Results;
        handle_key_event(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.max_price, 100);
        handle_key_event(&mut app, key(KeyCode::Char('P')));
        assert_eq!(app.price_label(), "Any");
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.input_mode, app::InputMode::Help);
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = test_app();
        app.show_help();
        handle_key_event(
            &mut app,
            KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
        );
        assert!(app.should_quit);
    }
}
