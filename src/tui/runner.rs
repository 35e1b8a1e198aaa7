//! TUI Runner
//!
//! Main event loop and terminal setup for the TUI.

use super::app::App;
use super::events::{EventHandler, TuiEvent};
use super::render;
use crate::session::Navigation;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(250);

/// Run the TUI application. Returns where the user should be sent next.
pub async fn run(mut app: App) -> Result<Option<Navigation>> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    app.initialize().await?;

    let event_sender = app.event_sender();
    EventHandler::start_terminal_listener(event_sender.clone());
    EventHandler::start_ticker(event_sender, TICK);

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result.map(|()| app.into_navigation())
}

/// Main event loop
async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| render::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Wait for at least one event (with timeout for spinner refresh)
        let event = tokio::time::timeout(Duration::from_millis(100), app.next_event()).await;

        if let Ok(Some(event)) = event {
            if let Err(e) = app.handle_event(event).await {
                app.error_message = Some(e.to_string());
            }

            // Drain everything queued before re-rendering; extra ticks add nothing
            let mut ticked = false;
            while let Some(event) = app.try_next_event() {
                if matches!(event, TuiEvent::Tick) {
                    if ticked {
                        continue;
                    }
                    ticked = true;
                }
                if let Err(e) = app.handle_event(event).await {
                    app.error_message = Some(e.to_string());
                }
            }
        }
    }

    Ok(())
}
