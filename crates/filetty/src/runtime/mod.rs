//! Event/render loop tying terminal input, source sync, and the UI
//! together.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::app::App;
use crate::infra::source::{DataSource, SourceChange};
use crate::ui;

mod event;
mod key_handler;
mod sync;
mod terminal;

pub(crate) type TuiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) enum EventResult {
    Continue,
    Quit,
    RefreshRequested,
}

/// Runs the TUI event/render loop until the user exits.
///
/// On activation the loop subscribes to the source's change events and
/// immediately performs one pull; the subscription ends with the loop, so
/// no callback outlives it.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub async fn run(app: &mut App, source: Arc<dyn DataSource>) -> io::Result<()> {
    let _terminal_guard = terminal::TerminalGuard;
    let mut terminal = terminal::setup_terminal()?;

    // Terminal events are read on a dedicated thread so the main async loop
    // can yield to tokio between iterations.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(event_tx);

    let (completions_tx, mut completions_rx) = mpsc::unbounded_channel();
    let mut changes = source.subscribe();

    // One immediate pull on activation.
    start_pull(app, &source, &completions_tx);

    let mut tick = tokio::time::interval(Duration::from_millis(50));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    enum LoopSignal {
        Fetched(Option<sync::FetchCompletion>),
        SourceChanged(Result<SourceChange, broadcast::error::RecvError>),
        Terminal(Option<Event>),
        Tick,
    }

    let mut source_connected = true;
    loop {
        render_frame(app, &mut terminal)?;

        let signal = tokio::select! {
            biased;
            terminal_event = event_rx.recv() => LoopSignal::Terminal(terminal_event),
            completion = completions_rx.recv() => LoopSignal::Fetched(completion),
            change = changes.recv(), if source_connected => LoopSignal::SourceChanged(change),
            _ = tick.tick() => LoopSignal::Tick,
        };

        match signal {
            LoopSignal::Terminal(Some(terminal_event)) => {
                if process_terminal_event(app, &source, &completions_tx, terminal_event) {
                    break;
                }

                // Drain queued events before re-rendering so rapid key
                // presses are processed immediately instead of one-per-frame.
                let mut quit = false;
                while let Ok(queued) = event_rx.try_recv() {
                    if process_terminal_event(app, &source, &completions_tx, queued) {
                        quit = true;
                        break;
                    }
                }
                if quit {
                    break;
                }
            }
            LoopSignal::Terminal(None) | LoopSignal::Tick => {}
            LoopSignal::Fetched(Some(completion)) => {
                sync::apply_completion(app, completion);
            }
            LoopSignal::Fetched(None) => {}
            LoopSignal::SourceChanged(Ok(_) | Err(broadcast::error::RecvError::Lagged(_))) => {
                // A lagged subscriber only means change events coalesced;
                // one pull still fetches the latest payload.
                start_pull(app, &source, &completions_tx);
            }
            LoopSignal::SourceChanged(Err(broadcast::error::RecvError::Closed)) => {
                warn!("data source change stream closed");
                source_connected = false;
            }
        }
    }

    terminal.show_cursor()?;

    Ok(())
}

/// Issues a token-stamped pull against the source.
fn start_pull(
    app: &mut App,
    source: &Arc<dyn DataSource>,
    completions_tx: &mpsc::UnboundedSender<sync::FetchCompletion>,
) {
    let token = app.store.begin_fetch();
    sync::spawn_fetch(source, token, completions_tx.clone());
}

/// Routes one terminal event, returning whether the loop should quit.
fn process_terminal_event(
    app: &mut App,
    source: &Arc<dyn DataSource>,
    completions_tx: &mpsc::UnboundedSender<sync::FetchCompletion>,
    terminal_event: Event,
) -> bool {
    let Event::Key(key) = terminal_event else {
        return false;
    };

    match key_handler::handle_key_event(app, key) {
        EventResult::Quit => true,
        EventResult::RefreshRequested => {
            start_pull(app, source, completions_tx);

            false
        }
        EventResult::Continue => false,
    }
}

fn render_frame(app: &App, terminal: &mut TuiTerminal) -> io::Result<()> {
    let nav_rows = app.navigation_rows();
    let visible = app.visible_items();

    terminal.draw(|frame| {
        ui::render(
            frame,
            ui::RenderContext {
                breadcrumb: app.navigation.path(),
                content_cursor: app.content_cursor,
                editing_search: app.editing_search,
                focus: app.focus,
                nav_cursor: app.nav_cursor,
                nav_rows: &nav_rows,
                search_value: &app.search_value,
                selection: &app.selection,
                sort_key: app.sort_key,
                visible: &visible,
            },
        );
    })?;

    Ok(())
}
