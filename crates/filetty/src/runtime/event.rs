use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc;

/// Spawns a dedicated thread polling crossterm for terminal events.
///
/// Reading on its own thread lets the main async loop yield to tokio so
/// spawned tasks (source pulls, downloads) make progress between frames.
pub(crate) fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(250)) {
                Ok(true) => {
                    if let Ok(event) = crossterm::event::read()
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}
