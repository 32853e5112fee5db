use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::warn;

use crate::app::App;

/// Closure scheduled onto the UI thread.
pub type UpdateFn = Box<dyn FnOnce(&mut App) + Send + 'static>;

/// Unified event type consumed by the UI loop
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Update(UpdateFn),
    Tick,
}

impl std::fmt::Debug for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppEvent::Key(key) => f.debug_tuple("Key").field(key).finish(),
            AppEvent::Resize => f.write_str("Resize"),
            AppEvent::Update(_) => f.write_str("Update(..)"),
            AppEvent::Tick => f.write_str("Tick"),
        }
    }
}

/// Thread-safe handle onto the UI queue. Everything that touches views goes
/// through here, which serializes it with key handling and rendering.
#[derive(Clone, Debug)]
pub struct UiHandle {
    tx: Sender<AppEvent>,
}

/// Receiving end of the UI queue, owned by the UI thread.
#[derive(Debug)]
pub struct UiQueue {
    rx: Receiver<AppEvent>,
}

pub fn channel() -> (UiHandle, UiQueue) {
    let (tx, rx) = mpsc::channel();
    (UiHandle { tx }, UiQueue { rx })
}

impl UiHandle {
    /// Schedule `f` to run on the UI thread. Returns `false` once the UI
    /// loop has gone away.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut App) + Send + 'static,
    {
        self.tx.send(AppEvent::Update(Box::new(f))).is_ok()
    }

    pub fn send(&self, event: AppEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Forwards terminal key presses and resizes into the UI queue
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn spawn(ui: UiHandle) {
        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    ui.send(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => ui.send(AppEvent::Resize),
                Ok(_) => true,
                Err(err) => {
                    warn!(error = %err, "terminal event read failed");
                    false
                }
            };
            if !forwarded {
                break;
            }
        });
    }
}

/// Runner that advances the UI one event at a time
pub struct Runner {
    queue: UiQueue,
    tick: Duration,
}

impl Runner {
    pub fn new(queue: UiQueue, tick: Duration) -> Self {
        Self { queue, tick }
    }

    /// Blocks up to the tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.queue.rx.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_ui, queue) = channel();
        let runner = Runner::new(queue, Duration::from_millis(1));

        // With no events available, step should yield Tick
        match runner.step() {
            AppEvent::Tick => {}
            other => panic!("expected Tick on timeout, got {other:?}"),
        }
    }

    #[test]
    fn step_passes_through_events_in_order() {
        let (ui, queue) = channel();
        ui.send(AppEvent::Resize);
        ui.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )));
        assert!(ui.update(|_app| {}));

        let runner = Runner::new(queue, Duration::from_millis(10));
        assert!(matches!(runner.step(), AppEvent::Resize));
        assert!(matches!(runner.step(), AppEvent::Key(_)));
        assert!(matches!(runner.step(), AppEvent::Update(_)));
    }

    #[test]
    fn update_fails_once_queue_dropped() {
        let (ui, queue) = channel();
        drop(queue);
        assert!(!ui.update(|_app| {}));
    }
}
