use std::sync::mpsc::{self, Sender};
use std::thread;

use tracing::{debug, info};

use crate::{round::RoundId, runtime::UiHandle};

/// Signals driving the Typing -> Stats -> Typing cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Install a fresh round for this passage and go back to typing.
    NewPassage(String),
    /// `done` is true when the last word of `round` was confirmed, false when
    /// the round was abandoned for a new passage.
    CompletedPassage { round: RoundId, done: bool },
}

/// Spawn the phase coordinator. It lives until every sender is dropped or
/// the UI goes away.
pub fn spawn(ui: UiHandle) -> Sender<PhaseEvent> {
    let (tx, rx) = mpsc::channel::<PhaseEvent>();

    thread::spawn(move || {
        for event in rx {
            let submitted = match event {
                PhaseEvent::NewPassage(passage) => {
                    ui.update(move |app| app.install_round(&passage))
                }
                PhaseEvent::CompletedPassage { round, done: true } => {
                    ui.update(move |app| app.enter_stats(round))
                }
                PhaseEvent::CompletedPassage { round, done: false } => {
                    debug!(round, "round abandoned");
                    true
                }
            };
            if !submitted {
                break;
            }
        }
        info!("phase coordinator stopped");
    });

    tx
}
