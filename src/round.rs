use std::{
    sync::{mpsc::Sender, Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use strum_macros::Display;

use crate::{
    input::KeyStroke,
    passage::{tokenize, Word},
};

/// Identifies one round. Closures submitted by a round's activities carry it
/// so that late arrivals can be told apart from the current round.
pub type RoundId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RoundEnd {
    Completed,
    Skipped,
}

/// One-shot broadcast ending a round. Every activity of the round holds a
/// clone; the first `cancel` wins and wakes all waiters.
#[derive(Debug, Clone, Default)]
pub struct RoundToken {
    inner: Arc<(Mutex<Option<RoundEnd>>, Condvar)>,
}

impl RoundToken {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<RoundEnd>> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if this call ended the round.
    pub fn cancel(&self, end: RoundEnd) -> bool {
        let mut state = self.lock();
        if state.is_some() {
            return false;
        }
        *state = Some(end);
        self.inner.1.notify_all();
        true
    }

    pub fn ended(&self) -> Option<RoundEnd> {
        *self.lock()
    }

    pub fn is_cancelled(&self) -> bool {
        self.ended().is_some()
    }

    /// Sleep for up to `timeout`, waking early on cancellation. Returns
    /// `true` if the round has ended.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .inner
            .1
            .wait_timeout_while(guard, timeout, |ended| ended.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        guard.is_some()
    }
}

/// Mutable state of the round being typed. Replaced wholesale at every round
/// transition, never reused.
#[derive(Debug)]
pub struct RoundState {
    pub id: RoundId,
    pub passage: String,
    pub words: Vec<Word>,
    pub current_word_index: usize,
    pub has_started: bool,
    pub start_time: Option<Instant>,
    pub samples: Vec<f64>,
    pub input_correct: bool,
    pub keystrokes_rendered: usize,
    pub token: RoundToken,
    keystrokes: Option<Sender<KeyStroke>>,
}

impl RoundState {
    pub fn new(id: RoundId, passage: &str) -> Self {
        Self {
            id,
            passage: passage.to_string(),
            words: tokenize(passage),
            current_word_index: 0,
            has_started: false,
            start_time: None,
            samples: Vec::new(),
            input_correct: true,
            keystrokes_rendered: 0,
            token: RoundToken::new(),
            keystrokes: None,
        }
    }

    /// Attach the sending half of the prompt renderer's keystroke channel.
    pub fn connect_renderer(&mut self, tx: Sender<KeyStroke>) {
        self.keystrokes = Some(tx);
    }

    /// Forward a keystroke to the prompt renderer. Dropped silently when the
    /// renderer has already gone away.
    pub fn send_keystroke(&self, keystroke: KeyStroke) -> bool {
        match &self.keystrokes {
            Some(tx) => tx.send(keystroke).is_ok(),
            None => false,
        }
    }

    /// Flip into the started state. The sample series opens with a zero.
    pub fn start(&mut self, now: Instant) {
        self.has_started = true;
        self.start_time = Some(now);
        self.samples.push(0.0);
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current_word_index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_word_index >= self.words.len()
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.start_time.map(|start| now.saturating_duration_since(start))
    }
}
