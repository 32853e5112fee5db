use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::{
    coordinator::{self, PhaseEvent},
    input::{EditorKey, InputBuffer, KeyStroke},
    passage::PassagePicker,
    prompt::{self, PromptView, RenderOutcome, Rendered},
    round::{RoundEnd, RoundId, RoundState},
    runtime::{AppEvent, UiHandle},
    sampler::{self, DEFAULT_SAMPLE_INTERVAL},
    util::{average_wpm, peak_wpm},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Stats,
}

#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub sample_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

/// Contents of the typing screen's regions
#[derive(Debug, Clone, Default)]
pub struct Views {
    pub prompt: PromptView,
    pub wpm: String,
    pub input: InputBuffer,
}

impl Views {
    fn for_round(round: &RoundState) -> Self {
        Self {
            prompt: PromptView::initial(&round.words),
            wpm: String::new(),
            input: InputBuffer::new(),
        }
    }
}

/// State owned by the UI thread. Activities reach it only through
/// [`UiHandle::update`].
#[derive(Debug)]
pub struct App {
    pub phase: Phase,
    pub round: RoundState,
    pub views: Views,
    pub should_quit: bool,
    picker: PassagePicker,
    settings: AppSettings,
    ui: UiHandle,
    phase_tx: Sender<PhaseEvent>,
    last_round_id: RoundId,
    transition_pending: bool,
}

impl App {
    /// Spawn the phase coordinator and install the first round.
    pub fn start(picker: PassagePicker, settings: AppSettings, ui: UiHandle) -> Self {
        let phase_tx = coordinator::spawn(ui.clone());
        let mut app = Self {
            phase: Phase::Typing,
            round: RoundState::new(0, ""),
            views: Views::default(),
            should_quit: false,
            picker,
            settings,
            ui,
            phase_tx,
            last_round_id: 0,
            transition_pending: false,
        };
        let passage = app.picker.pick();
        app.install_round(&passage);
        app
    }

    pub fn is_typing_round(&self) -> bool {
        self.phase == Phase::Typing
    }

    pub fn average_wpm(&self) -> f64 {
        average_wpm(&self.round.samples)
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Update(f) => f(self),
            AppEvent::Resize | AppEvent::Tick => {}
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.phase {
            Phase::Typing if ctrl && key.code == KeyCode::Char('l') => self.next_typing_round(),
            Phase::Typing => self.edit(EditorKey::from(key)),
            Phase::Stats if key.code == KeyCode::Enter => self.next_typing_round(),
            Phase::Stats => {}
        }
    }

    /// Per-keystroke editor hook of the input view.
    fn edit(&mut self, key: EditorKey) {
        if self.round.token.is_cancelled() {
            debug!(round = self.round.id, ?key, "keystroke after round end dropped");
            return;
        }

        if !self.round.has_started {
            self.round.start(Instant::now());
            sampler::spawn(
                self.round.id,
                self.round.token.clone(),
                self.ui.clone(),
                self.settings.sample_interval,
            );
            info!(round = self.round.id, "round started");
        }

        self.views.input.apply(key);

        let keystroke = KeyStroke {
            key,
            buffer: self.views.input.text(),
        };
        if !self.round.send_keystroke(keystroke) {
            debug!(round = self.round.id, "prompt renderer gone, keystroke dropped");
        }
    }

    /// Replace the current round with a fresh one for `passage` and return to
    /// the typing view.
    pub fn install_round(&mut self, passage: &str) {
        self.round.token.cancel(RoundEnd::Skipped);

        self.last_round_id += 1;
        let mut round = RoundState::new(self.last_round_id, passage);
        let (tx, rx) = mpsc::channel();
        round.connect_renderer(tx);
        prompt::spawn(
            round.id,
            round.token.clone(),
            rx,
            self.ui.clone(),
            self.phase_tx.clone(),
        );

        info!(round = round.id, words = round.words.len(), "round installed");

        self.views = Views::for_round(&round);
        self.round = round;
        self.phase = Phase::Typing;
        self.transition_pending = false;
    }

    /// Runs on behalf of the prompt renderer for one keystroke event.
    pub fn render_prompt(&mut self, round: RoundId, keystroke: &KeyStroke) -> RenderOutcome {
        if round != self.round.id || self.round.token.is_cancelled() {
            debug!(round, current = self.round.id, "stale prompt update dropped");
            return RenderOutcome::Stale;
        }

        match prompt::render_keystroke(&mut self.round, &mut self.views.input, keystroke) {
            Rendered::Prompt(view) => {
                self.views.prompt = view;
                RenderOutcome::Continue
            }
            Rendered::Completed => RenderOutcome::Completed,
        }
    }

    /// Runs on behalf of the sampler once per tick.
    pub fn record_sample(&mut self, round: RoundId, now: Instant) {
        if round != self.round.id || self.round.token.is_cancelled() {
            debug!(round, current = self.round.id, "stale sample dropped");
            return;
        }

        if let Some(wpm) = sampler::sample_round(&mut self.round, now) {
            self.views.wpm = (wpm as i64).to_string();
        }
    }

    pub fn enter_stats(&mut self, round: RoundId) {
        if round != self.round.id {
            debug!(round, current = self.round.id, "stale completion dropped");
            return;
        }
        self.log_round_summary(RoundEnd::Completed);
        self.phase = Phase::Stats;
    }

    /// Abandon the current round (or leave the stats view) and ask the
    /// coordinator for a new random passage. Repeated requests before the
    /// new round is installed are ignored.
    pub fn next_typing_round(&mut self) {
        let round = self.round.id;
        if self.transition_pending {
            debug!(round, "new passage already requested");
            return;
        }
        if self.round.token.cancel(RoundEnd::Skipped) {
            self.log_round_summary(RoundEnd::Skipped);
        }

        let passage = self.picker.pick();
        let sent = self
            .phase_tx
            .send(PhaseEvent::CompletedPassage { round, done: false })
            .and_then(|_| self.phase_tx.send(PhaseEvent::NewPassage(passage)));
        match sent {
            Ok(()) => self.transition_pending = true,
            Err(_) => warn!(round, "phase coordinator unavailable, staying on current round"),
        }
    }

    fn log_round_summary(&self, end: RoundEnd) {
        let samples = &self.round.samples;
        info!(
            round = self.round.id,
            %end,
            words = self.round.current_word_index,
            average_wpm = average_wpm(samples) as i64,
            peak_wpm = peak_wpm(samples) as i64,
            samples = samples.len(),
            keystrokes = self.round.keystrokes_rendered,
            "round ended"
        );
    }
}
