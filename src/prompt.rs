use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use itertools::Itertools;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tracing::debug;

use crate::{
    coordinator::PhaseEvent,
    input::{EditorKey, InputBuffer, KeyStroke},
    passage::Word,
    progress::{can_move_to_next_word, is_correct_so_far},
    round::{RoundEnd, RoundId, RoundState, RoundToken},
    runtime::UiHandle,
};

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Correct,
    Incorrect,
}

impl Highlight {
    pub fn from_progress(correct: bool) -> Self {
        if correct {
            Highlight::Correct
        } else {
            Highlight::Incorrect
        }
    }

    /// bold black on white / bold white on red
    pub fn style(self) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self {
            Highlight::Correct => bold.fg(Color::Black).bg(Color::White),
            Highlight::Incorrect => bold.fg(Color::White).bg(Color::Red),
        }
    }

    pub fn ansi(self) -> &'static str {
        match self {
            Highlight::Correct => "\x1b[1;30;47m",
            Highlight::Incorrect => "\x1b[37;1;41m",
        }
    }

    pub fn paint(self, word: &str) -> String {
        format!("{}{word}{RESET}", self.ansi())
    }
}

/// Content of the prompt view: the passage's words with at most one of them
/// highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptView {
    words: Vec<String>,
    marked: Option<(usize, Highlight)>,
}

impl PromptView {
    pub fn highlighted(words: &[Word], idx: usize, highlight: Highlight) -> Self {
        let words: Vec<String> = words.iter().map(|w| w.text.clone()).collect();
        let marked = (idx < words.len()).then_some((idx, highlight));
        Self { words, marked }
    }

    /// First render of a round: the starting word is shown as correct.
    pub fn initial(words: &[Word]) -> Self {
        Self::highlighted(words, 0, Highlight::Correct)
    }

    pub fn marked(&self) -> Option<(usize, Highlight)> {
        self.marked
    }

    pub fn line(&self) -> Line<'_> {
        let mut spans = Vec::with_capacity(self.words.len() * 2);
        for (idx, word) in self.words.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" "));
            }
            match self.marked {
                Some((marked, highlight)) if marked == idx => {
                    spans.push(Span::styled(word.as_str(), highlight.style()))
                }
                _ => spans.push(Span::raw(word.as_str())),
            }
        }
        Line::from(spans)
    }
}

impl fmt::Display for PromptView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .words
            .iter()
            .enumerate()
            .map(|(idx, word)| match self.marked {
                Some((marked, highlight)) if marked == idx => highlight.paint(word),
                _ => word.clone(),
            })
            .join(" ");
        f.write_str(&text)
    }
}

/// What a keystroke did to the round
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// The prompt view has to be replaced with this content.
    Prompt(PromptView),
    /// The last word was confirmed; the next render belongs to the stats view.
    Completed,
}

/// Apply one keystroke event to the round: advance past a completed word on
/// Space, then recompute the highlight of the current word.
///
/// The Space decision is taken on the buffer snapshot carried by the
/// keystroke, the highlight on the live buffer.
pub fn render_keystroke(
    round: &mut RoundState,
    input: &mut InputBuffer,
    keystroke: &KeyStroke,
) -> Rendered {
    round.keystrokes_rendered += 1;

    let Some(target) = round.current_word().map(|w| w.text.clone()) else {
        return Rendered::Completed;
    };

    let can_move = can_move_to_next_word(&target, &keystroke.buffer);

    if keystroke.key == EditorKey::Space {
        if can_move {
            round.current_word_index += 1;
            input.consume_confirmed(&keystroke.buffer);
            if round.is_complete() {
                return Rendered::Completed;
            }
        } else {
            debug!(
                round = round.id,
                word = round.current_word_index,
                "word boundary rejected"
            );
        }
    }

    let correct = round
        .current_word()
        .map(|w| is_correct_so_far(&w.text, &input.text()))
        .unwrap_or(true);
    round.input_correct = correct || can_move;

    Rendered::Prompt(PromptView::highlighted(
        &round.words,
        round.current_word_index,
        Highlight::from_progress(round.input_correct),
    ))
}

/// Answer of the UI thread to a renderer's closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Continue,
    Completed,
    /// The closure reached the UI after its round was replaced or ended.
    Stale,
}

/// Prompt renderer activity for one round. Runs until the round ends or the
/// keystroke channel closes.
pub fn spawn(
    round: RoundId,
    token: RoundToken,
    keystrokes: Receiver<KeyStroke>,
    ui: UiHandle,
    phase: Sender<PhaseEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(keystroke) = keystrokes.recv() {
            if token.is_cancelled() {
                debug!(round, "dropping keystroke after round end");
                break;
            }

            let (reply_tx, reply_rx) = mpsc::sync_channel(1);
            let submitted = ui.update(move |app| {
                let _ = reply_tx.send(app.render_prompt(round, &keystroke));
            });
            if !submitted {
                break;
            }

            match reply_rx.recv() {
                Ok(RenderOutcome::Continue) => {}
                Ok(RenderOutcome::Completed) => {
                    token.cancel(RoundEnd::Completed);
                    let _ = phase.send(PhaseEvent::CompletedPassage { round, done: true });
                    break;
                }
                Ok(RenderOutcome::Stale) | Err(_) => break,
            }
        }
        debug!(round, "prompt renderer stopped");
    })
}
