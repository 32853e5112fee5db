use ratatui::Frame;

use crate::{
    app::{App, Phase},
    ui::{render_stats, render_typing},
};

/// A UI Screen boundary: responsible for rendering one phase
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Typing screen - prompt, live WPM, skip hint and the input editor
pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_typing(app, f);
    }
}

/// Stats screen - WPM chart, average WPM and the continue hint
pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_stats(app, f);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Typing => Box::new(TypingScreen),
        Phase::Stats => Box::new(StatsScreen),
    }
}
