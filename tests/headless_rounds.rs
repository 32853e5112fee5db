use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use minityper::{
    app::{App, AppSettings, Phase},
    passage::{PassageList, PassagePicker},
    prompt::Highlight,
    round::RoundEnd,
    runtime::{self, Runner},
    ui,
};

// Headless rounds driven through the real UI queue and activities, without a TTY.

const SETTLE: Duration = Duration::from_secs(2);

fn start(passages: &[&str], seed: u64, sample_interval: Duration) -> (App, Runner) {
    let (handle, queue) = runtime::channel();
    let list = PassageList::from_lines(passages.iter().copied()).unwrap();
    let app = App::start(
        PassagePicker::new(list, Some(seed)),
        AppSettings { sample_interval },
        handle,
    );
    (app, Runner::new(queue, Duration::from_millis(5)))
}

fn pump_until(app: &mut App, runner: &Runner, cond: impl Fn(&App) -> bool) -> bool {
    let deadline = Instant::now() + SETTLE;
    while Instant::now() < deadline {
        if cond(app) {
            return true;
        }
        app.dispatch(runner.step());
    }
    cond(app)
}

fn pump_for(app: &mut App, runner: &Runner, duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        app.dispatch(runner.step());
    }
}

fn char_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Press each key and wait until the prompt renderer has handled it.
fn type_keys(app: &mut App, runner: &Runner, keys: &str) {
    for c in keys.chars() {
        let round = app.round.id;
        let rendered = app.round.keystrokes_rendered;
        app.on_key(char_key(c));
        let settled = pump_until(app, runner, |a| {
            a.round.id != round
                || a.round.keystrokes_rendered > rendered
                || a.round.token.is_cancelled()
        });
        assert!(settled, "keystroke {c:?} was never rendered");
    }
}

#[test]
fn completing_passage_enters_stats() {
    let (mut app, runner) = start(&["ab cd"], 1, Duration::from_millis(500));

    type_keys(&mut app, &runner, "ab ");
    assert_eq!(app.round.current_word_index, 1);
    assert!(app.views.input.is_empty());

    type_keys(&mut app, &runner, "cd ");
    assert!(pump_until(&mut app, &runner, |a| a.phase == Phase::Stats));
    assert_eq!(app.round.current_word_index, 2);
    assert_eq!(app.round.token.ended(), Some(RoundEnd::Completed));
}

#[test]
fn wrong_word_is_highlighted_and_space_rejected() {
    let (mut app, runner) = start(&["ab cd"], 1, Duration::from_millis(500));

    type_keys(&mut app, &runner, "ax ");

    assert_eq!(app.round.current_word_index, 0);
    assert_eq!(app.views.input.text(), "ax ");
    assert_eq!(app.views.prompt.marked(), Some((0, Highlight::Incorrect)));
    assert!(app.is_typing_round());
}

#[test]
fn single_word_round_has_samples() {
    let (mut app, runner) = start(&["ab"], 1, Duration::from_millis(500));

    type_keys(&mut app, &runner, "ab ");
    assert!(pump_until(&mut app, &runner, |a| !a.is_typing_round()));

    assert!(!app.round.samples.is_empty());
    assert_eq!(app.round.samples[0], 0.0);
}

#[test]
fn ctrl_l_installs_fresh_round() {
    let (mut app, runner) = start(&["ab cd ef"], 1, Duration::from_millis(500));
    type_keys(&mut app, &runner, "ab ");
    let old = app.round.id;

    app.on_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
    assert!(pump_until(&mut app, &runner, |a| a.round.id != old));

    assert!(app.is_typing_round());
    assert_eq!(app.round.passage, "ab cd ef");
    assert_eq!(app.round.current_word_index, 0);
    assert!(!app.round.has_started);
    assert!(app.views.input.is_empty());
    assert_eq!(app.views.prompt.marked(), Some((0, Highlight::Correct)));
}

#[test]
fn sampler_appends_zero_until_a_word_is_confirmed() {
    let (mut app, runner) = start(&["ab"], 1, Duration::from_millis(20));

    type_keys(&mut app, &runner, "a");
    pump_for(&mut app, &runner, Duration::from_millis(200));

    assert!(app.round.samples.len() >= 3, "{:?}", app.round.samples);
    assert!(app.round.samples.iter().all(|&s| s == 0.0));
    assert_eq!(app.views.wpm, "0");
}

#[test]
fn sampler_credits_confirmed_words() {
    let (mut app, runner) = start(&["abcde fghij"], 1, Duration::from_millis(20));

    type_keys(&mut app, &runner, "abcde ");
    pump_for(&mut app, &runner, Duration::from_millis(100));

    let last = *app.round.samples.last().unwrap();
    assert!(last > 0.0);
    assert_ne!(app.views.wpm, "");
}

#[test]
fn next_passage_follows_seeded_rng() {
    let passages = ["one two", "three"];
    let seed = 11;
    let mut expected = PassagePicker::new(
        PassageList::from_lines(passages).unwrap(),
        Some(seed),
    );
    let first = expected.pick();
    let second = expected.pick();

    let (mut app, runner) = start(&passages, seed, Duration::from_millis(500));
    assert_eq!(app.round.passage, first);

    let typed = format!("{first} ");
    type_keys(&mut app, &runner, &typed);
    assert!(pump_until(&mut app, &runner, |a| a.phase == Phase::Stats));

    let old = app.round.id;
    app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    assert!(pump_until(&mut app, &runner, |a| a.round.id != old));

    assert!(app.is_typing_round());
    assert_eq!(app.round.passage, second);
}

#[test]
fn double_enter_installs_one_round() {
    let passages = ["ab", "cd", "ef"];
    let seed = 5;
    let mut expected = PassagePicker::new(PassageList::from_lines(passages).unwrap(), Some(seed));
    let first = expected.pick();
    let second = expected.pick();

    let (mut app, runner) = start(&passages, seed, Duration::from_millis(500));
    type_keys(&mut app, &runner, &format!("{first} "));
    assert!(pump_until(&mut app, &runner, |a| a.phase == Phase::Stats));

    let old = app.round.id;
    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    app.on_key(enter);
    app.on_key(enter);
    pump_for(&mut app, &runner, Duration::from_millis(200));

    assert_eq!(app.round.id, old + 1);
    assert_eq!(app.round.passage, second);
    assert!(app.is_typing_round());
}

#[test]
fn repeated_ctrl_l_installs_one_round() {
    let (mut app, runner) = start(&["ab cd"], 1, Duration::from_millis(500));
    let old = app.round.id;
    let skip = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
    app.on_key(skip);
    app.on_key(skip);
    app.on_key(skip);
    pump_for(&mut app, &runner, Duration::from_millis(200));

    assert_eq!(app.round.id, old + 1);
}

#[test]
fn stats_view_ignores_typing() {
    let (mut app, runner) = start(&["ab"], 1, Duration::from_millis(500));
    type_keys(&mut app, &runner, "ab ");
    assert!(pump_until(&mut app, &runner, |a| !a.is_typing_round()));
    let round = app.round.id;

    app.on_key(char_key('x'));
    app.on_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
    pump_for(&mut app, &runner, Duration::from_millis(50));

    assert_eq!(app.phase, Phase::Stats);
    assert_eq!(app.round.id, round);
}

#[test]
fn previous_round_cannot_touch_new_round() {
    let (mut app, runner) = start(&["ab cd"], 1, Duration::from_millis(5));
    type_keys(&mut app, &runner, "ab ");
    pump_for(&mut app, &runner, Duration::from_millis(30));

    let old = app.round.id;
    app.on_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
    assert!(pump_until(&mut app, &runner, |a| a.round.id != old));
    pump_for(&mut app, &runner, Duration::from_millis(100));

    assert!(!app.round.has_started);
    assert!(app.round.samples.is_empty());
    assert_eq!(app.round.current_word_index, 0);
    assert_eq!(app.views.wpm, "");
}

#[test]
fn stats_screen_renders_after_round() {
    let (mut app, runner) = start(&["ab"], 1, Duration::from_millis(10));
    type_keys(&mut app, &runner, "a");
    pump_for(&mut app, &runner, Duration::from_millis(50));
    type_keys(&mut app, &runner, "b ");
    assert!(pump_until(&mut app, &runner, |a| !a.is_typing_round()));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| ui::draw(&app, f)).unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();

    assert!(text.contains("Stats"));
    assert!(text.contains(ui::CONTINUE_HINT));
}
