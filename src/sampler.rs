use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::{
    round::{RoundId, RoundState, RoundToken},
    runtime::UiHandle,
};

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Words per minute with the five-characters-per-word convention.
/// `None` when no time has passed yet.
pub fn instant_wpm(chars: usize, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return None;
    }
    Some(chars as f64 / secs / 5.0 * 60.0)
}

/// Take one sample of the round. Only characters confirmed through the end
/// of the previous word count; the partially typed word does not.
///
/// Returns the appended value, or `None` when the tick was skipped.
pub fn sample_round(round: &mut RoundState, now: Instant) -> Option<f64> {
    let chars = round.current_word()?.index;
    let wpm = instant_wpm(chars, round.elapsed(now)?)?;
    round.samples.push(wpm);
    Some(wpm)
}

/// Sampler activity: ticks every `interval` until the round ends or the UI
/// goes away.
pub fn spawn(round: RoundId, token: RoundToken, ui: UiHandle, interval: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        while !token.wait_timeout(interval) {
            if !ui.update(move |app| app.record_sample(round, Instant::now())) {
                break;
            }
        }
        debug!(round, "sampler stopped");
    })
}
