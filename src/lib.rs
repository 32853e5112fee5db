// Library surface for the binary and the headless integration tests.
pub mod app;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod logging;
pub mod passage;
pub mod progress;
pub mod prompt;
pub mod round;
pub mod runtime;
pub mod sampler;
pub mod time_series;
pub mod ui;
pub mod util;
