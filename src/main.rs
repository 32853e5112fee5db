use std::{
    error::Error,
    fmt::Display,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use minityper::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    error::AppError,
    logging,
    passage::{PassageList, PassagePicker},
    runtime::{self, CrosstermEventSource, Runner},
    ui,
};

const TICK_RATE_MS: u64 = 100;

/// minimal typing tui: random passages, live wpm and a wpm chart per round
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type passages drawn at random from a file, one passage per line. The current word is highlighted while you type, the WPM box tracks your speed, and every finished round ends with a WPM-over-time chart. Ctrl-L skips a passage, Ctrl-C quits."
)]
pub struct Cli {
    /// file with one passage per line
    passage_file: Option<PathBuf>,

    /// seed for picking passages
    #[clap(long)]
    seed: Option<u64>,

    /// milliseconds between wpm samples
    #[clap(long)]
    sample_interval_ms: Option<u64>,

    /// file to append logs to
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Stored config with command line overrides applied
    fn resolve_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();

        if let Some(ms) = self.sample_interval_ms {
            config.sample_interval_ms = ms;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        config
    }
}

fn fail(kind: ErrorKind, err: impl Display) -> ! {
    Cli::command().error(kind, err).exit()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config();

    let passages = match cli.passage_file.as_deref() {
        None => fail(ErrorKind::MissingRequiredArgument, AppError::MissingPromptFile),
        Some(path) => PassageList::load(path).unwrap_or_else(|err| fail(ErrorKind::Io, err)),
    };

    if !stdin().is_tty() {
        fail(ErrorKind::Io, "stdin must be a tty");
    }

    let _log_guard = logging::init(&config.log_file, &config.log_level)
        .unwrap_or_else(|err| fail(ErrorKind::Io, err));
    info!(
        passages = passages.len(),
        seed = ?cli.seed,
        sample_interval_ms = config.sample_interval_ms,
        "starting"
    );

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            error!(error = %err, "terminal initialisation failed");
            return Err(AppError::Terminal(err).into());
        }
    };

    let (ui_handle, queue) = runtime::channel();
    CrosstermEventSource::spawn(ui_handle.clone());

    let mut app = App::start(
        PassagePicker::new(passages, cli.seed),
        config.app_settings(),
        ui_handle,
    );
    let runner = Runner::new(queue, Duration::from_millis(TICK_RATE_MS));

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "main loop failed");
    }
    info!("quit");
    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen)
        .and_then(|_| Terminal::new(CrosstermBackend::new(stdout)));
    leave_raw_mode_on_err(terminal, disable_raw_mode)
}

/// Raw mode must not outlive a failed terminal setup.
fn leave_raw_mode_on_err<T>(
    result: io::Result<T>,
    disable: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if result.is_err() {
        let _ = disable();
    }
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        app.dispatch(runner.step());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
