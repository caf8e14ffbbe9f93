//! userdeck binary entry point.
//!
//! Parses the command line, sets up logging and settings, then either runs a
//! headless command or initializes the terminal in raw mode, runs the
//! dashboard event loop, and restores the terminal state on exit.
//!
use std::fs::File;
use std::io::Stdout;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use userdeck::api::HttpDirectory;
use userdeck::app::config::config_file_write_path;
use userdeck::app::keymap::KEYBINDS_FILE;
use userdeck::app::tasks::Dispatcher;
use userdeck::app::theme::THEME_FILE;
use userdeck::app::{self, AppState, Keymap, Settings, Theme};
use userdeck::cli::{self, Cli, Command};
use userdeck::error::{Context, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` controls the filter (default `info`). The dashboard only logs
/// when `--log-file` is given; headless commands fall back to stderr.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).compact();
    match (&cli.log_file, &cli.command) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, Some(_)) => builder.with_writer(std::io::stderr).init(),
        (None, None) => {}
    }
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn run_dashboard(runtime: &Runtime, source: HttpDirectory, settings: Settings) -> Result<()> {
    let theme = Theme::load_or_init(&config_file_write_path(THEME_FILE).to_string_lossy());
    let keymap = Keymap::load_or_init(&config_file_write_path(KEYBINDS_FILE).to_string_lossy());
    let (dispatcher, mut inbox) =
        Dispatcher::new(runtime.handle().clone(), Arc::new(source), settings.post_limit);
    let mut state = AppState::new(settings, theme, keymap);

    let mut terminal = init_terminal().context("init terminal")?;
    let res = app::run(&mut terminal, &mut state, &dispatcher, &mut inbox);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let settings = Settings::load(cli.config.as_deref())?.apply(&cli.overrides());
    info!(base_url = %settings.base_url, page_size = settings.page_size, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let source = HttpDirectory::new(&settings.base_url, settings.timeout)
        .with_context(|| format!("invalid base url {}", settings.base_url))?;

    match cli.command {
        Some(Command::List { query, page }) => {
            let mut out = std::io::stdout().lock();
            runtime.block_on(cli::run_list(&source, &query, page, settings.page_size, &mut out))
        }
        Some(Command::Show { id }) => {
            let mut out = std::io::stdout().lock();
            runtime.block_on(cli::run_show(&source, &id, settings.post_limit, &mut out))
        }
        None => run_dashboard(&runtime, source, settings),
    }
}
