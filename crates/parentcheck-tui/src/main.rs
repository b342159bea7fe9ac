mod actions;
mod app;
mod error;
mod toast;
mod ui;
mod util;
mod worker;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use parentcheck_client::{HttpParentApi, ParentApi};
use parentcheck_config::{self as config, Overrides};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::actions::execute_action;
use crate::app::App;
use crate::error::{exit_code_for, report_error};
use crate::toast::Toasts;

#[derive(Debug, Parser)]
#[command(
    name = "parentcheck",
    version,
    about = "Look up a parent by email and clear their data"
)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/parentcheck/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL that relative endpoint paths are joined onto
    #[arg(long)]
    base_url: Option<String>,
    /// Lookup endpoint, absolute or relative to the base URL
    #[arg(long)]
    lookup_url: Option<String>,
    /// Clear endpoint, absolute or relative to the base URL
    #[arg(long)]
    clear_url: Option<String>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
    /// Print the resolved endpoints and exit
    #[arg(long)]
    print_endpoints: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let verbose = args.verbose;
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path, args.verbose)?;
    }

    let overrides = Overrides {
        base_url: args.base_url,
        lookup_url: args.lookup_url,
        clear_url: args.clear_url,
    };
    let app_config = config::load(args.config, &overrides).with_context(|| "load config")?;
    debug!(
        lookup = %app_config.endpoints.lookup,
        clear = %app_config.endpoints.clear,
        "endpoints resolved"
    );

    if args.print_endpoints {
        println!("lookup: {}", app_config.endpoints.lookup);
        println!("clear: {}", app_config.endpoints.clear);
        return Ok(());
    }

    let client = HttpParentApi::new(app_config.endpoints.clone(), app_config.timeout)
        .with_context(|| "build http client")?;
    let api: Arc<dyn ParentApi> = Arc::new(client);

    let mut app = App::new(
        app_config.endpoints,
        Toasts::new(app_config.notice_duration),
    );
    let mut terminal = TerminalGuard::new()?;
    info!("ui started");
    run_app(&mut terminal, &api, &mut app)
}

fn run_app(terminal: &mut TerminalGuard, api: &Arc<dyn ParentApi>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            execute_action(app, api, action);
        }
        app.poll_pending();
        app.toasts.expire(Instant::now());

        terminal.terminal_mut().draw(|frame| {
            app.last_area = frame.area();
            ui::draw(frame, app);
        })?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
        let _ = self.terminal.show_cursor();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}
