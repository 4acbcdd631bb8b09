use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use snake_arcade::config::{
    ConfigError, FRAME_INTERVAL_MS, GameConfig, default_log_path, default_settings_path,
    load_settings,
};
use snake_arcade::controls::{HostEvent, InputConfig, InputHandler};
use snake_arcade::grid::GridSize;
use snake_arcade::input::GameInput;
use snake_arcade::presenter::TerminalPresenter;
use snake_arcade::session::Session;
use snake_arcade::terminal_runtime::{TerminalSession, cleanup_terminal_best_effort};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in tiles; defaults to fitting the terminal.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in tiles; defaults to fitting the terminal.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Drag distance, in swipe units, needed to turn.
    #[arg(long = "swipe-threshold")]
    swipe_threshold: Option<f64>,

    /// Disable mouse buttons and drag steering.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Disable the game-over bell.
    #[arg(long)]
    mute: bool,

    /// Settings file to load instead of the default location.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log debug detail such as ignored commands.
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logging(&log_path, level);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            error!("invalid configuration: {error}");
            eprintln!("snake-arcade: {error}");
            return ExitCode::from(2);
        }
    };

    install_panic_hook(config.mouse);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("snake-arcade: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &GameConfig) -> Result<(), RunError> {
    let terminal = TerminalSession::enter(config.mouse)?;
    let mut presenter = TerminalPresenter::new(terminal, config.sound, config.mouse);
    let mut input = InputHandler::new(InputConfig {
        mouse: config.mouse,
        swipe_threshold: config.swipe_threshold,
    });

    let grid = match config.grid {
        Some((width, height)) => GridSize::new(width, height)?,
        None => {
            let (columns, rows) = presenter.size()?;
            GridSize::from_viewport(columns, rows)?
        }
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tick_period = Duration::from_millis(config.tick_interval_ms);
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut session = Session::new(grid, tick_period, rng);

    info!(
        "ready: {}x{} grid, {} ms ticks",
        grid.width(),
        grid.height(),
        config.tick_interval_ms
    );

    loop {
        presenter.redraw(&session.snapshot())?;

        let now = Instant::now();
        let timeout = session
            .time_until_tick(now)
            .map_or(frame_interval, |due| due.min(frame_interval));

        if let Some(event) = input.poll_input(timeout, presenter.buttons())? {
            match event {
                HostEvent::Input(GameInput::Quit) => break,
                HostEvent::Input(game_input) => {
                    handle_input(&mut session, &mut presenter, game_input);
                }
                HostEvent::Resize { columns, rows } => {
                    handle_resize(&mut session, config, columns, rows);
                }
            }
        }

        let _ = session.poll_tick(Instant::now(), &mut presenter);
        if let Some(error) = presenter.take_error() {
            return Err(error.into());
        }
    }

    info!("quit with score {}", session.score());
    Ok(())
}

fn handle_input(session: &mut Session, presenter: &mut TerminalPresenter, input: GameInput) {
    match input {
        GameInput::Direction(direction) => {
            let _ = session.request_direction(direction);
        }
        GameInput::TogglePause => session.toggle_pause(presenter),
        GameInput::Start => session.start(Instant::now(), presenter),
        GameInput::CloseModal => {
            let _ = presenter.close_modal(session.state());
        }
        GameInput::Stop => session.stop(),
        GameInput::Quit => {}
    }
}

fn handle_resize(session: &mut Session, config: &GameConfig, columns: u16, rows: u16) {
    if config.grid.is_some() {
        return;
    }

    match GridSize::from_viewport(columns, rows) {
        Ok(grid) => session.resize(grid),
        Err(error) => debug!("keeping current grid: {error}"),
    }
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let settings = match &cli.settings {
        Some(path) => load_settings(path, true)?,
        None => load_settings(&default_settings_path(), false)?,
    };

    let mut config = GameConfig::default().with_settings(&settings);

    // A single dimension gives a square grid.
    config.grid = match (cli.width, cli.height) {
        (Some(width), Some(height)) => Some((width, height)),
        (Some(side), None) | (None, Some(side)) => Some((side, side)),
        (None, None) => config.grid,
    };
    if let Some(ms) = cli.tick_ms {
        config.tick_interval_ms = ms;
    }
    if let Some(threshold) = cli.swipe_threshold {
        config.swipe_threshold = threshold;
    }
    if cli.no_mouse {
        config.mouse = false;
    }
    if cli.mute {
        config.sound = false;
    }
    config.seed = cli.seed;

    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path, level: LevelFilter) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
        Ok(file) => {
            if let Err(error) = WriteLogger::init(level, LogConfig::default(), file) {
                eprintln!("Failed to initialize logger: {error}");
            }
        }
        Err(error) => eprintln!("Failed to open log file {}: {error}", path.display()),
    }
}

fn install_panic_hook(mouse_capture: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort(mouse_capture);
        default_hook(panic_info);
    }));
}
