use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::Parser;
use log::{debug, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use snack_snake::config::{FRAME_INTERVAL, GameSettings, is_missing_file};
use snack_snake::game::{GameState, GameStatus, INITIAL_FOOD, INITIAL_SNAKE, TickOutcome};
use snack_snake::input::{GameInput, InputHandler};
use snack_snake::terminal_runtime::TerminalSession;
use snack_snake::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON settings file overriding speed and effect durations.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the log is written; the terminal belongs to the game.
    #[arg(long = "log-file", default_value = "snack-snake.log")]
    log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    info!("starting snack-snake {}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(&cli);

    let mut session = TerminalSession::enter()?;
    let result = run(&mut session, settings);
    drop(session);

    info!("exiting");
    result
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), File::create(&cli.log_file)?)
        .map_err(io::Error::other)
}

fn load_settings(cli: &Cli) -> GameSettings {
    match GameSettings::load(cli.config.as_deref()) {
        Ok(settings) => {
            info!("settings: {settings:?}");
            settings
        }
        Err(error) if is_missing_file(&error) => {
            eprintln!("Settings file not found, using defaults: {error}");
            warn!("{error}");
            GameSettings::default()
        }
        Err(error) => {
            eprintln!("Ignoring settings: {error}");
            warn!("{error}");
            GameSettings::default()
        }
    }
}

fn run(session: &mut TerminalSession, settings: GameSettings) -> io::Result<()> {
    let mut state =
        GameState::new(settings, &INITIAL_SNAKE, &INITIAL_FOOD).map_err(io::Error::other)?;
    state.toggle_pause();

    let mut input = InputHandler::new();
    let mut front = FrontEnd {
        started: false,
        previous_high_score: state.high_score(),
    };
    let mut last_frame = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        session.draw(
            &state,
            HudInfo {
                previous_high_score: front.previous_high_score,
                start_screen: !front.started,
            },
        )?;

        if let Some(game_input) = input.poll_input()? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            if handle_input(&mut state, game_input, &mut front)? {
                last_tick = Instant::now();
            }
        }

        let now = Instant::now();
        state.advance_clock(now - last_frame);
        last_frame = now;

        if state.status() == GameStatus::Running && last_tick.elapsed() >= state.tick_interval() {
            let outcome = state.tick();
            log_outcome(&state, outcome);
            last_tick = Instant::now();
        }

        thread::sleep(FRAME_INTERVAL);
    }

    Ok(())
}

/// Front-end state that the game itself does not track.
#[derive(Debug)]
struct FrontEnd {
    started: bool,
    previous_high_score: i32,
}

/// Applies one input; returns true when a game (re)started and the tick
/// timer should restart.
fn handle_input(
    state: &mut GameState,
    input: GameInput,
    front: &mut FrontEnd,
) -> io::Result<bool> {
    match input {
        GameInput::Confirm | GameInput::Pause if !front.started => {
            front.started = true;
            state.toggle_pause();
            info!("game started");
            Ok(true)
        }
        GameInput::Confirm if state.is_finished() => {
            front.previous_high_score = state.high_score();
            state
                .reset(&INITIAL_SNAKE, &INITIAL_FOOD)
                .map_err(io::Error::other)?;
            Ok(true)
        }
        GameInput::Confirm | GameInput::Quit => Ok(false),
        GameInput::Pause => {
            let status = state.toggle_pause();
            info!("pause toggled, now {status:?}");
            Ok(false)
        }
        GameInput::Direction(key) => {
            if state.update_direction(key) {
                debug!("heading {:?}", state.direction());
            }
            Ok(false)
        }
    }
}

fn log_outcome(state: &GameState, outcome: TickOutcome) {
    if let Some(kind) = outcome.eaten {
        info!(
            "ate {} (score {}, speed {} ms)",
            kind.label(),
            state.score(),
            state.speed()
        );
    }
}
