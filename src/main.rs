//! Brickfall entry point
//!
//! Terminal front end: plays a session with the autopilot, rendering text
//! frames, and manages the save and score history files.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use brickfall::autopilot::Autopilot;
use brickfall::persistence::SaveStore;
use brickfall::platform::{
    Clock, ManualClock, PauseWindow, RunOptions, StopReason, SystemClock, run_session,
};
use brickfall::renderer::TextRenderer;
use brickfall::{Game, Settings};

const SCREEN_COLS: usize = 80;
const SCREEN_ROWS: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "brickfall")]
#[command(about = "Single-screen brick-breaking game with save/resume and score history")]
struct Cli {
    /// Directory holding save.json and history.json
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// JSON settings file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a brand-new session (discards any saved game)
    New(PlayArgs),
    /// Resume the saved session, or start a new one if there is none
    Resume(PlayArgs),
    /// Show the most recent final scores
    History,
    /// Delete the saved session
    Clear,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Stop after this many ticks without saving. A paddle that never misses
    /// can keep a 45° ball on the same path forever, so there is always a cap.
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,
    /// Quit after this many ticks, saving the unfinished session
    #[arg(long)]
    quit_after: Option<u64>,
    /// Draw a text frame every N ticks (final frame is always drawn)
    #[arg(long)]
    render_every: Option<u64>,
    /// Pause the session once this many ticks have run
    #[arg(long, requires = "pause_for")]
    pause_at: Option<u64>,
    /// Tick slots to stay paused before resuming
    #[arg(long, requires = "pause_at")]
    pause_for: Option<u64>,
    /// Pace ticks with the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Leave the paddle alone instead of letting the autopilot play
    #[arg(long)]
    no_autopilot: bool,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let store = SaveStore::new(&cli.data_dir);
    log::info!("Brickfall starting (data dir {})", store.dir().display());

    match cli.command {
        Commands::New(args) => {
            let mut game = Game::new(settings, store);
            game.new_session().context("starting a new session")?;
            play(&mut game, &args)
        }
        Commands::Resume(args) => {
            let mut game = Game::new(settings, store);
            let resumed = game
                .resume_session()
                .context("resuming the saved session")?;
            if resumed {
                println!("Resumed saved game.");
            } else {
                println!("No saved game to resume, starting a new one.");
            }
            play(&mut game, &args)
        }
        Commands::History => {
            let history = store.load_history(settings.history_len);
            if history.is_empty() {
                println!("No scores recorded.");
            } else {
                for score in history.scores() {
                    println!("{score}");
                }
            }
            Ok(())
        }
        Commands::Clear => {
            if store.clear_snapshot()? {
                println!("Saved game deleted.");
            } else {
                println!("No saved game.");
            }
            Ok(())
        }
    }
}

fn play(game: &mut Game, args: &PlayArgs) -> Result<()> {
    let options = RunOptions {
        max_ticks: Some(args.max_ticks),
        quit_after: args.quit_after,
        render_every: args.render_every,
        pause: args
            .pause_at
            .zip(args.pause_for)
            .map(|(at, ticks)| PauseWindow { at, ticks }),
    };
    let mut clock: Box<dyn Clock> = if args.realtime {
        Box::new(SystemClock::new())
    } else {
        Box::new(ManualClock::new())
    };
    let mut renderer = TextRenderer::new(io::stdout(), SCREEN_COLS, SCREEN_ROWS);
    let autopilot = (!args.no_autopilot).then(Autopilot::default);

    let summary = run_session(
        game,
        clock.as_mut(),
        &mut renderer,
        autopilot.as_ref(),
        &options,
    )
    .context("running the session")?;

    match summary.reason {
        StopReason::Ended => println!("Session over: {:?}", summary.phase),
        StopReason::Quit { saved: true } => println!("Game saved, resume it later."),
        StopReason::Quit { saved: false } => println!("Nothing to save."),
        StopReason::MaxTicks => println!("Tick limit reached."),
        StopReason::NotRunning => println!("No session running."),
    }
    println!(
        "Ticks: {}  Score: {}  Lives: {}  Bricks destroyed: {}",
        summary.ticks, summary.score, summary.lives, summary.bricks_destroyed
    );
    if summary.paused_ticks > 0 {
        println!("Paused for {} ticks", summary.paused_ticks);
    }
    Ok(())
}
