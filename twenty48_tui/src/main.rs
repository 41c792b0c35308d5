use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::{run_game, AnimationConfig, MOVE_TIME};

mod terminal;

use terminal::TerminalScreen;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds a tile takes to cross the whole board
    #[arg(long, default_value_t = MOVE_TIME)]
    move_time: f64,

    /// Fade in new tiles over this many seconds
    #[arg(long)]
    spawn_time: Option<f64>,

    /// Write logs to this file. The terminal is taken by the game, so there
    /// is no logging without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(File::create(path)?, args.log_level);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let config = AnimationConfig {
        move_time: args.move_time,
        spawn_time: args.spawn_time,
    };

    let mut screen = TerminalScreen::new()?;
    let result = run_game(&mut screen, &mut rng, config);
    // Restore the terminal even if the game failed
    screen.restore()?;
    let game = result?;

    println!("{}", game.board());
    let outcome = if game.is_win() {
        "won"
    } else if game.is_lose() {
        "lost"
    } else {
        "unfinished"
    };
    println!(
        "Game {} with a score of {} (seed {})",
        outcome,
        game.board().sum(),
        seed
    );
    Ok(())
}

fn initialize_logging(file: File, level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}
