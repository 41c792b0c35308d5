use autoplay::{play_game, StrategyKind, Summary};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::Game;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How to choose the direction of each turn
    #[arg(long, value_enum, default_value_t = StrategyKind::Greedy)]
    strategy: StrategyKind,

    /// Write one JSON object per game to stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, strategy = %args.strategy);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut strategy = args.strategy.build(StdRng::from_rng(&mut rng)?);

    let mut summary = Summary::default();
    for game_idx in 0..args.num_games {
        let game = Game::new(&mut rng);
        let record = play_game(game, strategy.as_mut(), &mut rng)?;
        debug!(game_idx, turns = record.turns, score = record.score);
        if args.json {
            println!("{}", serde_json::to_string(&record)?);
        }
        summary.add(&record);
    }

    eprintln!("{}", summary);
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is reserved for the game records
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
