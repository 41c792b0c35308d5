use autoplay::{play_game, GameRecord, StrategyKind, Summary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use twenty48::Game;

fn play_batch(kind: StrategyKind, seed: u64, num_games: usize) -> Vec<GameRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut strategy = kind.build(StdRng::seed_from_u64(seed + 1));
    (0..num_games)
        .map(|_| {
            let game = Game::new(&mut rng);
            play_game(game, strategy.as_mut(), &mut rng).unwrap()
        })
        .collect()
}

#[test]
fn batches_are_reproducible() {
    for kind in [StrategyKind::Random, StrategyKind::Greedy] {
        assert_eq!(play_batch(kind, 3, 5), play_batch(kind, 3, 5));
    }
}

#[test]
fn summary_counts_every_game() {
    let records = play_batch(StrategyKind::Greedy, 8, 10);
    let mut summary = Summary::default();
    for record in &records {
        summary.add(record);
    }
    assert_eq!(summary.games, 10);
    assert_eq!(summary.wins + summary.losses, 10);
    assert!(summary.premature_losses <= summary.losses);
    assert_eq!(summary.best_tiles.values().sum::<usize>(), 10);
    assert_eq!(
        summary.total_turns,
        records.iter().map(|record| record.turns).sum::<usize>()
    );
}

#[test]
fn records_are_json_lines() {
    for record in play_batch(StrategyKind::Random, 21, 3) {
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains('\n'));
        let parsed: GameRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }
}
