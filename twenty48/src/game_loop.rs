use tracing::{debug, info};

use crate::{AnimationConfig, Game, Screen, SpawnSource, View};

/// Plays a new game on the screen until the screen is closed.
///
/// Returns the game as it was when the screen closed.
pub fn run_game(
    screen: &mut impl Screen,
    source: &mut impl SpawnSource,
    config: AnimationConfig,
) -> anyhow::Result<Game> {
    let mut game = Game::new(source);
    let mut view = View::new(config);
    play(&mut game, &mut view, screen, source)?;
    Ok(game)
}

/// The main loop: poll input, play a turn if there is one, draw.
///
/// Input is not polled while a turn is being animated. After the game has
/// ended, the final screen is shown until the screen is closed.
pub fn play(
    game: &mut Game,
    view: &mut View,
    screen: &mut impl Screen,
    source: &mut impl SpawnSource,
) -> anyhow::Result<()> {
    info!("Starting game");
    let mut turns = 0usize;
    while !screen.closed() {
        screen.poll_events()?;

        if !game.is_end() {
            if let Some(direction) = view.get_turn(screen) {
                if let Some(outcome) = game.resolve_turn(direction)? {
                    let spawned = game.finalize_turn(source)?;
                    turns += 1;
                    view.animate(&outcome, screen)?;
                    view.animate_spawn(game.board(), spawned, screen)?;
                    debug!(turns, "\n{}", game.board());
                }
            }
            view.render(game.board(), screen)?;
        } else if game.is_win() {
            view.win_screen(game.board(), screen)?;
        } else {
            view.lose_screen(game.board(), screen)?;
        }
    }
    info!(turns, win = game.is_win(), lose = game.is_lose(), "Screen closed");
    Ok(())
}
