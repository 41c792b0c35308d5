use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use twenty48::{Board, Game, Tile};

use crate::error::StuckGame;
use crate::strategy::Strategy;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub turns: usize,
    pub won: bool,
    pub lost: bool,
    /// The game was flagged as lost although some direction would still have
    /// changed the board, through a merge on the border.
    pub premature_loss: bool,
    pub best_tile: Option<Tile>,
    pub score: u32,
    pub board: Board,
}

/// Plays the game to its end with the given strategy.
///
/// Returns an error if the strategy and the engine disagree about whether
/// the game can go on.
pub fn play_game(
    mut game: Game,
    strategy: &mut dyn Strategy,
    rng: &mut StdRng,
) -> anyhow::Result<GameRecord> {
    let mut turns = 0;
    while !game.is_end() {
        let direction = strategy
            .choose(game.board())
            .ok_or(StuckGame::NoMoveLeft { turns })?;
        if game.resolve_turn(direction)?.is_none() {
            return Err(StuckGame::NoOpMove { turns, direction }.into());
        }
        let (i, j) = game.finalize_turn(rng)?;
        trace!(turns, ?direction, i, j);
        turns += 1;
    }

    let board = *game.board();
    let record = GameRecord {
        turns,
        won: game.is_win(),
        lost: game.is_lose(),
        premature_loss: game.is_lose() && board.has_legal_move(),
        best_tile: board.max_tile(),
        score: board.sum(),
        board,
    };
    debug!(
        turns,
        won = record.won,
        best_tile = record.best_tile.map(Tile::value),
        "Game over\n{}",
        board
    );
    Ok(record)
}
