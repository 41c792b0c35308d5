use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use crate::{Board, Direction, IllegalTurn, Tile, TurnOutcome, TILES_AT_START, WIN_TILE};

/// The source of randomness for placing new tiles.
pub trait SpawnSource {
    /// Picks one of `free_cells` empty cells by its index, and decides whether
    /// the new tile is a 4 (`true`, one time in ten) or a 2.
    ///
    /// `free_cells` is never zero.
    fn pick(&mut self, free_cells: usize) -> (usize, bool);
}

impl SpawnSource for StdRng {
    fn pick(&mut self, free_cells: usize) -> (usize, bool) {
        (self.gen_range(0..free_cells), self.gen_ratio(1, 10))
    }
}

/// The state of one game: the board, and whether the game was won or lost.
///
/// A turn consists of [`Self::resolve_turn()`], and if that changed the board,
/// [`Self::finalize_turn()`].
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    win: bool,
    lose: bool,
}

impl Game {
    /// Starts a new game with a few 2s on an otherwise empty board.
    pub fn new(source: &mut impl SpawnSource) -> Self {
        let mut game = Self::from_board(Board::empty());
        for _ in 0..TILES_AT_START {
            game.add_random_tile(source, false);
        }
        game.refresh_win_lose();
        game
    }

    /// Continues a game from an arbitrary board.
    ///
    /// The board may already be won or lost.
    pub fn from_board(board: Board) -> Self {
        let mut game = Self {
            board,
            win: false,
            lose: false,
        };
        game.refresh_win_lose();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Slides all tiles in the given direction, without adding a new tile.
    ///
    /// Returns `Ok(None)` if nothing moved. In that case, the turn is over and
    /// neither [`Self::finalize_turn()`] nor an animation should follow.
    pub fn resolve_turn(
        &mut self,
        direction: Direction,
    ) -> Result<Option<TurnOutcome>, IllegalTurn> {
        if self.is_end() {
            return Err(IllegalTurn::GameEnded);
        }
        let outcome = self.board.slide(direction);
        match &outcome {
            Some(outcome) => {
                debug!(
                    ?direction,
                    merges = outcome.num_merges(),
                    distance = outcome.max_distance(),
                    "Resolved turn"
                );
                self.refresh_win_lose();
            }
            None => trace!(?direction, "Turn did not change the board"),
        }
        Ok(outcome)
    }

    /// Adds a random tile after a turn that changed the board, and returns its
    /// coordinates.
    pub fn finalize_turn(
        &mut self,
        source: &mut impl SpawnSource,
    ) -> Result<(usize, usize), IllegalTurn> {
        let (i, j) = self
            .add_random_tile(source, true)
            .ok_or(IllegalTurn::BoardFull)?;
        self.refresh_win_lose();
        if self.is_end() {
            debug!(win = self.win, lose = self.lose, "Game ended");
        }
        Ok((i, j))
    }

    /// Has the game been won or lost?
    pub fn is_end(&self) -> bool {
        self.win || self.lose
    }

    pub fn is_win(&self) -> bool {
        self.win
    }

    pub fn is_lose(&self) -> bool {
        self.lose
    }

    fn add_random_tile(
        &mut self,
        source: &mut impl SpawnSource,
        allow_four: bool,
    ) -> Option<(usize, usize)> {
        let free_cells = self.board.empty_cells();
        if free_cells.is_empty() {
            return None;
        }
        let (idx, four) = source.pick(free_cells.len());
        let cell = free_cells[idx];
        let tile = if allow_four && four { Tile::T4 } else { Tile::T2 };
        trace!(i = cell.0, j = cell.1, %tile, "Added random tile");
        self.board.set(cell, Some(tile));
        Some(cell)
    }

    // Once set, neither flag is ever cleared.
    fn refresh_win_lose(&mut self) {
        if self.board.contains(WIN_TILE) {
            self.win = true;
        }
        // Only interior cells are checked for equal neighbours, see
        // Board::interior_has_equal_neighbors().
        if !self.win && self.board.is_full() && !self.board.interior_has_equal_neighbors() {
            self.lose = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;

    use super::*;
    use crate::board;

    /// Always picks the same cell index and tile.
    struct FixedSource {
        idx: usize,
        four: bool,
    }

    impl SpawnSource for FixedSource {
        fn pick(&mut self, free_cells: usize) -> (usize, bool) {
            (self.idx.min(free_cells - 1), self.four)
        }
    }

    quickcheck! {
        fn finalize_adds_one_small_tile(board: Board, direction: Direction, seed: u64) -> TestResult {
            let mut game = Game::from_board(board);
            if game.is_end() {
                return TestResult::discard();
            }
            let Ok(Some(_)) = game.resolve_turn(direction) else {
                return TestResult::discard();
            };
            let before = *game.board();
            let mut rng = StdRng::seed_from_u64(seed);
            let (i, j) = game.finalize_turn(&mut rng).unwrap();
            let added = game.board().sum() - before.sum();
            TestResult::from_bool(
                before.get(i, j).is_none()
                    && game.board().num_tiles() == before.num_tiles() + 1
                    && (added == 2 || added == 4)
                    && game.board()[(i, j)].map(Tile::value) == Some(added)
            )
        }

        fn win_iff_winning_tile_present(board: Board) -> bool {
            let game = Game::from_board(board);
            game.is_win() == board.contains(WIN_TILE) && !(game.is_win() && game.is_lose())
        }

        fn lose_follows_interior_rule(board: Board) -> bool {
            let game = Game::from_board(board);
            let expected = !board.contains(WIN_TILE)
                && board.empty_cells().is_empty()
                && !board.interior_has_equal_neighbors();
            game.is_lose() == expected && game.is_end() == (game.is_win() || game.is_lose())
        }
    }

    #[test]
    fn new_game_has_two_twos() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new(&mut rng);
        let tiles: Vec<Tile> = game.board().tiles().map(|(_, _, tile)| tile).collect();
        assert_eq!(tiles, vec![Tile::T2; TILES_AT_START]);
        assert!(!game.is_end());
    }

    #[test]
    fn new_game_is_reproducible() {
        let game_1 = Game::new(&mut StdRng::seed_from_u64(42));
        let game_2 = Game::new(&mut StdRng::seed_from_u64(42));
        assert_eq!(game_1.board(), game_2.board());
    }

    #[test]
    fn random_tile() {
        let board = board![[2, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0]];
        let mut game = Game::from_board(board);
        assert_eq!(game.resolve_turn(Direction::Left), Ok(None));
        let mut source = FixedSource { idx: 0, four: true };
        assert_eq!(game.finalize_turn(&mut source), Ok((0, 1)));
        assert_eq!(
            *game.board(),
            board![[2, 4, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0]]
        );
    }

    #[test]
    fn random_tile_goes_to_picked_free_cell() {
        let board = board![[2, 4, 8, 16], [4, 8, 16, 2], [8, 0, 2, 4], [16, 2, 4, 0]];
        let mut game = Game::from_board(board);
        let mut source = FixedSource { idx: 1, four: false };
        assert_eq!(game.finalize_turn(&mut source), Ok((3, 3)));
        assert_eq!(game.board().get(3, 3), Some(Tile::T2));
    }

    #[test]
    fn lose() {
        let board = board![
            [32, 16, 32, 0],
            [16, 32, 16, 32],
            [32, 16, 32, 16],
            [16, 32, 16, 32],
        ];
        let mut game = Game::from_board(board);
        assert!(!game.is_end());
        assert_eq!(game.resolve_turn(Direction::Left), Ok(None));
        game.finalize_turn(&mut FixedSource { idx: 0, four: false })
            .unwrap();
        assert!(game.is_lose());
        assert!(!game.is_win());
        assert!(game.is_end());
    }

    #[test]
    fn checkerboard_is_lost() {
        let game = Game::from_board(board![
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(game.is_lose());
        assert!(game.is_end());
    }

    #[test]
    fn lose_ignores_merges_on_the_border() {
        // Sliding left would still merge the two 2s in the top row.
        let board = board![
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ];
        assert!(board.has_legal_move());
        let game = Game::from_board(board);
        assert!(game.is_lose());
    }

    #[test]
    fn win() {
        let game = Game::from_board(board![[0, 2048, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(game.is_win());
        assert!(!game.is_lose());
        assert!(game.is_end());
    }

    #[test]
    fn win_on_full_board_is_not_a_loss() {
        let game = Game::from_board(board![
            [2048, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(game.is_win());
        assert!(!game.is_lose());
    }

    #[test]
    fn merging_into_winning_tile_wins() {
        let mut game = Game::from_board(board![[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(game.resolve_turn(Direction::Right).unwrap().is_some());
        assert!(game.is_win());
        game.finalize_turn(&mut StdRng::seed_from_u64(0)).unwrap();
        assert!(game.is_win());
        assert_eq!(game.resolve_turn(Direction::Left), Err(IllegalTurn::GameEnded));
    }

    #[test]
    fn middle_game() {
        let board = board![[2, 1024, 0, 0], [4, 0, 4, 0], [4, 8, 2, 0], [8, 2, 4, 0]];
        let mut game = Game::from_board(board);
        assert!(game.resolve_turn(Direction::Left).unwrap().is_some());
        game.finalize_turn(&mut StdRng::seed_from_u64(3)).unwrap();
        assert!(!game.is_win());
        assert!(!game.is_lose());
        assert!(!game.is_end());
    }

    #[test]
    fn turn_after_end_fails_without_mutating() {
        let won = board![[2, 2048, 0, 0], [4, 0, 4, 0], [4, 8, 2, 0], [8, 2, 4, 0]];
        let mut game = Game::from_board(won);
        assert_eq!(game.resolve_turn(Direction::Left), Err(IllegalTurn::GameEnded));
        assert_eq!(*game.board(), won);

        let lost = board![[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut game = Game::from_board(lost);
        for direction in Direction::ALL {
            assert_eq!(game.resolve_turn(direction), Err(IllegalTurn::GameEnded));
        }
        assert_eq!(*game.board(), lost);
    }

    #[test]
    fn finalize_on_full_board_fails() {
        let board = board![[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut game = Game::from_board(board);
        assert_eq!(
            game.finalize_turn(&mut StdRng::seed_from_u64(0)),
            Err(IllegalTurn::BoardFull)
        );
    }
}
