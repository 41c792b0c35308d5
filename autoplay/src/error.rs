use twenty48::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The engine and the strategy disagree about whether the game can go on.
pub enum StuckGame {
    /// No direction changes the board, but the game has not ended.
    NoMoveLeft { turns: usize },
    /// The strategy chose a direction that does not change the board.
    NoOpMove { turns: usize, direction: Direction },
}

impl std::error::Error for StuckGame {}

impl std::fmt::Display for StuckGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StuckGame::NoMoveLeft { turns } => write!(
                f,
                "No direction changes the board after {} turns, but the game has not ended",
                turns
            ),
            StuckGame::NoOpMove { turns, direction } => write!(
                f,
                "Moving {:?} after {} turns does not change the board",
                direction, turns
            ),
        }
    }
}
