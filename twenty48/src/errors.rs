/// The error type for [`Game::resolve_turn()`](crate::Game::resolve_turn) and
/// [`Game::finalize_turn()`](crate::Game::finalize_turn).
///
/// Both variants mean that the caller did not follow the turn sequence: check
/// [`Game::is_end()`](crate::Game::is_end) before resolving a turn, and only
/// finalize a turn that changed the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalTurn {
    GameEnded,
    BoardFull,
}

impl std::error::Error for IllegalTurn {}

impl std::fmt::Display for IllegalTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalTurn::GameEnded => write!(f, "Tried to make a turn after the game has ended"),
            IllegalTurn::BoardFull => write!(f, "Tried to add a random tile, but the board is full"),
        }
    }
}

/// The error type for building a [`Tile`](crate::Tile) from a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidTileValue(pub u32);

impl std::error::Error for InvalidTileValue {}

impl std::fmt::Display for InvalidTileValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not the value of a tile", self.0)
    }
}
