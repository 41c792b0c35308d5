use crate::{Direction, Tile};

/// What a [`Screen`] knows how to draw.
///
/// This is the display's own set of tile kinds. It is joined to the engine's
/// [`Tile`] by the `From<Tile>` impl, and nowhere else.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Two,
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
    SixtyFour,
    OneHundredTwentyEight,
    TwoHundredFiftySix,
    FiveHundredTwelve,
    OneThousandTwentyFour,
    TwoThousandFortyEight,
}

impl TileKind {
    /// The text printed on the tile.
    pub fn label(self) -> &'static str {
        match self {
            TileKind::Two => "2",
            TileKind::Four => "4",
            TileKind::Eight => "8",
            TileKind::Sixteen => "16",
            TileKind::ThirtyTwo => "32",
            TileKind::SixtyFour => "64",
            TileKind::OneHundredTwentyEight => "128",
            TileKind::TwoHundredFiftySix => "256",
            TileKind::FiveHundredTwelve => "512",
            TileKind::OneThousandTwentyFour => "1024",
            TileKind::TwoThousandFortyEight => "2048",
        }
    }
}

impl From<Tile> for TileKind {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::T2 => TileKind::Two,
            Tile::T4 => TileKind::Four,
            Tile::T8 => TileKind::Eight,
            Tile::T16 => TileKind::Sixteen,
            Tile::T32 => TileKind::ThirtyTwo,
            Tile::T64 => TileKind::SixtyFour,
            Tile::T128 => TileKind::OneHundredTwentyEight,
            Tile::T256 => TileKind::TwoHundredFiftySix,
            Tile::T512 => TileKind::FiveHundredTwelve,
            Tile::T1024 => TileKind::OneThousandTwentyFour,
            Tile::T2048 => TileKind::TwoThousandFortyEight,
        }
    }
}

/// The tile kind to draw for a cell, if anything is drawn at all.
pub fn tile_kind(cell: Option<Tile>) -> Option<TileKind> {
    cell.map(TileKind::from)
}

/// Everything the game needs from the outside world: keyboard state, a way
/// to draw tiles and messages, and a clock.
///
/// Drawing calls go into a frame that is shown by [`Self::present()`].
pub trait Screen {
    /// Is the key for this direction currently held down?
    fn is_key_down(&self, direction: Direction) -> bool;

    /// Draws one tile. `row` and `col` are cell coordinates and can be
    /// fractional while a tile is moving. `opacity` is between 0 and 1.
    fn draw_tile(&mut self, row: f32, col: f32, kind: TileKind, opacity: f32);

    fn draw_win_message(&mut self);

    fn draw_lose_message(&mut self);

    /// Shows everything drawn since the last call and starts a new frame.
    fn present(&mut self) -> anyhow::Result<()>;

    /// Monotonic time in seconds.
    fn now(&self) -> f64;

    /// Processes pending window and keyboard events.
    fn poll_events(&mut self) -> anyhow::Result<()>;

    /// Has the player asked to quit?
    fn closed(&self) -> bool;
}
