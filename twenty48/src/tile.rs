use serde::{Deserialize, Serialize};

use crate::InvalidTileValue;

/// A tile on the board.
///
/// The variants are ordered by value, and merging two equal tiles produces
/// the next variant. An empty cell is represented by the absence of a tile,
/// i.e. `Option<Tile>::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
#[repr(u8)]
pub enum Tile {
    T2,
    T4,
    T8,
    T16,
    T32,
    T64,
    T128,
    T256,
    T512,
    T1024,
    T2048,
}

/// Reaching this tile wins the game.
pub const WIN_TILE: Tile = Tile::T2048;

impl Tile {
    pub const ALL: [Tile; 11] = [
        Tile::T2,
        Tile::T4,
        Tile::T8,
        Tile::T16,
        Tile::T32,
        Tile::T64,
        Tile::T128,
        Tile::T256,
        Tile::T512,
        Tile::T1024,
        Tile::T2048,
    ];

    /// The number written on the tile.
    pub fn value(self) -> u32 {
        2 << (self as u32)
    }

    /// Looks up the tile with the given number on it.
    pub fn from_value(value: u32) -> Option<Tile> {
        Tile::ALL.into_iter().find(|tile| tile.value() == value)
    }

    /// The tile that two tiles of this kind merge into.
    ///
    /// Returns `None` for the largest tile, which can therefore never merge.
    pub fn doubled(self) -> Option<Tile> {
        Tile::ALL.get(self as usize + 1).copied()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<Tile> for u32 {
    fn from(tile: Tile) -> u32 {
        tile.value()
    }
}

impl TryFrom<u32> for Tile {
    type Error = InvalidTileValue;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Tile::from_value(value).ok_or(InvalidTileValue(value))
    }
}
