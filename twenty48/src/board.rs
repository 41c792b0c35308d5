use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{Direction, InvalidTileValue, Tile};

/// Number of columns.
pub const BOARD_WIDTH: usize = 4;
/// Number of rows.
pub const BOARD_HEIGHT: usize = 4;
/// How many tiles a new game starts with.
pub const TILES_AT_START: usize = 2;
/// The longest distance a tile can travel in one turn, in cells.
pub const MAX_MOTION_LENGTH: usize = if BOARD_WIDTH > BOARD_HEIGHT {
    BOARD_WIDTH - 1
} else {
    BOARD_HEIGHT - 1
};

/// The playing field.
///
/// Cells are addressed by `(i, j)`, where `i` is the row (counted from the top)
/// and `j` the column (counted from the left).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    pub fn new(cells: [[Option<Tile>; BOARD_WIDTH]; BOARD_HEIGHT]) -> Self {
        Self { cells }
    }

    /// A board without any tiles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a board from the numbers on the tiles, with 0 for an empty cell.
    pub fn from_values(
        values: [[u32; BOARD_WIDTH]; BOARD_HEIGHT],
    ) -> Result<Self, InvalidTileValue> {
        let mut board = Self::empty();
        for (i, row) in values.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value != 0 {
                    board.cells[i][j] = Some(Tile::try_from(value)?);
                }
            }
        }
        Ok(board)
    }

    /// The numbers on the tiles, with 0 for an empty cell.
    pub fn to_values(&self) -> [[u32; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells
            .map(|row| row.map(|cell| cell.map(Tile::value).unwrap_or(0)))
    }

    pub fn rows(&self) -> &[[Option<Tile>; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }

    /// Panics if `(i, j)` is outside of the board.
    pub fn get(&self, i: usize, j: usize) -> Option<Tile> {
        assert!(i < BOARD_HEIGHT && j < BOARD_WIDTH, "({}, {}) is off the board", i, j);
        self.cells[i][j]
    }

    pub(crate) fn set(&mut self, (i, j): (usize, usize), cell: Option<Tile>) {
        self.cells[i][j] = cell;
    }

    /// All tiles with their coordinates, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(j, cell)| cell.map(|tile| (i, j, tile)))
        })
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        for i in 0..BOARD_HEIGHT {
            for j in 0..BOARD_WIDTH {
                if self.cells[i][j].is_none() {
                    result.push((i, j));
                }
            }
        }
        result
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles().any(|(_, _, t)| t == tile)
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles().count()
    }

    /// The sum of the numbers on all tiles.
    pub fn sum(&self) -> u32 {
        self.tiles().map(|(_, _, tile)| tile.value()).sum()
    }

    pub fn max_tile(&self) -> Option<Tile> {
        self.tiles().map(|(_, _, tile)| tile).max()
    }

    /// Whether any cell away from the border has an orthogonal neighbour with
    /// the same contents.
    ///
    /// Border cells only take part as neighbours of interior cells, so two
    /// equal tiles that are both on the border are not detected. This is
    /// weaker than [`Self::has_legal_move()`] and is what the lose condition
    /// is based on.
    pub fn interior_has_equal_neighbors(&self) -> bool {
        for i in 1..BOARD_HEIGHT - 1 {
            for j in 1..BOARD_WIDTH - 1 {
                let cell = self.cells[i][j];
                if cell == self.cells[i + 1][j]
                    || cell == self.cells[i][j + 1]
                    || cell == self.cells[i - 1][j]
                    || cell == self.cells[i][j - 1]
                {
                    return true;
                }
            }
        }
        false
    }

    /// Would sliding in any direction change the board?
    pub fn has_legal_move(&self) -> bool {
        Direction::ALL.into_iter().any(|direction| {
            let mut board = *self;
            board.slide(direction).is_some()
        })
    }
}

impl Index<(usize, usize)> for Board {
    type Output = Option<Tile>;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.cells[i][j]
    }
}

/// Shorthand for creating a board from rows of tile numbers, with 0 for an
/// empty cell.
///
/// This macro is just calling [`Board::from_values()`](crate::Board::from_values)
/// and panics on numbers that are not tile values.
/// ```
/// # use twenty48::{board, Tile};
/// let board = board![
///     [0, 0, 2, 2],
///     [0, 4, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 2048],
/// ];
/// assert_eq!(board.get(1, 1), Some(Tile::T4));
/// assert_eq!(board.get(3, 3), Some(Tile::T2048));
/// assert_eq!(board.get(0, 0), None);
/// ```
#[macro_export]
macro_rules! board {
    ($([$($value:expr),* $(,)?]),* $(,)?) => {
        $crate::Board::from_values([$([$($value),*]),*])
            .expect("Invalid tile value given to board! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use board;
