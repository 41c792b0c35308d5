use serde::{Deserialize, Serialize};

use crate::{Board, Tile, BOARD_HEIGHT, BOARD_WIDTH};

/// The direction in which all tiles slide during a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Does this turn operate on columns rather than rows?
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// The coordinates of one row or column, starting at the edge that the
    /// tiles slide towards.
    fn line(self, line_idx: usize) -> Vec<(usize, usize)> {
        match self {
            Direction::Left => (0..BOARD_WIDTH).map(|j| (line_idx, j)).collect(),
            Direction::Right => (0..BOARD_WIDTH).rev().map(|j| (line_idx, j)).collect(),
            Direction::Up => (0..BOARD_HEIGHT).map(|i| (i, line_idx)).collect(),
            Direction::Down => (0..BOARD_HEIGHT).rev().map(|i| (i, line_idx)).collect(),
        }
    }

    fn num_lines(self) -> usize {
        if self.is_vertical() {
            BOARD_WIDTH
        } else {
            BOARD_HEIGHT
        }
    }
}

/// The motion of a single tile during a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Coordinates before the turn.
    pub from: (usize, usize),
    /// Coordinates after the turn.
    pub to: (usize, usize),
    /// The tile that is moving.
    ///
    /// For the two tiles of a merge, this is their value before merging.
    pub tile: Tile,
    /// Does this tile end up merged with another one?
    pub merge: bool,
}

impl Shift {
    /// How many cells the tile travels.
    pub fn distance(&self) -> usize {
        self.from.0.abs_diff(self.to.0).max(self.from.1.abs_diff(self.to.1))
    }

    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}

/// A tile that was created by a merge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub at: (usize, usize),
    pub tile: Tile,
    /// How far the slower of the two merging tiles travels before they meet.
    pub cells_to_appear: usize,
}

/// Everything that happened during a turn which changed the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// One entry for every tile that was on the board before the turn,
    /// including the ones that did not move.
    pub shifts: Vec<Shift>,
    /// One entry for every merge.
    pub appearances: Vec<Appearance>,
}

impl TurnOutcome {
    /// The longest distance travelled by any tile.
    pub fn max_distance(&self) -> usize {
        self.shifts.iter().map(Shift::distance).max().unwrap_or(0)
    }

    pub fn num_merges(&self) -> usize {
        self.appearances.len()
    }
}

impl Board {
    /// Slides and merges all tiles towards one edge.
    ///
    /// Returns `None` and leaves the board as it was if no tile can move or
    /// merge in this direction. This is the bare rule, without any of the
    /// end-of-game checks that [`Game::resolve_turn()`](crate::Game::resolve_turn)
    /// does.
    pub fn slide(&mut self, direction: Direction) -> Option<TurnOutcome> {
        let mut outcome = TurnOutcome::default();
        let mut changed = false;
        for line_idx in 0..direction.num_lines() {
            changed |= self.slide_line(&direction.line(line_idx), &mut outcome);
        }
        changed.then_some(outcome)
    }

    // Compacts one line towards its first cell and returns whether anything changed.
    fn slide_line(&mut self, line: &[(usize, usize)], outcome: &mut TurnOutcome) -> bool {
        let mut compacted: Vec<Tile> = Vec::with_capacity(line.len());
        // The most recent tile that has not been placed yet, and its index in the line.
        // It is the only tile that the next one can merge with.
        let mut open: Option<(Tile, usize)> = None;
        let mut changed = false;

        for (idx, &cell) in line.iter().enumerate() {
            let Some(tile) = self[cell] else {
                continue;
            };
            let merged = open
                .filter(|&(open_tile, _)| open_tile == tile)
                .and_then(|_| tile.doubled());
            match (open, merged) {
                (Some((_, open_idx)), Some(merged)) => {
                    let target = compacted.len();
                    compacted.push(merged);
                    for from in [line[open_idx], cell] {
                        outcome.shifts.push(Shift {
                            from,
                            to: line[target],
                            tile,
                            merge: true,
                        });
                    }
                    outcome.appearances.push(Appearance {
                        at: line[target],
                        tile: merged,
                        cells_to_appear: (open_idx - target).max(idx - target),
                    });
                    open = None;
                    changed = true;
                }
                _ => {
                    if let Some((open_tile, open_idx)) = open {
                        changed |= place(&mut compacted, line, outcome, open_tile, open_idx);
                    }
                    open = Some((tile, idx));
                }
            }
        }
        if let Some((open_tile, open_idx)) = open {
            changed |= place(&mut compacted, line, outcome, open_tile, open_idx);
        }

        for (idx, &cell) in line.iter().enumerate() {
            self.set(cell, compacted.get(idx).copied());
        }
        changed
    }
}

// Puts a tile that does not merge into the next free slot. Returns whether it moved.
fn place(
    compacted: &mut Vec<Tile>,
    line: &[(usize, usize)],
    outcome: &mut TurnOutcome,
    tile: Tile,
    idx: usize,
) -> bool {
    let target = compacted.len();
    compacted.push(tile);
    outcome.shifts.push(Shift {
        from: line[idx],
        to: line[target],
        tile,
        merge: false,
    });
    idx != target
}
