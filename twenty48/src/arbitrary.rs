use crate::{Board, Direction, Tile, BOARD_HEIGHT, BOARD_WIDTH};

impl quickcheck::Arbitrary for Tile {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Tile::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}

// Mostly small tiles, so that merges are common. The winning tile is rare,
// and about one board in four is full.
impl quickcheck::Arbitrary for Board {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let full = u8::arbitrary(g) % 4 == 0;
        let mut cells = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                if !full && bool::arbitrary(g) {
                    continue;
                }
                let tile = match u8::arbitrary(g) % 16 {
                    0..=5 => Tile::T2,
                    6..=10 => Tile::T4,
                    11..=13 => Tile::T8,
                    14 => *g.choose(&Tile::ALL[3..10]).unwrap(),
                    _ => {
                        if u8::arbitrary(g) % 8 == 0 {
                            Tile::T2048
                        } else {
                            Tile::T16
                        }
                    }
                };
                *cell = Some(tile);
            }
        }
        Board::new(cells)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Remove one tile at a time
        let board = *self;
        Box::new(board.tiles().collect::<Vec<_>>().into_iter().map(move |(i, j, _)| {
            let mut smaller = board;
            smaller.set((i, j), None);
            smaller
        }))
    }
}
