use crate::{Board, BOARD_WIDTH};

const CELL_WIDTH: usize = 5;

pub fn visualize_board(board: &Board) -> String {
    let border = "─".repeat(BOARD_WIDTH * CELL_WIDTH);
    // Draw the top of the box
    let mut result = format!("╭{}╮\n", border);
    for row in board.rows() {
        result += "│";
        for cell in row {
            match cell {
                Some(tile) => result += &format!("{:>width$}", tile.value(), width = CELL_WIDTH),
                None => result += &format!("{:>width$}", "·", width = CELL_WIDTH),
            }
        }
        result += "│\n";
    }
    // Draw the bottom of the box
    result += &format!("╰{}╯", border);
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&visualize_board(self))
    }
}
