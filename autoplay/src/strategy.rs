use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use twenty48::{Board, Direction};

/// Picks the direction for the next turn.
pub trait Strategy {
    /// Returns `None` only if no direction changes the board.
    fn choose(&mut self, board: &Board) -> Option<Direction>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    Random,
    Greedy,
}

impl StrategyKind {
    pub fn build(self, rng: StdRng) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy { rng }),
            StrategyKind::Greedy => Box::new(GreedyStrategy { rng }),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Random => write!(f, "random"),
            StrategyKind::Greedy => write!(f, "greedy"),
        }
    }
}

/// The directions that change the board, with the board after each.
pub fn possible_moves(board: &Board) -> Vec<(Direction, Board)> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            let mut after = *board;
            after.slide(direction).map(|_| (direction, after))
        })
        .collect()
}

pub struct RandomStrategy {
    pub rng: StdRng,
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, board: &Board) -> Option<Direction> {
        possible_moves(board)
            .choose(&mut self.rng)
            .map(|(direction, _)| *direction)
    }
}

/// Leaves as many empty cells as possible.
pub struct GreedyStrategy {
    pub rng: StdRng,
}

impl Strategy for GreedyStrategy {
    fn choose(&mut self, board: &Board) -> Option<Direction> {
        let mut top_choices = Vec::new();
        let mut top_score = 0;
        for (direction, after) in possible_moves(board) {
            let score = after.empty_cells().len();
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => top_choices.push(direction),
                std::cmp::Ordering::Greater => {
                    top_choices = vec![direction];
                    top_score = score;
                }
            }
        }
        top_choices.choose(&mut self.rng).copied()
    }
}
