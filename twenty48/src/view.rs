use crate::{
    tile_kind, Animation, AnimationConfig, Board, Direction, Screen, SpawnAnimation, TurnDetector,
    TurnOutcome,
};

/// Presents a game on a [`Screen`] and reads turns from it.
#[derive(Clone, Debug, Default)]
pub struct View {
    config: AnimationConfig,
    turn_detector: TurnDetector,
}

impl View {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            turn_detector: TurnDetector::new(),
        }
    }

    /// See [`TurnDetector::get_turn()`].
    pub fn get_turn(&mut self, screen: &impl Screen) -> Option<Direction> {
        self.turn_detector.get_turn(screen)
    }

    /// Draws the board as it is and shows the frame.
    pub fn render(&self, board: &Board, screen: &mut impl Screen) -> anyhow::Result<()> {
        draw_field(board, screen);
        screen.present()
    }

    /// Plays the motion of a turn. Blocks until it's over.
    pub fn animate(&self, outcome: &TurnOutcome, screen: &mut impl Screen) -> anyhow::Result<()> {
        Animation::new(outcome, &self.config).play(screen)
    }

    /// Fades in the tile at `at`, if a spawn time is configured.
    pub fn animate_spawn(
        &self,
        board: &Board,
        at: (usize, usize),
        screen: &mut impl Screen,
    ) -> anyhow::Result<()> {
        match self.config.spawn_time {
            Some(spawn_time) => SpawnAnimation::new(board, at, spawn_time).play(screen),
            None => Ok(()),
        }
    }

    pub fn win_screen(&self, board: &Board, screen: &mut impl Screen) -> anyhow::Result<()> {
        draw_field(board, screen);
        screen.draw_win_message();
        screen.present()
    }

    pub fn lose_screen(&self, board: &Board, screen: &mut impl Screen) -> anyhow::Result<()> {
        draw_field(board, screen);
        screen.draw_lose_message();
        screen.present()
    }
}

fn draw_field(board: &Board, screen: &mut impl Screen) {
    for (i, row) in board.rows().iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if let Some(kind) = tile_kind(cell) {
                screen.draw_tile(i as f32, j as f32, kind, 1.0);
            }
        }
    }
}
