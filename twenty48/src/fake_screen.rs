use std::cell::Cell;

use crate::{Direction, Screen, Sprite, TileKind};

/// A screen that records what is drawn, plays back a script of held keys and
/// has a clock that advances by a fixed step whenever it is read.
pub struct FakeScreen {
    time: Cell<f64>,
    tick: f64,
    /// The keys held down after each call to `poll_events()`. The screen
    /// closes when the script is exhausted.
    script: Vec<Vec<Direction>>,
    held: Vec<Direction>,
    polls: usize,
    /// Everything drawn since the start, across frames.
    pub draws: Vec<Sprite>,
    pub frames: usize,
    pub win_messages: usize,
    pub lose_messages: usize,
}

impl FakeScreen {
    pub fn new(tick: f64) -> Self {
        Self::with_script(tick, Vec::new())
    }

    pub fn with_script(tick: f64, script: Vec<Vec<Direction>>) -> Self {
        Self {
            time: Cell::new(0.0),
            tick,
            script,
            held: Vec::new(),
            polls: 0,
            draws: Vec::new(),
            frames: 0,
            win_messages: 0,
            lose_messages: 0,
        }
    }

    pub fn hold(&mut self, keys: &[Direction]) {
        self.held = keys.to_vec();
    }
}

impl Screen for FakeScreen {
    fn is_key_down(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    fn draw_tile(&mut self, row: f32, col: f32, kind: TileKind, opacity: f32) {
        self.draws.push(Sprite {
            row,
            col,
            kind,
            opacity,
        });
    }

    fn draw_win_message(&mut self) {
        self.win_messages += 1;
    }

    fn draw_lose_message(&mut self) {
        self.lose_messages += 1;
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn now(&self) -> f64 {
        let now = self.time.get();
        self.time.set(now + self.tick);
        now
    }

    fn poll_events(&mut self) -> anyhow::Result<()> {
        self.held = self.script.get(self.polls).cloned().unwrap_or_default();
        self.polls += 1;
        Ok(())
    }

    fn closed(&self) -> bool {
        self.polls >= self.script.len()
    }
}
