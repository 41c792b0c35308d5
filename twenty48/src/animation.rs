use crate::{Board, Screen, Shift, TileKind, TurnOutcome, MAX_MOTION_LENGTH};

/// How long a turn takes in which some tile crosses the whole board, in seconds.
pub const MOVE_TIME: f64 = 0.7;
/// How long the random tile takes to fade in, when that is enabled.
pub const SPAWN_TIME: f64 = 0.15;

/// A new tile starts to fade in when the slowest moving tile is this many
/// cells away from its parents' meeting point, plus one.
const APPEAR_LEAD: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// See [`MOVE_TIME`].
    pub move_time: f64,
    /// Fade-in time of the random tile added after each turn. If `None`, the
    /// tile just shows up in the next frame.
    pub spawn_time: Option<f64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            move_time: MOVE_TIME,
            spawn_time: None,
        }
    }
}

/// One tile as it should be drawn in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub row: f32,
    pub col: f32,
    pub kind: TileKind,
    pub opacity: f32,
}

impl Sprite {
    fn draw(&self, screen: &mut impl Screen) {
        screen.draw_tile(self.row, self.col, self.kind, self.opacity);
    }
}

/// The motion of the tiles during one turn.
///
/// The animation is a function of the time since it started: [`Self::frame()`]
/// says what to draw at any point in time, and [`Self::play()`] runs it on a
/// screen until it is over.
///
/// Tiles move at a constant speed, so a turn in which no tile moves further
/// than one cell is over sooner than a turn where one crosses the board.
#[derive(Clone, Debug)]
pub struct Animation<'a> {
    outcome: &'a TurnOutcome,
    max_distance: usize,
    duration: f64,
}

impl<'a> Animation<'a> {
    pub fn new(outcome: &'a TurnOutcome, config: &AnimationConfig) -> Self {
        let max_distance = outcome.max_distance();
        let duration = config.move_time * max_distance as f64 / MAX_MOTION_LENGTH as f64;
        Self {
            outcome,
            max_distance,
            duration,
        }
    }

    /// In seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.duration
    }

    /// The tiles to draw `elapsed` seconds after the start of the animation.
    ///
    /// Every shift is drawn, followed by the merged tiles that have started to
    /// appear.
    pub fn frame(&self, elapsed: f64) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(self.outcome.shifts.len());
        for shift in &self.outcome.shifts {
            let (row, col, remaining) = self.shift_position(shift, elapsed);
            // The two tiles of a merge fade out as they approach each other
            let opacity = if shift.merge { remaining } else { 1.0 };
            sprites.push(Sprite {
                row: row as f32,
                col: col as f32,
                kind: shift.tile.into(),
                opacity: opacity as f32,
            });
        }

        let cells_moved = self.cells_moved(elapsed);
        for appearance in &self.outcome.appearances {
            let cells_to_appear = appearance.cells_to_appear as f64;
            if cells_moved + APPEAR_LEAD > cells_to_appear {
                let opacity = (cells_moved - cells_to_appear + 1.0).clamp(0.0, 1.0);
                sprites.push(Sprite {
                    row: appearance.at.0 as f32,
                    col: appearance.at.1 as f32,
                    kind: appearance.tile.into(),
                    opacity: opacity as f32,
                });
            }
        }
        sprites
    }

    /// Draws frames until the animation is over, using the screen's clock.
    ///
    /// This blocks for [`Self::duration()`] seconds.
    pub fn play(&self, screen: &mut impl Screen) -> anyhow::Result<()> {
        play_frames(screen, self.duration, |elapsed| self.frame(elapsed))
    }

    /// How far the tile with the longest way has come.
    fn cells_moved(&self, elapsed: f64) -> f64 {
        if self.duration > 0.0 {
            elapsed * self.max_distance as f64 / self.duration
        } else {
            self.max_distance as f64
        }
    }

    // Returns the row, column and how much of its way the tile still has ahead, from 1 to 0.
    fn shift_position(&self, shift: &Shift, elapsed: f64) -> (f64, f64, f64) {
        let (i_from, j_from) = (shift.from.0 as f64, shift.from.1 as f64);
        let (i_to, j_to) = (shift.to.0 as f64, shift.to.1 as f64);
        if shift.is_stationary() {
            return (i_to, j_to, 1.0);
        }
        // Each tile moves at the same speed, so shorter ways finish earlier
        let own_duration = self.duration * shift.distance() as f64 / self.max_distance as f64;
        if elapsed >= own_duration {
            return (i_to, j_to, 0.0);
        }
        let progress = elapsed / own_duration;
        // Only one of the coordinates actually changes
        (
            i_from + (i_to - i_from) * progress,
            j_from + (j_to - j_from) * progress,
            1.0 - progress,
        )
    }
}

/// The random tile fading in while the rest of the board stands still.
#[derive(Clone, Debug)]
pub struct SpawnAnimation<'a> {
    board: &'a Board,
    at: (usize, usize),
    duration: f64,
}

impl<'a> SpawnAnimation<'a> {
    /// `board` already contains the new tile at `at`.
    pub fn new(board: &'a Board, at: (usize, usize), duration: f64) -> Self {
        Self { board, at, duration }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn frame(&self, elapsed: f64) -> Vec<Sprite> {
        self.board
            .tiles()
            .map(|(i, j, tile)| {
                let opacity = if (i, j) == self.at && self.duration > 0.0 {
                    (elapsed / self.duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                Sprite {
                    row: i as f32,
                    col: j as f32,
                    kind: tile.into(),
                    opacity: opacity as f32,
                }
            })
            .collect()
    }

    pub fn play(&self, screen: &mut impl Screen) -> anyhow::Result<()> {
        play_frames(screen, self.duration, |elapsed| self.frame(elapsed))
    }
}

// Busy loop: one frame per iteration, as fast as the screen presents them.
fn play_frames(
    screen: &mut impl Screen,
    duration: f64,
    frame: impl Fn(f64) -> Vec<Sprite>,
) -> anyhow::Result<()> {
    let start = screen.now();
    let mut elapsed = 0.0;
    while elapsed < duration {
        for sprite in frame(elapsed) {
            sprite.draw(screen);
        }
        screen.present()?;
        elapsed = screen.now() - start;
    }
    Ok(())
}
