use crate::{Direction, Screen};

/// Turns held direction keys into discrete turns.
///
/// A turn is reported once, on the first poll where exactly one direction
/// key is held. Holding the key, or pressing more keys, does not report
/// anything else until all keys have been released.
#[derive(Clone, Debug, Default)]
pub struct TurnDetector {
    /// A turn was reported and not all keys have been released since.
    latched: bool,
}

impl TurnDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the direction keys once.
    pub fn get_turn(&mut self, screen: &impl Screen) -> Option<Direction> {
        let held: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| screen.is_key_down(direction))
            .collect();
        match held.as_slice() {
            [] => {
                self.latched = false;
                None
            }
            [direction] if !self.latched => {
                self.latched = true;
                Some(*direction)
            }
            _ => None,
        }
    }
}
