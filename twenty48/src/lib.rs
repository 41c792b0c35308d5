//! The 2048 sliding tile game: rules, turn resolution and animation.
//!
//! Rendering and input are left to an implementation of [`Screen`].
pub use animation::*;
pub use board::*;
pub use errors::*;
pub use game::*;
pub use game_loop::*;
pub use input::*;
pub use screen::*;
pub use tile::*;
pub use turn::*;
pub use view::*;
pub use visualization::*;

mod animation;
#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
#[cfg(test)]
mod fake_screen;
mod game;
mod game_loop;
mod input;
mod screen;
mod tile;
mod turn;
mod view;
mod visualization;
