mod error;
mod game;
mod strategy;
mod summary;
pub use error::*;
pub use game::*;
pub use strategy::*;
pub use summary::*;
