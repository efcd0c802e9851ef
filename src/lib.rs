//! Rogue - A grid dungeon crawler
//!
//! Carves rooms and passages into a walled grid, scatters potions,
//! swords and enemies, then lets the player fight through them while
//! enemies wander on a fixed tick.

pub mod game;
pub mod world;
pub mod entities;
pub mod systems;
pub mod combat;
pub mod data;
pub mod ui;

// Re-export commonly used types
pub use game::{Game, GameState, SessionError, Snapshot};
pub use entities::{Direction, Position};
pub use world::{CellKind, GridMap};
pub use data::GameConfig;
