//! Simulation systems
//!
//! Logic that mutates the grid and the entity registry together.

pub mod movement;

pub use movement::{move_enemies, move_player, MoveOutcome};
