//! World module
//!
//! Contains the grid map, cell kinds, and procedural generation.

pub mod map;
pub mod tile;
pub mod generation;

pub use map::GridMap;
pub use tile::CellKind;
pub use generation::{generate_dungeon, Dungeon, DungeonGenerator, GenerationError};
