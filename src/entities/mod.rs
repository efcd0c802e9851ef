//! Entity data and the registry that owns it

pub mod components;
pub mod player;
pub mod enemies;
pub mod registry;

pub use components::{Direction, Health, Position};
pub use player::Player;
pub use enemies::{Enemy, EnemyId};
pub use registry::EntityRegistry;
