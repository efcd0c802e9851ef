//! Player entity

use super::components::{Health, Position};

/// The single player of a session
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Position,
    pub health: Health,
    /// Melee damage, raised by swords and never lowered
    pub attack: i32,
}

impl Player {
    pub fn new(position: Position, max_health: i32, attack: i32) -> Self {
        Self {
            position,
            health: Health::new(max_health),
            attack,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}
