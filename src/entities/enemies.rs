//! Enemy entities

use serde::{Deserialize, Serialize};

use super::components::{Health, Position};

/// Stable key of an enemy in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// A wandering melee enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub position: Position,
    /// Cell the enemy last stepped out of, used to avoid backtracking
    pub previous: Option<Position>,
    pub health: Health,
    pub attack: i32,
}

impl Enemy {
    pub fn new(position: Position, max_health: i32, attack: i32) -> Self {
        Self {
            position,
            previous: None,
            health: Health::new(max_health),
            attack,
        }
    }

    /// Commit a step, remembering where we came from
    pub fn move_to(&mut self, to: Position) {
        self.previous = Some(self.position);
        self.position = to;
    }
}
