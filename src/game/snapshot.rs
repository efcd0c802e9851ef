//! Read-only view of a session for renderers

use super::state::GameState;
use crate::entities::{EnemyId, Health, Position};
use crate::world::CellKind;

/// One entity as a renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    /// `None` for the player
    pub id: Option<EnemyId>,
    pub position: Position,
    pub health: Health,
    pub attack: i32,
}

impl EntitySnapshot {
    /// Health as a fraction of the entity's cap, for health bars
    pub fn health_fraction(&self) -> f32 {
        self.health.percentage()
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub rows: i32,
    pub cols: i32,
    /// Row-major cell kinds
    pub cells: Vec<CellKind>,
    pub player: Option<EntitySnapshot>,
    pub enemies: Vec<EntitySnapshot>,
    pub state: GameState,
    pub tick: u64,
}

impl Snapshot {
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.cols || pos.y >= self.rows {
            return None;
        }
        self.cells.get((pos.y * self.cols + pos.x) as usize).copied()
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&EntitySnapshot> {
        self.enemies.iter().find(|e| e.position == pos)
    }
}
