//! Shared entity data
//!
//! Positions, movement directions and clamped health pools.

use serde::{Deserialize, Serialize};

// ============================================================================
// Position & Movement
// ============================================================================

/// Position on the grid (`x` is the column, `y` is the row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step away in `dir`
    pub fn step(&self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Direction of a cardinal neighbour, if `other` is one
    pub fn direction_to(&self, other: &Position) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| self.step(*dir) == *other)
    }
}

/// One of the four cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enemy candidate order
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Player attack scan order
    pub const ATTACK_SCAN: [Direction; 4] =
        [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    /// (dx, dy) unit step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

// ============================================================================
// Combat Stats
// ============================================================================

/// Health pool clamped to `0..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Returns the damage actually taken
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Returns the amount actually healed
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps() {
        let mut health = Health::new(100);
        assert_eq!(health.take_damage(130), 100);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());

        assert_eq!(health.heal(250), 100);
        assert_eq!(health.current, 100);
        assert_eq!(health.heal(5), 0);
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let mut health = Health::new(50);
        health.take_damage(10);
        assert_eq!(health.take_damage(-10), 0);
        assert_eq!(health.heal(-10), 0);
        assert_eq!(health.current, 40);
    }

    #[test]
    fn test_step_and_direction() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.step(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.direction_to(&Position::new(5, 6)), Some(Direction::Down));
        assert_eq!(pos.direction_to(&Position::new(6, 6)), None);
    }

    #[test]
    fn test_chebyshev_distance() {
        let pos = Position::new(3, 3);
        assert_eq!(pos.chebyshev_distance(&Position::new(4, 4)), 1);
        assert_eq!(pos.chebyshev_distance(&Position::new(5, 4)), 2);
    }
}
