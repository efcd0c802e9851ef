//! Cell kinds
//!
//! A cell kind marks what currently occupies a grid position. Enemy and
//! Player kinds are presence markers; the entity data itself lives in the
//! registry.

use serde::{Deserialize, Serialize};

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Wall,
    Tile,
    Potion,
    Sword,
    Enemy,
    Player,
}

impl CellKind {
    /// Can the player step onto this cell?
    pub fn is_walkable(&self) -> bool {
        !matches!(self, CellKind::Wall | CellKind::Enemy)
    }

    pub fn glyph(&self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Tile => '.',
            CellKind::Potion => '!',
            CellKind::Sword => '/',
            CellKind::Enemy => 'E',
            CellKind::Player => '@',
        }
    }

    /// Inverse of [`CellKind::glyph`]
    pub fn from_glyph(glyph: char) -> Option<CellKind> {
        match glyph {
            '#' => Some(CellKind::Wall),
            '.' => Some(CellKind::Tile),
            '!' => Some(CellKind::Potion),
            '/' => Some(CellKind::Sword),
            'E' => Some(CellKind::Enemy),
            '@' => Some(CellKind::Player),
            _ => None,
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            CellKind::Wall => (130, 110, 90),
            CellKind::Tile => (80, 80, 80),
            CellKind::Potion => (220, 60, 60),
            CellKind::Sword => (180, 200, 255),
            CellKind::Enemy => (200, 60, 200),
            CellKind::Player => (255, 255, 200),
        }
    }

    pub fn bg_color(&self) -> (u8, u8, u8) {
        match self {
            CellKind::Wall => (40, 35, 30),
            _ => (20, 18, 15),
        }
    }
}
