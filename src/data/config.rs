//! RON config loader
//!
//! Every field has a default matching the classic layout, so a config
//! file only needs to name the values it changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub rooms: RoomConfig,
    pub passages: PassageConfig,
    pub items: ItemConfig,
    pub stats: StatsConfig,
    /// Milliseconds between enemy phases
    pub tick_interval_ms: u64,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    /// Pixel size of one cell, only meaningful to graphical renderers
    pub cell_px: u32,
}

/// Room placement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Inclusive range of rooms per dungeon
    pub count: (u32, u32),
    /// Inclusive range of room heights (rows)
    pub height: (i32, i32),
    /// Inclusive range of room widths (columns)
    pub width: (i32, i32),
    /// Anchor samples tried per room before giving up
    pub placement_attempts: u32,
}

/// Full-length passage parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageConfig {
    /// Inclusive range of passages per orientation
    pub count: (u32, u32),
    /// Minimum distance between two passages of the same orientation
    pub min_spacing: i32,
    pub sample_attempts: u32,
}

/// How many of each marker to scatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub potions: u32,
    pub swords: u32,
    pub enemies: u32,
    pub players: u32,
    /// Random samples tried per marker before falling back to a scan
    pub scatter_attempts: u32,
}

/// Entity stats and item effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub player_health: i32,
    pub player_attack: i32,
    pub enemy_health: i32,
    pub enemy_attack: i32,
    pub max_enemies: usize,
    pub potion_heal: i32,
    pub sword_bonus: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            rooms: RoomConfig::default(),
            passages: PassageConfig::default(),
            items: ItemConfig::default(),
            stats: StatsConfig::default(),
            tick_interval_ms: 1000,
            seed: None,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 24, cols: 40, cell_px: 25 }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            count: (5, 10),
            height: (3, 8),
            width: (3, 8),
            placement_attempts: 500,
        }
    }
}

impl Default for PassageConfig {
    fn default() -> Self {
        Self {
            count: (3, 5),
            min_spacing: 3,
            sample_attempts: 500,
        }
    }
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            potions: 10,
            swords: 2,
            enemies: 10,
            players: 1,
            scatter_attempts: 2000,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            player_health: 100,
            player_attack: 10,
            enemy_health: 50,
            enemy_attack: 15,
            max_enemies: 10,
            potion_heal: 20,
            sword_bonus: 10,
        }
    }
}

impl GameConfig {
    /// Parse a config from RON text and validate it
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Load a config file, falling back to defaults if it is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}. Using defaults.", e);
            Self::default()
        })
    }

    /// Interval between enemy phases
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that the values describe a dungeon that can be generated and played
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let GridConfig { rows, cols, .. } = self.grid;
        if rows < 3 || cols < 3 {
            return invalid(format!("grid {}x{} is smaller than 3x3", rows, cols));
        }

        let rooms = &self.rooms;
        if rooms.count.0 > rooms.count.1 {
            return invalid(format!("room count range {:?} is inverted", rooms.count));
        }
        for (axis, (min, max), limit) in [("height", rooms.height, rows), ("width", rooms.width, cols)] {
            if min < 1 || min > max {
                return invalid(format!("room {} range ({}, {}) is empty", axis, min, max));
            }
            // The room and its wall ring have to fit inside the grid
            if max + 2 > limit {
                return invalid(format!("room {} {} does not fit a grid of {}", axis, max, limit));
            }
        }
        if rooms.placement_attempts == 0 {
            return invalid("room placement_attempts must be positive".to_string());
        }

        let passages = &self.passages;
        if passages.count.0 > passages.count.1 {
            return invalid(format!("passage count range {:?} is inverted", passages.count));
        }
        if passages.min_spacing < 1 {
            return invalid("passage min_spacing must be at least 1".to_string());
        }
        if passages.sample_attempts == 0 {
            return invalid("passage sample_attempts must be positive".to_string());
        }

        let items = &self.items;
        if items.players != 1 {
            return invalid(format!("exactly one player is required, got {}", items.players));
        }
        if items.enemies as usize > self.stats.max_enemies {
            return invalid(format!(
                "{} enemies exceed the cap of {}",
                items.enemies, self.stats.max_enemies
            ));
        }
        if items.scatter_attempts == 0 {
            return invalid("scatter_attempts must be positive".to_string());
        }

        let stats = &self.stats;
        if stats.player_health <= 0 || stats.enemy_health <= 0 {
            return invalid("health values must be positive".to_string());
        }
        if stats.player_attack <= 0 || stats.enemy_attack < 0 {
            return invalid("attack values must not be negative".to_string());
        }
        if stats.potion_heal < 0 || stats.sword_bonus < 0 {
            return invalid("item effects must not be negative".to_string());
        }

        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be positive".to_string());
        }

        Ok(())
    }
}
