//! Game configuration
//!
//! Tunable constants for generation, combat and timing, loadable
//! from an external RON file with fallback to built-in defaults.

pub mod config;

pub use config::{
    ConfigError, GameConfig, GridConfig, ItemConfig, PassageConfig, RoomConfig, StatsConfig,
};
