//! Game session
//!
//! Owns the map, the entities and the clock for one run. Every public
//! action runs to completion before returning, so a player command can
//! never observe a half-finished tick and vice versa.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::snapshot::{EntitySnapshot, Snapshot};
use super::time::GameClock;
use crate::combat::{enemy_attacks, player_attack, AttackResult};
use crate::data::{ConfigError, GameConfig};
use crate::entities::{Direction, EntityRegistry};
use crate::systems::{move_enemies, move_player, MoveOutcome};
use crate::world::{generate_dungeon, GenerationError, GridMap};

/// Maximum messages kept in the log
const MESSAGE_LOG_LEN: usize = 100;

/// Errors that prevent a session from starting
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dungeon generation failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Macro state of a session; `GameOver` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

/// A player command produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Attack,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq)]
pub struct GameMessage {
    pub text: String,
    /// Tick count when the message was logged
    pub tick: u64,
    pub category: MessageCategory,
}

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
}

/// One game run from generation to game over
pub struct Game {
    state: GameState,
    map: GridMap,
    entities: EntityRegistry,
    clock: GameClock,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    seed: u64,
    config: GameConfig,
    messages: Vec<GameMessage>,
}

impl Game {
    /// Validate `config`, generate a dungeon and start running
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let dungeon = generate_dungeon(&mut rng, &config)?;
        log::info!("Starting session with seed {}", seed);

        let mut game = Self::with_rng(dungeon.map, dungeon.entities, config, rng, seed);
        game.add_message("You enter the dungeon.", MessageCategory::System);
        Ok(game)
    }

    /// Start a session on a prepared map and registry. The config is used
    /// for stats and timing only and is not validated against the map.
    pub fn from_parts(map: GridMap, entities: EntityRegistry, config: GameConfig, seed: u64) -> Self {
        Self::with_rng(map, entities, config, StdRng::seed_from_u64(seed), seed)
    }

    fn with_rng(map: GridMap, entities: EntityRegistry, config: GameConfig, rng: StdRng, seed: u64) -> Self {
        Self {
            state: GameState::Running,
            map,
            entities,
            clock: GameClock::new(config.tick_interval()),
            rng,
            seed,
            config,
            messages: Vec::new(),
        }
    }

    /// Get the current game state
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Seed the session RNG was started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks completed so far
    pub fn tick_count(&self) -> u64 {
        self.clock.ticks()
    }

    /// Get all messages
    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            tick: self.clock.ticks(),
            category,
        });

        if self.messages.len() > MESSAGE_LOG_LEN {
            self.messages.remove(0);
        }
    }

    /// Dispatch a command from the input layer
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                self.move_player(dir);
            }
            Command::Attack => {
                self.player_attack();
            }
        }
    }

    /// Move the player one cell. Ignored once the game is over.
    pub fn move_player(&mut self, dir: Direction) -> MoveOutcome {
        if self.is_over() {
            return MoveOutcome::Blocked;
        }

        let outcome = move_player(&mut self.map, &mut self.entities, dir, &self.config.stats);
        match outcome {
            MoveOutcome::Potion { healed } => {
                self.add_message(format!("You drink a potion (+{} HP).", healed), MessageCategory::Item);
            }
            MoveOutcome::Sword { attack } => {
                self.add_message(format!("You pick up a sword (attack {}).", attack), MessageCategory::Item);
            }
            MoveOutcome::Moved | MoveOutcome::Blocked => {}
        }
        outcome
    }

    /// Attack every enemy next to the player. Ignored once the game is over.
    pub fn player_attack(&mut self) -> Vec<AttackResult> {
        if self.is_over() {
            return Vec::new();
        }

        let results = player_attack(&mut self.map, &mut self.entities);
        for result in &results {
            if result.killed {
                self.add_message("You slay an enemy.", MessageCategory::Combat);
            } else {
                self.add_message(
                    format!("You hit an enemy for {} ({} HP left).", result.damage, result.remaining),
                    MessageCategory::Combat,
                );
            }
        }
        results
    }

    /// Run one enemy phase now: every enemy moves, then every enemy next
    /// to the player attacks. Returns false if the game is already over.
    pub fn tick(&mut self) -> bool {
        if self.is_over() {
            return false;
        }

        move_enemies(&mut self.map, &mut self.entities, &mut self.rng);
        let strikes = enemy_attacks(&mut self.entities);
        self.clock.record_tick();

        if !strikes.is_empty() {
            let total: i32 = strikes.iter().map(|s| s.damage).sum();
            self.add_message(
                format!("{} enemies hit you for {} damage.", strikes.len(), total),
                MessageCategory::Combat,
            );
        }

        if self.entities.player().map_or(false, |p| p.is_dead()) {
            self.game_over();
        }
        true
    }

    /// Feed elapsed wall-clock time and run every tick that came due.
    /// Returns how many ticks ran; stops early if the player dies.
    pub fn update(&mut self, delta: Duration) -> u32 {
        if self.is_over() {
            return 0;
        }
        let due = self.clock.update(delta);
        let mut ran = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            ran += 1;
        }
        ran
    }

    fn game_over(&mut self) {
        log::info!("Player defeated after {} ticks", self.clock.ticks());
        self.clock.stop();
        self.set_state(GameState::GameOver);
        self.add_message("Player defeated!", MessageCategory::System);
    }

    /// Copy out everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        let player = self.entities.player().map(|p| EntitySnapshot {
            id: None,
            position: p.position,
            health: p.health,
            attack: p.attack,
        });
        let enemies = self
            .entities
            .living_enemies()
            .filter_map(|(id, _, _)| self.entities.enemy(id).map(|e| (id, e)))
            .map(|(id, e)| EntitySnapshot {
                id: Some(id),
                position: e.position,
                health: e.health,
                attack: e.attack,
            })
            .collect();

        Snapshot {
            rows: self.map.rows(),
            cols: self.map.cols(),
            cells: self.map.cells().to_vec(),
            player,
            enemies,
            state: self.state,
            tick: self.clock.ticks(),
        }
    }
}
