//! Game module - session state, clock and render snapshots

mod snapshot;
mod state;
mod time;

pub use snapshot::{EntitySnapshot, Snapshot};
pub use state::{Command, Game, GameMessage, GameState, MessageCategory, SessionError};
pub use time::GameClock;
