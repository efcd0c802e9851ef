//! Combat system

pub mod damage;

pub use damage::{enemy_attacks, player_attack, AttackResult, EnemyStrike};
