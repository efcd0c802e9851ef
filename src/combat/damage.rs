//! Melee resolution
//!
//! The player hits every enemy standing on a cardinal neighbour. Enemies
//! hit the player from any of the eight surrounding cells. Damage is the
//! attacker's attack value, with no rolls.

use crate::entities::{Direction, EnemyId, EntityRegistry, Position};
use crate::world::{CellKind, GridMap};

/// Result of the player hitting one enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    pub target: EnemyId,
    pub position: Position,
    pub damage: i32,
    /// Enemy health after the hit
    pub remaining: i32,
    /// The enemy died and was removed from the map
    pub killed: bool,
}

/// One enemy hitting the player during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStrike {
    pub attacker: EnemyId,
    pub damage: i32,
}

/// Attack all enemies next to the player (left, up, right, down)
pub fn player_attack(map: &mut GridMap, entities: &mut EntityRegistry) -> Vec<AttackResult> {
    let Some(player) = entities.player() else {
        return Vec::new();
    };
    let origin = player.position;
    let damage = player.attack;

    let mut results = Vec::new();
    for dir in Direction::ATTACK_SCAN {
        let pos = origin.step(dir);
        if !map.is(pos, CellKind::Enemy) {
            continue;
        }
        let Some(target) = entities.enemy_at(pos) else {
            log::warn!("Enemy marker at {:?} has no registered enemy", pos);
            continue;
        };
        let Some(remaining) = entities.damage_enemy(target, damage) else {
            continue;
        };

        let killed = remaining <= 0;
        if killed {
            entities.remove_enemy(target);
            map.set(pos, CellKind::Tile);
            log::info!("{} killed at ({}, {})", target, pos.x, pos.y);
        } else {
            log::debug!("Player hit {} for {}, {} left", target, damage, remaining);
        }

        results.push(AttackResult {
            target,
            position: pos,
            damage,
            remaining,
            killed,
        });
    }
    results
}

/// Every enemy within one cell (diagonals included) hits the player once
pub fn enemy_attacks(entities: &mut EntityRegistry) -> Vec<EnemyStrike> {
    let Some(player_pos) = entities.player_position() else {
        return Vec::new();
    };

    let strikes: Vec<EnemyStrike> = entities
        .living_enemies()
        .filter(|(_, pos, _)| pos.chebyshev_distance(&player_pos) <= 1)
        .filter_map(|(id, _, _)| {
            entities.enemy(id).map(|enemy| EnemyStrike {
                attacker: id,
                damage: enemy.attack,
            })
        })
        .collect();

    for strike in &strikes {
        entities.damage_player(strike.damage);
        log::debug!("{} hit the player for {}", strike.attacker, strike.damage);
    }
    strikes
}
