//! Player and enemy movement
//!
//! The player moves one cell per command and picks up whatever item lies
//! on the target cell. Enemies wander once per tick, avoiding the cell
//! they just left unless they have nowhere else to go.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::StatsConfig;
use crate::entities::{Direction, EntityRegistry, Position};
use crate::world::{CellKind, GridMap};

/// What a player move request resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target was outside the grid, a wall or an enemy
    Blocked,
    Moved,
    /// Stepped onto a potion and healed this much
    Potion { healed: i32 },
    /// Stepped onto a sword; attack is the new value
    Sword { attack: i32 },
}

/// Move the player one cell in `dir`
pub fn move_player(
    map: &mut GridMap,
    entities: &mut EntityRegistry,
    dir: Direction,
    stats: &StatsConfig,
) -> MoveOutcome {
    let Some(from) = entities.player_position() else {
        return MoveOutcome::Blocked;
    };
    let to = from.step(dir);

    let target = match map.get(to) {
        Some(kind) if kind.is_walkable() => kind,
        _ => return MoveOutcome::Blocked,
    };

    entities.set_player_position(to);
    let outcome = match target {
        CellKind::Potion => MoveOutcome::Potion {
            healed: entities.heal_player(stats.potion_heal),
        },
        CellKind::Sword => {
            entities.increase_player_attack(stats.sword_bonus);
            MoveOutcome::Sword {
                attack: entities.player().map_or(0, |p| p.attack),
            }
        }
        _ => MoveOutcome::Moved,
    };

    if map.is(from, CellKind::Player) {
        map.set(from, CellKind::Tile);
    }
    map.set(to, CellKind::Player);

    outcome
}

/// Pick where an enemy at `pos` wants to go this tick
fn choose_step(
    map: &GridMap,
    pos: Position,
    previous: Option<Position>,
    rng: &mut impl Rng,
) -> Option<Position> {
    let candidates: Vec<Position> = Direction::ALL
        .iter()
        .map(|dir| pos.step(*dir))
        .filter(|to| map.is(*to, CellKind::Tile) && Some(*to) != previous)
        .collect();

    // Nowhere new to go: turn back the way we came
    candidates.choose(rng).copied().or(previous)
}

/// Move every living enemy once, in ascending id order. Returns how many
/// enemies changed cell.
pub fn move_enemies(map: &mut GridMap, entities: &mut EntityRegistry, rng: &mut impl Rng) -> usize {
    let mut moved = 0;

    for id in entities.enemy_ids() {
        let Some(enemy) = entities.enemy_mut(id) else {
            continue;
        };
        let from = enemy.position;
        let Some(to) = choose_step(map, from, enemy.previous, rng) else {
            continue;
        };

        // An earlier enemy may have taken the cell this tick
        if !map.is(to, CellKind::Tile) {
            continue;
        }

        map.set(from, CellKind::Tile);
        map.set(to, CellKind::Enemy);
        enemy.move_to(to);
        moved += 1;
    }

    moved
}
