//! Entity registry
//!
//! Canonical state for the player and the living enemies. Enemies are
//! keyed by [`EnemyId`] and iterate in ascending id order, which is the
//! order every tick processes them in.

use std::collections::BTreeMap;

use super::components::{Health, Position};
use super::enemies::{Enemy, EnemyId};
use super::player::Player;
use crate::data::StatsConfig;
use crate::world::{CellKind, GridMap};

/// Owns the player and up to `max_enemies` enemies
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    player: Option<Player>,
    enemies: BTreeMap<EnemyId, Enemy>,
    next_enemy_id: u32,
    stats: StatsConfig,
}

impl EntityRegistry {
    pub fn new(stats: StatsConfig) -> Self {
        Self {
            player: None,
            enemies: BTreeMap::new(),
            next_enemy_id: 0,
            stats,
        }
    }

    /// Spawn entities on the Player and Enemy markers of a prepared map,
    /// row by row
    pub fn from_markers(map: &GridMap, stats: StatsConfig) -> Self {
        let mut registry = Self::new(stats);
        for pos in map.positions_of(CellKind::Player) {
            registry.spawn_player(pos);
        }
        for pos in map.positions_of(CellKind::Enemy) {
            registry.spawn_enemy(pos);
        }
        registry
    }

    /// Create the player at `pos`. Later calls are no-ops; returns whether
    /// this call created it.
    pub fn spawn_player(&mut self, pos: Position) -> bool {
        if self.player.is_some() {
            log::debug!("Player already spawned, ignoring spawn at {:?}", pos);
            return false;
        }
        self.player = Some(Player::new(pos, self.stats.player_health, self.stats.player_attack));
        true
    }

    /// Create an enemy at `pos` unless the cap is reached
    pub fn spawn_enemy(&mut self, pos: Position) -> Option<EnemyId> {
        if self.enemies.len() >= self.stats.max_enemies {
            log::debug!("Enemy cap {} reached, ignoring spawn at {:?}", self.stats.max_enemies, pos);
            return None;
        }
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies
            .insert(id, Enemy::new(pos, self.stats.enemy_health, self.stats.enemy_attack));
        Some(id)
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_position(&self) -> Option<Position> {
        self.player.as_ref().map(|p| p.position)
    }

    pub(crate) fn set_player_position(&mut self, pos: Position) {
        if let Some(player) = self.player.as_mut() {
            player.position = pos;
        }
    }

    /// Deal damage to player, returns true if player died
    pub fn damage_player(&mut self, amount: i32) -> bool {
        match self.player.as_mut() {
            Some(player) => {
                player.health.take_damage(amount);
                player.is_dead()
            }
            None => false,
        }
    }

    /// Heal the player up to max, returns the amount actually healed
    pub fn heal_player(&mut self, amount: i32) -> i32 {
        self.player.as_mut().map_or(0, |p| p.health.heal(amount))
    }

    /// Raise player attack; negative amounts are ignored
    pub fn increase_player_attack(&mut self, amount: i32) {
        if let Some(player) = self.player.as_mut() {
            player.attack += amount.max(0);
        }
    }

    /// Damage an enemy, returning its remaining health (`None` if unknown)
    pub fn damage_enemy(&mut self, id: EnemyId, amount: i32) -> Option<i32> {
        self.enemies.get_mut(&id).map(|enemy| {
            enemy.health.take_damage(amount);
            enemy.health.current
        })
    }

    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        self.enemies.remove(&id)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub(crate) fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// Enemy standing on `pos`, if any
    pub fn enemy_at(&self, pos: Position) -> Option<EnemyId> {
        self.enemies
            .iter()
            .find(|(_, enemy)| enemy.position == pos)
            .map(|(id, _)| *id)
    }

    /// Ids of all living enemies in ascending order
    pub fn enemy_ids(&self) -> Vec<EnemyId> {
        self.enemies.keys().copied().collect()
    }

    /// (id, position, health) of each living enemy in ascending id order
    pub fn living_enemies(&self) -> impl Iterator<Item = (EnemyId, Position, Health)> + '_ {
        self.enemies
            .iter()
            .map(|(id, enemy)| (*id, enemy.position, enemy.health))
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> EntityRegistry {
        EntityRegistry::new(StatsConfig::default())
    }

    #[test]
    fn test_player_is_singleton() {
        let mut reg = registry();
        assert!(reg.spawn_player(Position::new(1, 1)));
        assert!(!reg.spawn_player(Position::new(5, 5)));
        assert_eq!(reg.player_position(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_enemy_cap() {
        let mut reg = registry();
        for i in 0..10 {
            assert!(reg.spawn_enemy(Position::new(i, 0)).is_some());
        }
        assert!(reg.spawn_enemy(Position::new(20, 0)).is_none());
        assert_eq!(reg.enemy_count(), 10);

        // A freed slot can be refilled
        reg.remove_enemy(EnemyId(3));
        let id = reg.spawn_enemy(Position::new(20, 0)).unwrap();
        assert_eq!(id, EnemyId(10));
    }

    #[test]
    fn test_player_health_bounds() {
        let mut reg = registry();
        reg.spawn_player(Position::new(1, 1));
        assert_eq!(reg.heal_player(50), 0);
        assert_eq!(reg.player().unwrap().health.current, 100);

        assert!(!reg.damage_player(40));
        assert_eq!(reg.heal_player(1000), 40);
        assert!(reg.damage_player(250));
        assert_eq!(reg.player().unwrap().health.current, 0);
    }

    #[test]
    fn test_attack_only_increases() {
        let mut reg = registry();
        reg.spawn_player(Position::new(1, 1));
        reg.increase_player_attack(10);
        reg.increase_player_attack(-30);
        assert_eq!(reg.player().unwrap().attack, 20);
    }

    #[test]
    fn test_damage_enemy_clamps() {
        let mut reg = registry();
        let id = reg.spawn_enemy(Position::new(2, 2)).unwrap();
        assert_eq!(reg.damage_enemy(id, 15), Some(35));
        assert_eq!(reg.damage_enemy(id, 100), Some(0));
        assert_eq!(reg.damage_enemy(EnemyId(99), 10), None);
    }

    #[test]
    fn test_from_markers() {
        let map = GridMap::from_glyphs(&["#####", "#E.@#", "#..E#", "#####"]).unwrap();
        let reg = EntityRegistry::from_markers(&map, StatsConfig::default());
        assert_eq!(reg.player_position(), Some(Position::new(3, 1)));
        assert_eq!(reg.enemy_at(Position::new(1, 1)), Some(EnemyId(0)));
        assert_eq!(reg.enemy_at(Position::new(3, 2)), Some(EnemyId(1)));
    }

    #[test]
    fn test_living_enemies_in_id_order() {
        let mut reg = registry();
        let a = reg.spawn_enemy(Position::new(9, 9)).unwrap();
        let b = reg.spawn_enemy(Position::new(1, 1)).unwrap();
        let listed: Vec<_> = reg.living_enemies().map(|(id, pos, _)| (id, pos)).collect();
        assert_eq!(listed, vec![(a, Position::new(9, 9)), (b, Position::new(1, 1))]);
        assert_eq!(reg.enemy_at(Position::new(1, 1)), Some(b));
    }
}
