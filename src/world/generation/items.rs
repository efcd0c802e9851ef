//! Marker scattering
//!
//! Drops potions, swords, enemies and the player onto free floor. Each
//! marker only ever claims a cell that is still plain Tile, so two
//! markers can never share a cell.

use rand::seq::SliceRandom;
use rand::Rng;

use super::GenerationError;
use crate::entities::Position;
use crate::world::{CellKind, GridMap};

/// Mark `count` random Tile cells with `kind`, returning them in the order
/// they were written
pub fn scatter_items(
    rng: &mut impl Rng,
    map: &mut GridMap,
    kind: CellKind,
    count: u32,
    attempts: u32,
) -> Result<Vec<Position>, GenerationError> {
    let mut placed = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let pos = pick_free_tile(rng, map, attempts).ok_or(GenerationError::NoFreeTile { kind })?;
        map.set(pos, kind);
        placed.push(pos);
    }
    log::debug!("Scattered {} {:?} markers", placed.len(), kind);
    Ok(placed)
}

/// Rejection-sample a Tile cell; once the sample budget runs out, choose
/// among the remaining free cells directly
fn pick_free_tile(rng: &mut impl Rng, map: &GridMap, attempts: u32) -> Option<Position> {
    for _ in 0..attempts {
        let pos = Position::new(rng.gen_range(0..map.cols()), rng.gen_range(0..map.rows()));
        if map.is(pos, CellKind::Tile) {
            return Some(pos);
        }
    }

    let free = map.positions_of(CellKind::Tile);
    if !free.is_empty() {
        log::debug!("Random sampling missed, choosing among {} free tiles", free.len());
    }
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_only_claims_tiles() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut map = GridMap::from_glyphs(&["#####", "#...#", "#...#", "#####"]).unwrap();

        let potions = scatter_items(&mut rng, &mut map, CellKind::Potion, 4, 100).unwrap();
        let swords = scatter_items(&mut rng, &mut map, CellKind::Sword, 2, 100).unwrap();

        assert_eq!(map.count(CellKind::Potion), 4);
        assert_eq!(map.count(CellKind::Sword), 2);
        assert!(swords.iter().all(|p| !potions.contains(p)));
        assert_eq!(map.count(CellKind::Wall), 14);
    }

    #[test]
    fn test_scatter_fills_last_tile_with_tiny_budget() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut map = GridMap::from_glyphs(&["####", "#..#", "####"]).unwrap();
        let placed = scatter_items(&mut rng, &mut map, CellKind::Enemy, 2, 1).unwrap();
        assert_eq!(placed.len(), 2);
        assert_eq!(map.count(CellKind::Tile), 0);
    }

    #[test]
    fn test_scatter_without_free_tile() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut map = GridMap::from_glyphs(&["###", "#.#", "###"]).unwrap();
        let err = scatter_items(&mut rng, &mut map, CellKind::Potion, 2, 50).unwrap_err();
        assert_eq!(err, GenerationError::NoFreeTile { kind: CellKind::Potion });
        assert_eq!(map.count(CellKind::Potion), 1);
    }
}
