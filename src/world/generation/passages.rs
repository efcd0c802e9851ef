//! Grid-spanning passages
//!
//! Straight corridors cut through the whole map. Row passages span every
//! column, column passages span every row. Passages of the same
//! orientation keep `min_spacing` apart so no one-cell wall slivers are
//! left between them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::data::PassageConfig;
use crate::entities::Position;
use crate::world::{CellKind, GridMap};

/// Which axis a passage runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Full row, indexed by `y`
    Row,
    /// Full column, indexed by `x`
    Column,
}

/// A carved passage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passage {
    pub orientation: Orientation,
    pub index: i32,
}

impl Passage {
    /// Every cell the passage covers
    pub fn cells(&self, map: &GridMap) -> Vec<Position> {
        match self.orientation {
            Orientation::Row => (0..map.cols()).map(|x| Position::new(x, self.index)).collect(),
            Orientation::Column => (0..map.rows()).map(|y| Position::new(self.index, y)).collect(),
        }
    }
}

/// Pick `count` sorted positions in `1..=extent-2`, each at least
/// `min_spacing` from the others
fn sample_positions(
    rng: &mut impl Rng,
    extent: i32,
    count: u32,
    config: &PassageConfig,
    orientation: Orientation,
) -> Result<Vec<i32>, GenerationError> {
    let mut positions: Vec<i32> = Vec::with_capacity(count as usize);
    let mut attempts = 0;

    while positions.len() < count as usize {
        if attempts >= config.sample_attempts {
            return Err(GenerationError::NoPassageSpace {
                orientation,
                wanted: count,
                found: positions.len() as u32,
            });
        }
        attempts += 1;

        let candidate = rng.gen_range(1..=extent - 2);
        if positions.iter().all(|p| (p - candidate).abs() >= config.min_spacing) {
            positions.push(candidate);
        }
    }

    positions.sort_unstable();
    Ok(positions)
}

/// Carve row and column passages; the two sets are sampled independently
pub fn carve_passages(
    rng: &mut impl Rng,
    map: &mut GridMap,
    config: &PassageConfig,
) -> Result<Vec<Passage>, GenerationError> {
    let row_count = rng.gen_range(config.count.0..=config.count.1);
    let col_count = rng.gen_range(config.count.0..=config.count.1);

    let rows = sample_positions(rng, map.rows(), row_count, config, Orientation::Row)?;
    let cols = sample_positions(rng, map.cols(), col_count, config, Orientation::Column)?;
    log::debug!("Carving row passages {:?} and column passages {:?}", rows, cols);

    let passages: Vec<Passage> = rows
        .into_iter()
        .map(|index| Passage { orientation: Orientation::Row, index })
        .chain(cols.into_iter().map(|index| Passage { orientation: Orientation::Column, index }))
        .collect();

    for passage in &passages {
        for pos in passage.cells(map) {
            map.set(pos, CellKind::Tile);
        }
    }

    Ok(passages)
}
