//! Room placement
//!
//! Rectangular rooms dropped at random anchors into a walled grid. A room
//! is only accepted where it and the one-cell ring around it are solid
//! wall, so rooms never touch each other.

use rand::Rng;

use super::GenerationError;
use crate::data::RoomConfig;
use crate::entities::Position;
use crate::world::{CellKind, GridMap};

/// A rectangular room; `x2`/`y2` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x1 && pos.x < self.x2 && pos.y >= self.y1 && pos.y < self.y2
    }

    /// Does this room grown by one cell on every side overlap `other`?
    pub fn padded_intersects(&self, other: &Room) -> bool {
        self.x1 - 1 < other.x2
            && self.x2 + 1 > other.x1
            && self.y1 - 1 < other.y2
            && self.y2 + 1 > other.y1
    }

    /// Room plus wall ring lies inside the grid and the ring area is all wall
    fn fits(&self, map: &GridMap) -> bool {
        if self.x1 < 1 || self.y1 < 1 || self.x2 + 1 > map.cols() || self.y2 + 1 > map.rows() {
            return false;
        }
        (self.y1 - 1..=self.y2).all(|y| {
            (self.x1 - 1..=self.x2).all(|x| map.is(Position::new(x, y), CellKind::Wall))
        })
    }
}

/// Place one room of random size, retrying anchors up to `attempts` times
pub fn place_room(
    rng: &mut impl Rng,
    map: &mut GridMap,
    height: (i32, i32),
    width: (i32, i32),
    attempts: u32,
) -> Result<Room, GenerationError> {
    let h = rng.gen_range(height.0..=height.1);
    let w = rng.gen_range(width.0..=width.1);

    for _ in 0..attempts {
        let x = rng.gen_range(0..map.cols());
        let y = rng.gen_range(0..map.rows());
        let room = Room::new(x, y, w, h);
        if room.fits(map) {
            carve_room(map, &room);
            return Ok(room);
        }
    }

    Err(GenerationError::NoRoomSpace {
        height: h,
        width: w,
        attempts,
    })
}

/// Place a random number of rooms within the configured range
pub fn generate_rooms(
    rng: &mut impl Rng,
    map: &mut GridMap,
    config: &RoomConfig,
) -> Result<Vec<Room>, GenerationError> {
    let count = rng.gen_range(config.count.0..=config.count.1);
    let mut rooms = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let room = place_room(rng, map, config.height, config.width, config.placement_attempts)?;
        log::debug!(
            "Placed {}x{} room at ({}, {})",
            room.height(),
            room.width(),
            room.x1,
            room.y1
        );
        rooms.push(room);
    }
    Ok(rooms)
}

/// Carve out a room
fn carve_room(map: &mut GridMap, room: &Room) {
    for y in room.y1..room.y2 {
        for x in room.x1..room.x2 {
            map.set(Position::new(x, y), CellKind::Tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_place_room_carves_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut map = GridMap::new(24, 40);
        let room = place_room(&mut rng, &mut map, (3, 8), (3, 8), 500).unwrap();

        assert!((3..=8).contains(&room.height()));
        assert!((3..=8).contains(&room.width()));
        assert_eq!(map.count(CellKind::Tile), (room.width() * room.height()) as usize);
        assert!(room.x1 >= 1 && room.y1 >= 1);
        assert!(room.x2 <= 39 && room.y2 <= 23);
    }

    #[test]
    fn test_rooms_keep_a_wall_between() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut map = GridMap::new(24, 40);
            let Ok(rooms) = generate_rooms(&mut rng, &mut map, &RoomConfig::default()) else {
                continue;
            };
            for (i, a) in rooms.iter().enumerate() {
                for b in rooms.iter().skip(i + 1) {
                    assert!(!a.padded_intersects(b), "seed {}: {:?} touches {:?}", seed, a, b);
                }
            }
        }
    }

    #[test]
    fn test_full_grid_reports_no_space() {
        let mut rng = StdRng::seed_from_u64(3);
        // 5x5 grid only fits a 3x3 room once
        let mut map = GridMap::new(5, 5);
        assert!(place_room(&mut rng, &mut map, (3, 3), (3, 3), 500).is_ok());
        let err = place_room(&mut rng, &mut map, (3, 3), (3, 3), 50).unwrap_err();
        assert_eq!(
            err,
            GenerationError::NoRoomSpace { height: 3, width: 3, attempts: 50 }
        );
    }

    #[test]
    fn test_padded_intersects() {
        let a = Room::new(1, 1, 3, 3);
        assert!(a.padded_intersects(&Room::new(4, 1, 3, 3)));
        assert!(!a.padded_intersects(&Room::new(5, 1, 3, 3)));
        assert!(!a.padded_intersects(&Room::new(1, 5, 3, 3)));
    }
}
