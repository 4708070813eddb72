#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic maze generation system.
//!
//! Mazes are carved with an iterative recursive backtracker driven by a
//! ChaCha stream seeded from the caller's seed, so a `(dimensions, seed)` pair
//! always expands into the same occupancy grid.

use labyrinth_snake_core::{CellCoord, Direction, MazeDimensions, OccupancyGrid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Order in which unvisited neighbours are collected before a random pick.
///
/// The pick indexes into this ordering, so changing it reshapes every maze.
const CARVE_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Carves a perfect maze of the provided logical size.
///
/// The returned grid measures `2 * height + 1` rows by `2 * width + 1`
/// columns. Logical room `(x, y)` occupies grid cell `(2y + 1, 2x + 1)` and
/// the open tiles form a spanning tree over all rooms.
#[must_use]
pub fn generate(dimensions: MazeDimensions, seed: u64) -> OccupancyGrid {
    let width = dimensions.width().get();
    let height = dimensions.height().get();
    let mut builder = OccupancyGrid::builder(dimensions.grid_rows(), dimensions.grid_columns());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut visited = Visited::new(width, height);
    let origin = CellCoord::new(0, 0);
    visited.mark(origin);
    let _ = builder.carve(grid_cell(origin));

    let mut stack = vec![origin];
    let mut candidates: Vec<(Direction, CellCoord)> = Vec::with_capacity(CARVE_ORDER.len());

    while let Some(&current) = stack.last() {
        candidates.clear();
        for direction in CARVE_ORDER {
            let Some(neighbor) = current.step(direction) else {
                continue;
            };
            if neighbor.column() >= width || neighbor.row() >= height {
                continue;
            }
            if visited.contains(neighbor) {
                continue;
            }
            candidates.push((direction, neighbor));
        }

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        // Sampled as `u32` so 32-bit and 64-bit targets consume the same stream.
        let pick = rng.gen_range(0..candidates.len() as u32) as usize;
        let (direction, next) = candidates[pick];
        if let Some(passage) = grid_cell(current).step(direction) {
            let _ = builder.carve(passage);
        }
        let _ = builder.carve(grid_cell(next));
        visited.mark(next);
        stack.push(next);
    }

    let grid = builder.build();
    tracing::trace!(
        width,
        height,
        seed,
        open_tiles = grid.open_count(),
        "carved maze"
    );
    grid
}

fn grid_cell(room: CellCoord) -> CellCoord {
    MazeDimensions::room_cell(room.column(), room.row())
}

/// Dense visitation flags over logical rooms, indexed by `(row, column)`.
#[derive(Debug)]
struct Visited {
    width: u32,
    flags: Vec<bool>,
}

impl Visited {
    fn new(width: u32, height: u32) -> Self {
        let count = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            flags: vec![false; count],
        }
    }

    fn index(&self, room: CellCoord) -> Option<usize> {
        let row = usize::try_from(room.row()).ok()?;
        let column = usize::try_from(room.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    fn mark(&mut self, room: CellCoord) {
        if let Some(slot) = self.index(room).and_then(|index| self.flags.get_mut(index)) {
            *slot = true;
        }
    }

    fn contains(&self, room: CellCoord) -> bool {
        self.index(room)
            .and_then(|index| self.flags.get(index).copied())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_snake_core::Tile;

    fn dimensions(width: u32, height: u32) -> MazeDimensions {
        MazeDimensions::new(width, height).expect("positive dimensions")
    }

    #[test]
    fn single_room_maze_opens_only_the_room() {
        let grid = generate(dimensions(1, 1), 7);

        assert_eq!((grid.rows(), grid.columns()), (3, 3));
        assert_eq!(grid.open_count(), 1);
        assert!(grid.is_open(CellCoord::new(1, 1)));
    }

    #[test]
    fn corridor_maze_is_a_straight_line() {
        let grid = generate(dimensions(4, 1), 99);

        assert_eq!((grid.rows(), grid.columns()), (3, 9));
        for column in 1..8 {
            assert!(grid.is_open(CellCoord::new(1, column)));
        }
        assert_eq!(grid.open_count(), 7);
    }

    #[test]
    fn border_stays_walled() {
        let grid = generate(dimensions(6, 4), 1234);

        for column in 0..grid.columns() {
            assert_eq!(grid.tile(CellCoord::new(0, column)), Some(Tile::Wall));
            assert_eq!(
                grid.tile(CellCoord::new(grid.rows() - 1, column)),
                Some(Tile::Wall)
            );
        }
        for row in 0..grid.rows() {
            assert_eq!(grid.tile(CellCoord::new(row, 0)), Some(Tile::Wall));
            assert_eq!(
                grid.tile(CellCoord::new(row, grid.columns() - 1)),
                Some(Tile::Wall)
            );
        }
    }

    #[test]
    fn pillars_between_rooms_are_never_carved() {
        let grid = generate(dimensions(5, 5), 42);

        for row in (0..grid.rows()).step_by(2) {
            for column in (0..grid.columns()).step_by(2) {
                assert!(!grid.is_open(CellCoord::new(row, column)));
            }
        }
    }

    #[test]
    fn different_seeds_produce_different_layouts() {
        let layouts: Vec<_> = (0..8).map(|seed| generate(dimensions(6, 6), seed)).collect();
        let distinct = layouts
            .iter()
            .enumerate()
            .filter(|(index, grid)| layouts[..*index].iter().all(|other| other != *grid))
            .count();

        assert!(distinct > 1, "eight seeds collapsed onto one layout");
    }
}
