#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty calibration for generated mazes.
//!
//! A breadth-first search over open tiles measures the optimal route between
//! entry and exit, and the move budget adds a slack fraction on top of it.

use std::collections::VecDeque;

use labyrinth_snake_core::{CellCoord, Direction, OccupancyGrid};

/// Length of the shortest walkable route from `entry` to `exit`.
///
/// Returns `None` when the exit cannot be reached, which never happens for a
/// generated maze.
#[must_use]
pub fn shortest_path_length(grid: &OccupancyGrid, entry: CellCoord, exit: CellCoord) -> Option<u32> {
    SearchField::explore(grid, entry, exit)?.distance(exit)
}

/// Cells of a shortest route from `entry` to `exit`, both ends included.
#[must_use]
pub fn shortest_path(
    grid: &OccupancyGrid,
    entry: CellCoord,
    exit: CellCoord,
) -> Option<Vec<CellCoord>> {
    SearchField::explore(grid, entry, exit)?.route_to(exit)
}

/// Move budget granted for a route of `shortest_path` steps.
///
/// The budget is `shortest_path + ceil(shortest_path * slack)`. Negative or
/// non-finite slack counts as zero.
#[must_use]
pub fn derive_budget(shortest_path: u32, slack: f64) -> u32 {
    let slack = if slack.is_finite() { slack.max(0.0) } else { 0.0 };
    let extra = (f64::from(shortest_path) * slack).ceil();
    // Float-to-int `as` saturates, so oversized slack clamps at `u32::MAX`.
    shortest_path.saturating_add(extra as u32)
}

/// Directions that walk along consecutive cells of `path`.
///
/// Pairs of cells that are not orthogonally adjacent are skipped.
#[must_use]
pub fn directions_along(path: &[CellCoord]) -> Vec<Direction> {
    path.windows(2)
        .filter_map(|pair| Direction::between(pair[0], pair[1]))
        .collect()
}

/// Breadth-first distances and parent links grown from a single entry cell.
#[derive(Debug)]
struct SearchField {
    columns: u32,
    distances: Vec<Option<u32>>,
    parents: Vec<Option<CellCoord>>,
}

impl SearchField {
    /// Runs the search until `exit` is dequeued or the frontier empties.
    fn explore(grid: &OccupancyGrid, entry: CellCoord, exit: CellCoord) -> Option<Self> {
        if !grid.is_open(entry) {
            return None;
        }

        let cell_count = usize::try_from(u64::from(grid.rows()) * u64::from(grid.columns())).ok()?;
        let mut field = Self {
            columns: grid.columns(),
            distances: vec![None; cell_count],
            parents: vec![None; cell_count],
        };

        let entry_index = field.index(entry)?;
        field.distances[entry_index] = Some(0);

        let mut queue = VecDeque::from([entry]);
        while let Some(cell) = queue.pop_front() {
            if cell == exit {
                break;
            }

            let Some(current_distance) = field.distance(cell) else {
                continue;
            };

            for neighbor in grid.open_neighbors(cell) {
                let Some(neighbor_index) = field.index(neighbor) else {
                    continue;
                };

                if field.distances[neighbor_index].is_some() {
                    continue;
                }

                field.distances[neighbor_index] = Some(current_distance + 1);
                field.parents[neighbor_index] = Some(cell);
                queue.push_back(neighbor);
            }
        }

        Some(field)
    }

    fn distance(&self, cell: CellCoord) -> Option<u32> {
        self.index(cell)
            .and_then(|index| self.distances.get(index).copied().flatten())
    }

    fn route_to(&self, exit: CellCoord) -> Option<Vec<CellCoord>> {
        let length = self.distance(exit)?;
        let mut route = Vec::with_capacity(usize::try_from(length).ok()? + 1);
        let mut cursor = Some(exit);
        while let Some(cell) = cursor {
            route.push(cell);
            cursor = self.index(cell).and_then(|index| self.parents[index]);
        }
        route.reverse();
        Some(route)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns {
            return None;
        }
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        let index = row.checked_mul(width)?.checked_add(column)?;
        (index < self.distances.len()).then_some(index)
    }
}
