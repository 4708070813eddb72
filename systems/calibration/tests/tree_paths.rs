use std::collections::HashMap;

use labyrinth_snake_core::{CellCoord, MazeDimensions, OccupancyGrid};
use labyrinth_snake_system_calibration::{
    derive_budget, directions_along, shortest_path, shortest_path_length,
};
use labyrinth_snake_system_generation::generate;

fn corners(grid: &OccupancyGrid) -> (CellCoord, CellCoord) {
    (
        CellCoord::new(1, 1),
        CellCoord::new(grid.rows() - 2, grid.columns() - 2),
    )
}

/// Walks the maze depth-first, recording how every cell was first reached.
///
/// In a tree the first discovery is the only one, so following parents back
/// from the exit yields the unique simple path.
fn tree_path(grid: &OccupancyGrid, entry: CellCoord, exit: CellCoord) -> Vec<CellCoord> {
    let mut parents: HashMap<CellCoord, Option<CellCoord>> = HashMap::from([(entry, None)]);
    let mut stack = vec![entry];
    while let Some(cell) = stack.pop() {
        for neighbor in grid.open_neighbors(cell) {
            if !parents.contains_key(&neighbor) {
                let _ = parents.insert(neighbor, Some(cell));
                stack.push(neighbor);
            }
        }
    }

    let mut path = vec![exit];
    let mut cursor = exit;
    while let Some(Some(parent)) = parents.get(&cursor) {
        path.push(*parent);
        cursor = *parent;
    }
    path.reverse();
    path
}

#[test]
fn shortest_path_matches_the_unique_tree_path() {
    for (width, height) in [(2, 2), (3, 3), (5, 5), (8, 6), (10, 10)] {
        for seed in [3, 42, 1_111, 3_000] {
            let dimensions = MazeDimensions::new(width, height).expect("positive dimensions");
            let grid = generate(dimensions, seed);
            let (entry, exit) = corners(&grid);

            let expected = tree_path(&grid, entry, exit);
            let length = shortest_path_length(&grid, entry, exit)
                .expect("generated mazes always connect entry and exit");
            assert_eq!(length as usize, expected.len() - 1);
            assert_eq!(shortest_path(&grid, entry, exit), Some(expected));
        }
    }
}

#[test]
fn three_by_three_scenario_budget_and_route_agree() {
    let dimensions = MazeDimensions::new(3, 3).expect("positive dimensions");
    let grid = generate(dimensions, 42);
    let entry = CellCoord::new(1, 1);
    let exit = CellCoord::new(5, 5);

    let distance = shortest_path_length(&grid, entry, exit).expect("reachable");
    assert_eq!(distance, 12);

    let expected_budget = distance + (f64::from(distance) * 0.5).ceil() as u32;
    assert_eq!(derive_budget(distance, 0.5), expected_budget);

    let route = shortest_path(&grid, entry, exit).expect("reachable");
    assert_eq!(directions_along(&route).len() as u32, distance);
}
