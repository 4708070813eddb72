//! Plain-text presentation of levels and sessions.

use std::collections::HashSet;

use labyrinth_snake_core::{CellCoord, Direction, Level, Tile};

const WALL: char = '#';
const FLOOR: char = ' ';
const ENTRY: char = 'S';
const EXIT: char = 'E';
const BODY: char = 'o';
const ROUTE: char = '.';

/// Optional overlays drawn on top of the maze.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overlay<'a> {
    /// Snake trajectory, entry first and head last.
    pub(crate) snake: Option<(&'a [CellCoord], Direction)>,
    /// Cells of a suggested route.
    pub(crate) route: Option<&'a [CellCoord]>,
}

/// Renders the level grid as text, one line per tile row.
pub(crate) fn render_level(level: &Level, overlay: Overlay<'_>) -> String {
    let route: HashSet<CellCoord> = overlay
        .route
        .map(|cells| cells.iter().copied().collect())
        .unwrap_or_default();
    let (body, head) = match overlay.snake {
        Some((path, facing)) => {
            let body: HashSet<CellCoord> = path.iter().copied().collect();
            (body, path.last().map(|cell| (*cell, facing)))
        }
        None => (HashSet::new(), None),
    };

    let grid = level.grid();
    let mut output = String::with_capacity(text_capacity(grid.rows(), grid.columns()));
    for row in 0..grid.rows() {
        let Some(tiles) = grid.row(row) else {
            continue;
        };
        for (column, tile) in (0..).zip(tiles) {
            let cell = CellCoord::new(row, column);
            let glyph = match head {
                Some((head_cell, facing)) if head_cell == cell => head_glyph(facing),
                _ if *tile == Tile::Wall => WALL,
                _ if cell == level.exit() => EXIT,
                _ if body.contains(&cell) => BODY,
                _ if cell == level.entry() => ENTRY,
                _ if route.contains(&cell) => ROUTE,
                _ => FLOOR,
            };
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}

/// Bytes needed for `rows` lines of `columns` glyphs plus newlines.
fn text_capacity(rows: u32, columns: u32) -> usize {
    let line = usize::try_from(columns)
        .ok()
        .and_then(|columns| columns.checked_add(1));
    let rows = usize::try_from(rows).ok();
    line.zip(rows)
        .and_then(|(line, rows)| line.checked_mul(rows))
        .unwrap_or(0)
}

fn head_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Right => '>',
        Direction::Down => 'v',
        Direction::Left => '<',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_snake_core::{LevelId, OccupancyGrid};

    fn corridor() -> Level {
        let grid = OccupancyGrid::parse(
            "
            #####
            #...#
            #####
            ",
        )
        .expect("grid parses");
        Level::new(
            LevelId::new(1),
            "Corridor".to_owned(),
            grid,
            CellCoord::new(1, 1),
            CellCoord::new(1, 3),
            2,
            2,
        )
    }

    #[test]
    fn capacity_counts_newlines_and_never_overflows() {
        assert_eq!(text_capacity(3, 5), 18);
        assert_eq!(text_capacity(0, 7), 0);
        let huge = text_capacity(u32::MAX, u32::MAX);
        if usize::BITS <= 32 {
            assert_eq!(huge, 0);
        } else {
            assert_eq!(huge, (u32::MAX as usize + 1) * u32::MAX as usize);
        }
    }

    #[test]
    fn bare_level_marks_entry_and_exit() {
        let rendered = render_level(&corridor(), Overlay::default());
        assert_eq!(rendered, "#####\n#S E#\n#####\n");
    }

    #[test]
    fn route_overlay_fills_the_corridor() {
        let level = corridor();
        let route = [
            CellCoord::new(1, 1),
            CellCoord::new(1, 2),
            CellCoord::new(1, 3),
        ];
        let rendered = render_level(
            &level,
            Overlay {
                route: Some(&route),
                ..Overlay::default()
            },
        );
        assert_eq!(rendered, "#####\n#S.E#\n#####\n");
    }

    #[test]
    fn snake_head_points_along_facing() {
        let level = corridor();
        let path = [CellCoord::new(1, 1), CellCoord::new(1, 2)];
        let rendered = render_level(
            &level,
            Overlay {
                snake: Some((&path, Direction::Right)),
                ..Overlay::default()
            },
        );
        assert_eq!(rendered, "#####\n#o>E#\n#####\n");
    }
}
