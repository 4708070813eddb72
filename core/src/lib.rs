#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Labyrinth Snake engine.
//!
//! This crate defines the values that connect the maze generator, the
//! difficulty calibrator, the level catalog and the play session. Adapters
//! submit [`Command`] values to a session, the session applies them through
//! its `apply` entry point, and then broadcasts [`Event`] values that pure
//! systems (such as progress tracking) consume deterministically.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Cell reached by moving one step in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are not checked here; callers consult the grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.offset();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Some(CellCoord::new(row, column))
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit `(row, column)` offset applied when moving in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`.
    ///
    /// Returns `None` unless the cells are orthogonally adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Self::Right)
            } else {
                Some(Self::Left)
            }
        } else if to.row() > from.row() {
            Some(Self::Down)
        } else {
            Some(Self::Up)
        }
    }
}

/// State of a single occupancy grid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable tile.
    Wall,
    /// Walkable tile carved out of the maze.
    Open,
}

/// Logical size of a maze measured in rooms rather than grid tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MazeDimensions {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl MazeDimensions {
    /// Largest number of rooms accepted along either axis.
    pub const MAX_SIDE: u32 = 1024;

    /// Creates logical dimensions, rejecting zero-sized axes and axes longer
    /// than [`MazeDimensions::MAX_SIDE`].
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return None;
        }
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Some(Self { width, height }),
            _ => None,
        }
    }

    /// Number of logical rooms along the horizontal axis.
    #[must_use]
    pub const fn width(&self) -> NonZeroU32 {
        self.width
    }

    /// Number of logical rooms along the vertical axis.
    #[must_use]
    pub const fn height(&self) -> NonZeroU32 {
        self.height
    }

    /// Number of tile columns in the expanded occupancy grid.
    #[must_use]
    pub const fn grid_columns(&self) -> u32 {
        2 * self.width.get() + 1
    }

    /// Number of tile rows in the expanded occupancy grid.
    #[must_use]
    pub const fn grid_rows(&self) -> u32 {
        2 * self.height.get() + 1
    }

    /// Grid cell that hosts the logical room at `(x, y)`.
    #[must_use]
    pub const fn room_cell(x: u32, y: u32) -> CellCoord {
        CellCoord::new(2 * y + 1, 2 * x + 1)
    }
}

/// Reasons an occupancy grid could not be assembled.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The tile buffer does not match the requested dimensions.
    #[error("expected {expected} tiles for the grid, found {found}")]
    TileCountMismatch {
        /// Number of tiles implied by the dimensions.
        expected: usize,
        /// Number of tiles supplied.
        found: usize,
    },
    /// Rows of a textual grid have differing lengths.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Column count established by the first row.
        expected: usize,
        /// Column count found on the offending row.
        found: usize,
    },
    /// A textual grid contained a character other than `#` or `.`.
    #[error("unexpected character {0:?} in grid text")]
    UnexpectedCharacter(char),
}

/// Immutable rectangular matrix of wall and open tiles stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancyGrid {
    rows: u32,
    columns: u32,
    tiles: Vec<Tile>,
}

impl OccupancyGrid {
    /// Starts building a grid of the provided size with every tile walled.
    #[must_use]
    pub fn builder(rows: u32, columns: u32) -> GridBuilder {
        GridBuilder {
            grid: Self {
                rows,
                columns,
                tiles: vec![Tile::Wall; tile_count(rows, columns)],
            },
        }
    }

    /// Wraps an existing tile buffer.
    pub fn from_tiles(rows: u32, columns: u32, tiles: Vec<Tile>) -> Result<Self, GridError> {
        let expected = tile_count(rows, columns);
        if tiles.len() != expected {
            return Err(GridError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            tiles,
        })
    }

    /// Parses a grid drawn with `#` for walls and `.` for open tiles.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut tiles = Vec::new();
        let mut columns = None;
        let mut rows = 0usize;

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let width = line.chars().count();
            let expected = *columns.get_or_insert(width);
            if width != expected {
                return Err(GridError::RaggedRow {
                    row: rows,
                    expected,
                    found: width,
                });
            }

            for character in line.chars() {
                tiles.push(match character {
                    '#' => Tile::Wall,
                    '.' => Tile::Open,
                    other => return Err(GridError::UnexpectedCharacter(other)),
                });
            }
            rows += 1;
        }

        let columns = columns.unwrap_or(0);
        Self::from_tiles(
            u32::try_from(rows).unwrap_or(u32::MAX),
            u32::try_from(columns).unwrap_or(u32::MAX),
            tiles,
        )
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Tile stored at the provided cell, if it lies within the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the cell is inside the grid and walkable.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.tile(cell) == Some(Tile::Open)
    }

    /// Tiles composing a single row, if the row exists.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[Tile]> {
        if row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(row).ok()?.checked_mul(width)?;
        self.tiles.get(start..start + width)
    }

    /// Number of open tiles in the grid.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == Tile::Open).count()
    }

    /// Iterator over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns.max(1);
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Open)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index / columns, index % columns))
            })
    }

    /// Open orthogonal neighbours of the provided cell.
    pub fn open_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| cell.step(direction))
            .filter(move |neighbor| self.is_open(*neighbor))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Mutable staging area used while carving a grid.
///
/// Finishing the builder yields an immutable [`OccupancyGrid`].
#[derive(Debug)]
pub struct GridBuilder {
    grid: OccupancyGrid,
}

impl GridBuilder {
    /// Opens the tile at `cell`. Returns `false` when the cell is out of bounds.
    pub fn carve(&mut self, cell: CellCoord) -> bool {
        match self.grid.index(cell) {
            Some(index) => {
                self.grid.tiles[index] = Tile::Open;
                true
            }
            None => false,
        }
    }

    /// Freezes the carved tiles into an immutable grid.
    #[must_use]
    pub fn build(self) -> OccupancyGrid {
        self.grid
    }
}

fn tile_count(rows: u32, columns: u32) -> usize {
    let count = u64::from(rows) * u64::from(columns);
    usize::try_from(count).unwrap_or(0)
}

/// One-based identifier of a level within the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier of the level that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Fully specified, immutable puzzle produced by the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    id: LevelId,
    label: String,
    grid: OccupancyGrid,
    entry: CellCoord,
    exit: CellCoord,
    shortest_path: u32,
    move_budget: u32,
}

impl Level {
    /// Assembles a level from calibrated parts.
    #[must_use]
    pub fn new(
        id: LevelId,
        label: String,
        grid: OccupancyGrid,
        entry: CellCoord,
        exit: CellCoord,
        shortest_path: u32,
        move_budget: u32,
    ) -> Self {
        Self {
            id,
            label,
            grid,
            entry,
            exit,
            shortest_path,
            move_budget,
        }
    }

    /// Catalog identifier of the level.
    #[must_use]
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// Human readable name shown in level browsers.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Occupancy grid the snake navigates.
    #[must_use]
    pub const fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Cell where every session starts.
    #[must_use]
    pub const fn entry(&self) -> CellCoord {
        self.entry
    }

    /// Goal cell that wins the level.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }

    /// Length of the optimal route from entry to exit.
    #[must_use]
    pub const fn shortest_path(&self) -> u32 {
        self.shortest_path
    }

    /// Number of moves a session may spend.
    #[must_use]
    pub const fn move_budget(&self) -> u32 {
        self.move_budget
    }

    /// Number of tile rows in the level grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Number of tile columns in the level grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.grid.columns()
    }
}

/// Lifecycle state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Moves are still accepted.
    InProgress,
    /// The snake reached the exit.
    Won,
    /// The move budget ran out before reaching the exit.
    Lost,
}

impl SessionStatus {
    /// Reports whether the session stopped accepting moves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the snake advance one cell in the specified direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the session return to its initial state.
    Reset,
}

/// Events broadcast by a session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the snake head moved between two cells.
    ActorAdvanced {
        /// Cell the head occupied before moving.
        from: CellCoord,
        /// Cell the head occupies after the move.
        to: CellCoord,
        /// Direction the snake now faces.
        direction: Direction,
        /// Moves left in the budget after the step.
        moves_remaining: u32,
    },
    /// Announces that the snake reached the exit.
    LevelWon {
        /// Level that was completed.
        level: LevelId,
        /// Moves spent including the winning step.
        moves_used: u32,
    },
    /// Announces that the move budget ran out.
    LevelLost {
        /// Level that was failed.
        level: LevelId,
    },
    /// Confirms that the session returned to its initial state.
    SessionReset {
        /// Level the session is bound to.
        level: LevelId,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, Direction, GridError, LevelId, MazeDimensions, OccupancyGrid, SessionStatus,
        Tile,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn step_refuses_to_leave_the_origin_quadrant() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(CellCoord::new(1, 0)));
        assert_eq!(origin.step(Direction::Right), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn direction_between_inverts_step() {
        let cell = CellCoord::new(4, 4);
        for direction in Direction::ALL {
            let neighbor = cell.step(direction).expect("interior step");
            assert_eq!(Direction::between(cell, neighbor), Some(direction));
            assert_eq!(
                Direction::between(neighbor, cell),
                Some(direction.opposite())
            );
        }
        assert_eq!(Direction::between(cell, CellCoord::new(5, 5)), None);
        assert_eq!(Direction::between(cell, cell), None);
    }

    #[test]
    fn maze_dimensions_reject_zero_and_oversized_axes() {
        assert!(MazeDimensions::new(0, 3).is_none());
        assert!(MazeDimensions::new(3, 0).is_none());
        assert!(MazeDimensions::new(u32::MAX, 3).is_none());
        assert!(MazeDimensions::new(3, MazeDimensions::MAX_SIDE + 1).is_none());

        let largest = MazeDimensions::new(MazeDimensions::MAX_SIDE, MazeDimensions::MAX_SIDE)
            .expect("largest accepted size");
        assert_eq!(largest.grid_columns(), 2 * MazeDimensions::MAX_SIDE + 1);

        let dimensions = MazeDimensions::new(5, 3).expect("valid");
        assert_eq!(dimensions.grid_columns(), 11);
        assert_eq!(dimensions.grid_rows(), 7);
        assert_eq!(MazeDimensions::room_cell(2, 1), CellCoord::new(3, 5));
    }

    #[test]
    fn builder_starts_walled_and_carves_in_bounds_only() {
        let mut builder = OccupancyGrid::builder(3, 4);
        assert!(builder.carve(CellCoord::new(1, 2)));
        assert!(!builder.carve(CellCoord::new(3, 0)));
        let grid = builder.build();

        assert_eq!(grid.open_count(), 1);
        assert!(grid.is_open(CellCoord::new(1, 2)));
        assert_eq!(grid.tile(CellCoord::new(0, 0)), Some(Tile::Wall));
        assert_eq!(grid.tile(CellCoord::new(0, 4)), None);
        assert_eq!(
            grid.open_cells().collect::<Vec<_>>(),
            vec![CellCoord::new(1, 2)]
        );
    }

    #[test]
    fn parse_reads_walls_and_open_tiles() {
        let grid = OccupancyGrid::parse(
            "
            ###
            #.#
            ###
            ",
        )
        .expect("grid parses");

        assert_eq!((grid.rows(), grid.columns()), (3, 3));
        assert_eq!(grid.open_count(), 1);
        assert_eq!(grid.row(1), Some(&[Tile::Wall, Tile::Open, Tile::Wall][..]));
        assert_eq!(grid.row(3), None);
        assert_eq!(grid.open_neighbors(CellCoord::new(1, 1)).count(), 0);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let error = OccupancyGrid::parse("###\n##").expect_err("ragged grid");
        assert_eq!(
            error,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn from_tiles_rejects_mismatched_buffers() {
        let error = OccupancyGrid::from_tiles(2, 2, vec![Tile::Open; 3]).expect_err("mismatch");
        assert_eq!(
            error,
            GridError::TileCountMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn terminal_statuses_are_won_and_lost() {
        assert!(!SessionStatus::InProgress.is_terminal());
        assert!(SessionStatus::Won.is_terminal());
        assert!(SessionStatus::Lost.is_terminal());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn occupancy_grid_round_trips_through_bincode() {
        let grid = OccupancyGrid::parse("#.#\n...\n#.#").expect("grid parses");
        assert_round_trip(&grid);
    }

    #[test]
    fn level_id_round_trips_through_bincode() {
        assert_round_trip(&LevelId::new(17));
    }
}
