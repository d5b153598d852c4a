#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Twenty48 engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and the move controller
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then reports [`Event`]
//! values for systems to react to deterministically. Systems consume event
//! streams, query immutable [`BoardView`] snapshots, and respond exclusively
//! with new command batches.

use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Twenty48: join the tiles with the arrow keys, Esc quits.";

/// Describes whether the game still accepts moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveState {
    /// Moves are accepted and may change the board.
    Ready,
    /// The board was full before a move, or a shift left no room for a
    /// new tile; terminal.
    Lost,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the grid with an empty one of the provided size.
    ConfigureGrid {
        /// Dimensions of the new grid.
        size: GridSize,
    },
    /// Slides and merges every line of the grid towards one edge.
    Shift {
        /// Edge the tiles gravitate towards.
        direction: Direction,
    },
    /// Places a freshly spawned tile into an empty cell.
    PlaceTile {
        /// Cell that should receive the tile.
        cell: CellCoord,
        /// Value written into the cell.
        value: TileValue,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the grid was replaced by an empty one.
    GridConfigured {
        /// Dimensions of the new grid.
        size: GridSize,
    },
    /// Reports that a shift changed at least one cell.
    TilesShifted {
        /// Direction of the accepted shift.
        direction: Direction,
    },
    /// Reports that a shift left every cell untouched.
    ShiftIgnored {
        /// Direction of the shift that had no effect.
        direction: Direction,
    },
    /// Confirms that a tile was written into a previously empty cell.
    TileSpawned {
        /// Cell that received the tile.
        cell: CellCoord,
        /// Value of the spawned tile.
        value: TileValue,
    },
    /// Reports that a tile placement request was rejected.
    TilePlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Value provided in the placement request.
        value: TileValue,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Edges of the grid that tiles can be shifted towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell, row zero being the top.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Fixed dimensions of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// The classic four by four board.
    pub const CLASSIC: GridSize = GridSize {
        width: 4,
        height: 4,
    };

    /// Validates and creates a grid size.
    pub fn new(width: u32, height: u32) -> Result<Self, GridSizeError> {
        if width == 0 || height == 0 {
            return Err(GridSizeError::ZeroDimension { width, height });
        }

        let too_large = GridSizeError::TooLarge { width, height };
        let width_cells = usize::try_from(width).map_err(|_| too_large)?;
        let height_cells = usize::try_from(height).map_err(|_| too_large)?;
        if width_cells.checked_mul(height_cells).is_none() {
            return Err(too_large);
        }

        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Cell addressed by a row-major index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = self.width as usize;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }
}

/// Reasons a grid size may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridSizeError {
    /// Either dimension was zero.
    #[error("grid dimensions must be positive (received {width}x{height})")]
    ZeroDimension {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
    },
    /// The cell count does not fit in memory addressing.
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
    },
}

/// Values a freshly spawned tile may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileValue {
    /// A tile worth two.
    Two,
    /// A tile worth four.
    Four,
}

impl TileValue {
    /// Numeric cell value written into the grid.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

/// Reasons a tile placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell already holds a tile.
    Occupied,
}

/// Read-only view into the row-major cell values of a grid.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    cells: &'a [u32],
    size: GridSize,
}

impl<'a> BoardView<'a> {
    /// Captures a new board view backed by the provided cell slice.
    ///
    /// `cells` must hold exactly `size.cell_count()` values.
    #[must_use]
    pub fn new(cells: &'a [u32], size: GridSize) -> Self {
        debug_assert_eq!(cells.len(), size.cell_count(), "board view size mismatch");
        Self { cells, size }
    }

    /// Dimensions of the viewed grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Value stored in the cell, or `None` outside the grid. Zero means empty.
    #[must_use]
    pub fn value(&self, cell: CellCoord) -> Option<u32> {
        self.size
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell lies inside the grid and holds no tile.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.value(cell) == Some(0)
    }

    /// Reports whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|value| *value != 0)
    }

    /// Number of cells holding a tile.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|value| **value != 0).count()
    }

    /// Enumerates the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = CellCoord> + 'a {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .filter_map(move |(index, _)| size.cell_at(index))
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u32]> + 'a {
        self.cells.chunks(self.size.width() as usize)
    }

    /// Row-major cell values.
    #[must_use]
    pub const fn cells(&self) -> &'a [u32] {
        self.cells
    }

    /// Copies the board into nested row vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }
}
