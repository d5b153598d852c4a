#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state management for Twenty48.

pub mod grid;
pub mod line;

use log::debug;
use twenty48_core::{Command, Event, GridSize, PlacementError, WELCOME_BANNER};

pub use grid::Grid;

/// Represents the authoritative Twenty48 world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
}

impl World {
    /// Creates a new world holding an empty grid of the default size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grid(Grid::new(GridSize::CLASSIC))
    }

    /// Creates a world around an existing grid.
    #[must_use]
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            world.grid = Grid::new(size);
            out_events.push(Event::GridConfigured { size });
        }
        Command::Shift { direction } => {
            let snapshot = world.grid.clone();
            world.grid.apply_direction(direction);

            if world.grid.cells() == snapshot.cells() {
                debug!("shift {direction:?} left the grid untouched");
                out_events.push(Event::ShiftIgnored { direction });
            } else {
                debug!("shift {direction:?} changed the grid");
                out_events.push(Event::TilesShifted { direction });
            }
        }
        Command::PlaceTile { cell, value } => match world.grid.value(cell) {
            None => out_events.push(Event::TilePlacementRejected {
                cell,
                value,
                reason: PlacementError::OutOfBounds,
            }),
            Some(existing) if existing != 0 => out_events.push(Event::TilePlacementRejected {
                cell,
                value,
                reason: PlacementError::Occupied,
            }),
            Some(_) => {
                let _ = world.grid.set(cell, value.get());
                out_events.push(Event::TileSpawned { cell, value });
            }
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use twenty48_core::{BoardView, GridSize};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the grid.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Captures a read-only view of the grid contents.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        world.grid.view()
    }

    /// Reports whether every cell holds a tile.
    #[must_use]
    pub fn is_full(world: &World) -> bool {
        world.grid.is_full()
    }

    /// Number of cells holding a tile.
    #[must_use]
    pub fn tile_count(world: &World) -> usize {
        world.grid.view().occupied_count()
    }
}
