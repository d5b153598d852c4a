#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Move controller that owns the world and drives one full move at a time.
//!
//! A move is rejected outright once every cell holds a tile: the controller
//! enters [`MoveState::Lost`] and stays there. Otherwise the shift is applied,
//! and exactly one tile is spawned when the shift changed the board.

use log::{debug, info, warn};
use twenty48_core::{
    BoardView, CellCoord, Command, Direction, Event, GridSize, MoveState, TileValue,
};
use twenty48_system_spawning::{Config as SpawnConfig, SpawnError, Spawning};
use twenty48_world::{self as world, query, World};

/// Number of tiles placed before the first move is accepted.
pub const INITIAL_TILES: usize = 2;

/// Configuration parameters required to start a game.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    size: GridSize,
    spawning: SpawnConfig,
}

impl Config {
    /// Creates a new configuration for a grid of the provided size.
    #[must_use]
    pub const fn new(size: GridSize, spawning: SpawnConfig) -> Self {
        Self { size, spawning }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }
}

/// Result of a single move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The shift changed the board and one tile was spawned.
    Accepted {
        /// Cell that received the new tile.
        cell: CellCoord,
        /// Value of the new tile.
        value: TileValue,
    },
    /// The shift had no effect; nothing was spawned.
    Ignored,
    /// The board was full before the move; the game is over.
    Lost,
}

/// Owns the authoritative world and sequences moves and spawns.
#[derive(Debug)]
pub struct Controller {
    world: World,
    spawning: Spawning,
    state: MoveState,
    accepted_moves: u64,
}

impl Controller {
    /// Creates an empty grid of the configured size and places the initial tiles.
    pub fn new_game(config: Config) -> Result<Self, SpawnError> {
        let mut controller = Self::from_world(World::new(), config.spawning);
        let mut events = Vec::new();
        world::apply(
            &mut controller.world,
            Command::ConfigureGrid {
                size: config.size(),
            },
            &mut events,
        );

        for _ in 0..INITIAL_TILES {
            let command = controller
                .spawning
                .spawn_random(query::board_view(&controller.world))?;
            let _ = controller.execute(command);
        }

        let size = config.size();
        info!("started a {}x{} game", size.width(), size.height());
        Ok(controller)
    }

    /// Resumes play on an existing world without placing initial tiles.
    #[must_use]
    pub fn from_world(world: World, spawning: SpawnConfig) -> Self {
        Self {
            world,
            spawning: Spawning::new(spawning),
            state: MoveState::Ready,
            accepted_moves: 0,
        }
    }

    /// Performs one full move towards `direction`.
    ///
    /// Returns an error only when the board changed but no empty cell could
    /// be drawn for the follow-up spawn. The shifted board is kept and the
    /// controller enters [`MoveState::Lost`].
    pub fn make_move(&mut self, direction: Direction) -> Result<MoveOutcome, SpawnError> {
        if self.state == MoveState::Lost {
            return Ok(MoveOutcome::Lost);
        }

        if query::is_full(&self.world) {
            info!("board full before shifting {direction:?}; game lost");
            self.state = MoveState::Lost;
            return Ok(MoveOutcome::Lost);
        }

        let events = self.execute(Command::Shift { direction });
        let mut commands = Vec::new();
        if let Err(error) =
            self.spawning
                .handle(&events, query::board_view(&self.world), &mut commands)
        {
            warn!("shift {direction:?} left no room for a new tile; game lost");
            self.state = MoveState::Lost;
            return Err(error);
        }

        let mut outcome = MoveOutcome::Ignored;
        for command in commands {
            for event in self.execute(command) {
                if let Event::TileSpawned { cell, value } = event {
                    outcome = MoveOutcome::Accepted { cell, value };
                }
            }
        }

        if let MoveOutcome::Accepted { .. } = outcome {
            self.accepted_moves += 1;
        } else {
            debug!("shift {direction:?} had no effect");
        }
        Ok(outcome)
    }

    /// Current state of the move state machine.
    #[must_use]
    pub const fn state(&self) -> MoveState {
        self.state
    }

    /// Reports whether the game is over.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.state == MoveState::Lost
    }

    /// Number of moves that changed the board.
    #[must_use]
    pub const fn accepted_moves(&self) -> u64 {
        self.accepted_moves
    }

    /// Read-only view of the grid for rendering.
    #[must_use]
    pub fn board(&self) -> BoardView<'_> {
        query::board_view(&self.world)
    }

    /// Read-only access to the owned world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    fn execute(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }
}
