#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting tile placement commands.

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use twenty48_core::{BoardView, CellCoord, Command, Event, TileValue};

/// Number of coordinate draws attempted before a spawn is declared impossible.
pub const DEFAULT_RETRY_BUDGET: u32 = 100_000;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
    retry_budget: u32,
}

impl Config {
    /// Creates a new configuration seeded with the provided value.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    /// Overrides the number of coordinate draws attempted per spawn.
    #[must_use]
    pub const fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Seed used for the random number generator.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Number of coordinate draws attempted per spawn.
    #[must_use]
    pub const fn retry_budget(&self) -> u32 {
        self.retry_budget
    }
}

/// Reasons a spawn may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// No empty cell was drawn within the retry budget.
    #[error("no placement possible after {attempts} attempts")]
    NoPlacement {
        /// Number of coordinate draws that were attempted.
        attempts: u32,
    },
}

/// System that places new tiles on uniformly drawn empty cells.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
    retry_budget: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed()),
            retry_budget: config.retry_budget(),
        }
    }

    /// Emits one placement command for every shift that changed the board.
    ///
    /// Callers must apply the emitted command before handing the next batch
    /// of events over, otherwise two spawns may target the same cell.
    pub fn handle(
        &mut self,
        events: &[Event],
        board: BoardView<'_>,
        out: &mut Vec<Command>,
    ) -> Result<(), SpawnError> {
        for event in events {
            if let Event::TilesShifted { .. } = event {
                out.push(self.spawn_random(board)?);
            }
        }
        Ok(())
    }

    /// Flips a fair coin between the two spawnable values and places the result.
    pub fn spawn_random(&mut self, board: BoardView<'_>) -> Result<Command, SpawnError> {
        let value = self.next_value();
        self.spawn_value(value, board)
    }

    /// Places `value` on an empty cell drawn uniformly at random.
    pub fn spawn_value(
        &mut self,
        value: TileValue,
        board: BoardView<'_>,
    ) -> Result<Command, SpawnError> {
        let cell = self.select_empty_cell(board)?;
        debug!(
            "spawning {} at column {} row {}",
            value.get(),
            cell.column(),
            cell.row()
        );
        Ok(Command::PlaceTile { cell, value })
    }

    /// Draws two or four with equal probability.
    pub fn next_value(&mut self) -> TileValue {
        if self.rng.gen_bool(0.5) {
            TileValue::Two
        } else {
            TileValue::Four
        }
    }

    fn select_empty_cell(&mut self, board: BoardView<'_>) -> Result<CellCoord, SpawnError> {
        let size = board.size();
        for _ in 0..self.retry_budget {
            let cell = CellCoord::new(
                self.rng.gen_range(0..size.width()),
                self.rng.gen_range(0..size.height()),
            );
            if board.is_empty(cell) {
                return Ok(cell);
            }
        }

        warn!(
            "no empty cell found after {} attempts on a {}x{} grid",
            self.retry_budget,
            size.width(),
            size.height()
        );
        Err(SpawnError::NoPlacement {
            attempts: self.retry_budget,
        })
    }
}
