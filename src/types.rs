//! Shared enums and small value types used across the solver core.

use serde::{Deserialize, Serialize};

/// A board coordinate, `(x, y)`.
pub type Coordinate = (usize, usize);

/// Overall game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Undefined,
    Won,
    Lost,
}

/// Per-cell lifecycle state. Once `Flagged` or `Opened`, a cell never returns to
/// `Closed` for the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Closed,
    Opened,
    Flagged,
}

/// Mine generation parameters. Immutable once passed to `configure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenSettings {
    pub mines: usize,
    pub seed: Option<u64>,
    pub start_position: Option<Coordinate>,
    pub force_start_area: bool,
}

impl GenSettings {
    pub fn new(mines: usize) -> Self {
        GenSettings {
            mines,
            seed: None,
            start_position: None,
            force_start_area: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_start_position(mut self, start: Coordinate) -> Self {
        self.start_position = Some(start);
        self
    }

    pub fn with_force_start_area(mut self, force: bool) -> Self {
        self.force_start_area = force;
        self
    }
}

/// Summary of a finished (or in-progress) board, returned by `Board::get_result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResult {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
    pub state: BoardState,
}

/// Selects which `LstsqBackend` a `Board` uses for second-order solving.
///
/// A runtime tag rather than a compile-time generic because the benchmark harness
/// sweeps the same board setup across backends in one process (see
/// `original_source/benchmark.py::benchmark_all_solvers`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSolver {
    DenseLstsq,
    SparseLsmr,
}

impl Default for BoardSolver {
    fn default() -> Self {
        BoardSolver::DenseLstsq
    }
}
