//! The orchestrator: ties generation, the event engine, and both solver tiers
//! into the `solve` loop. Ports `original_source/board.py::Board::solve`.

use crate::board::Board;
use crate::second_order::SecondOrderOutcome;
use crate::types::{BoardSolver, BoardState, Coordinate};

impl Board {
    /// Plays the board from `start_position` to a terminal state.
    ///
    /// 1. Opens the start cell (cascades may already resolve large regions).
    /// 2. Repeats: check win, first-order sweep, second-order over the active
    ///    frontier, then second-order over all unknowns with the global
    ///    mine-count row and guessing enabled -- which always makes progress
    ///    (classification or a guess) unless the system is degenerate.
    pub fn solve(&mut self, start_position: Coordinate) {
        let (sx, sy) = start_position;
        self.open_at(sx, sy);

        while self.state == BoardState::Undefined {
            if self.opened_cells == self.width * self.height - self.generated_mines {
                self.state = BoardState::Won;
                break;
            }

            if self.apply_first_order() {
                continue;
            }

            if matches!(
                self.apply_second_order(false, false),
                SecondOrderOutcome::Progress
            ) {
                continue;
            }

            match self.apply_second_order(true, true) {
                SecondOrderOutcome::NoProgress => break,
                _ => continue,
            }
        }
    }
}
