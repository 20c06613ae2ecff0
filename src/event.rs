//! The event engine: `open_cell` / `flag_cell`, the only writers of cell state
//! during solving. Ports `original_source/board.py::Board::{open_cell,flag_cell,
//! open_at,flag_at}`.
//!
//! Implemented with an explicit worklist rather than native recursion --
//! `spec.md` §4.3/§9 explicitly permits this, and it matches the teacher crate's
//! `simulate_reveal` flood fill and `Princic-1837592-mine_sweeperr`'s
//! `MSHash::open`, which both use a queue for predictable stack usage on large
//! zero-count regions.

use std::collections::VecDeque;

use crate::board::Board;
use crate::types::{BoardState, CellState};

impl Board {
    pub fn flag_at(&mut self, x: usize, y: usize) {
        assert!(x < self.width && y < self.height, "flag_at out of bounds");
        let idx = self.index_of(x, y);
        self.flag_cell(idx);
    }

    pub fn open_at(&mut self, x: usize, y: usize) {
        assert!(x < self.width && y < self.height, "open_at out of bounds");
        let idx = self.index_of(x, y);
        self.open_cell(idx);
    }

    /// No-op unless `cell.state == Closed`. Sets `Flagged`, bumps each
    /// neighbor's `neighbor_flag_count`, drops the cell from the unknown lookup,
    /// and updates `satisfied`.
    pub(crate) fn flag_cell(&mut self, idx: usize) {
        if self.cells[idx].state != CellState::Closed {
            return;
        }

        self.cells[idx].state = CellState::Flagged;
        let neighbors = self.cells[idx].neighbors.clone();
        for n in &neighbors {
            self.cells[*n].neighbor_flag_count += 1;
        }

        self.unknown_cell_lookup.remove(&idx);
        self.flagged_cells += 1;

        self.cells[idx].update_satisfied();
    }

    /// No-op unless `cell.state == Closed`. Opening a mine sets `state = Lost`
    /// and stops; opening a safe cell informs neighbors and may cascade into
    /// them via the flag-satisfied / flag-forced rules, using a worklist so an
    /// arbitrarily large zero-count region doesn't grow the native call stack.
    pub(crate) fn open_cell(&mut self, idx: usize) {
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(idx);

        while let Some(idx) = queue.pop_front() {
            if self.cells[idx].state != CellState::Closed {
                continue;
            }

            self.cells[idx].state = CellState::Opened;
            self.opened_cells += 1;

            if self.cells[idx].mine {
                if self.debug {
                    let (x, y) = (self.cells[idx].x, self.cells[idx].y);
                    tracing::debug!(x, y, "opened mine");
                }
                self.state = BoardState::Lost;
                // A loss is terminal: stop processing the rest of the worklist.
                return;
            }

            self.unknown_cell_lookup.remove(&idx);

            // Snapshot the satisfaction predicates *before* this cell's neighbors
            // see their `neighbor_opened_count` incremented, per spec.md §4.3
            // ("use the snapshot taken at function entry").
            let flag_satisfied =
                self.cells[idx].neighbor_mine_count == self.cells[idx].neighbor_flag_count;
            let flag_forced = self.cells[idx].neighbor_mine_count
                == self.cells[idx].neighbor_count - self.cells[idx].neighbor_opened_count;

            let neighbors = self.cells[idx].neighbors.clone();
            for n in neighbors {
                self.cells[n].neighbor_opened_count += 1;

                if flag_satisfied && self.cells[n].state == CellState::Closed {
                    queue.push_back(n);
                }
                if flag_forced && self.cells[n].state == CellState::Closed {
                    self.flag_cell(n);
                }
            }

            self.cells[idx].update_satisfied();
        }
    }
}
