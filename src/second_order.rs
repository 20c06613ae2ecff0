//! Second-order (least-squares) deduction over the frontier constraint matrix.
//! Ports `original_source/board.py::Board::solve_complex`.

use crate::backend::SparseRows;
use crate::board::Board;
use crate::types::CellState;

const EPSILON: f64 = 1e-4;

/// Outcome of one second-order invocation, reported to the orchestrator.
pub(crate) enum SecondOrderOutcome {
    /// At least one cell was flagged or opened.
    Progress,
    /// No classification fired; a guess was made (only possible when
    /// `guess = true` was passed in).
    Guessed,
    /// Nothing could be done (degenerate system, or no strictly-positive
    /// column to guess from).
    NoProgress,
}

impl Board {
    /// Runs one second-order pass.
    ///
    /// `augmented` selects the active set (frontier-only vs. all unknown cells)
    /// and whether a trailing all-ones row ties the system to the global mine
    /// budget (`spec.md` §4.5's "global augmentation"). `guess` additionally
    /// permits picking the smallest strictly-positive column when no
    /// classification fires.
    pub(crate) fn apply_second_order(&mut self, augmented: bool, guess: bool) -> SecondOrderOutcome {
        let (rows_cells, cols_cells) = self.active_set(augmented);
        if cols_cells.is_empty() || rows_cells.is_empty() {
            return SecondOrderOutcome::NoProgress;
        }

        // Column indices are assigned by iteration order through the active
        // set and recorded in the unknown-cell lookup, per spec.md §4.5, so
        // later classification can map a column back to a cell.
        for (col, &idx) in cols_cells.iter().enumerate() {
            self.unknown_cell_lookup.insert(idx, col);
        }

        let mut a = SparseRows::new(cols_cells.len());
        let mut b: Vec<f64> = Vec::with_capacity(rows_cells.len() + 1);

        for &row_idx in &rows_cells {
            let cell = &self.cells[row_idx];
            let row: Vec<usize> = cell
                .neighbors
                .iter()
                .filter_map(|&n| self.unknown_cell_lookup.get(&n).copied())
                .collect();
            a.push_row(row);
            b.push((cell.neighbor_mine_count as f64) - (cell.neighbor_flag_count as f64));
        }

        if augmented {
            let all_ones: Vec<usize> = (0..cols_cells.len()).collect();
            a.push_row(all_ones);
            b.push((self.generated_mines as f64) - (self.flagged_cells as f64));
        }

        let x = self.backend.solve(&a, &b);

        let mut progress = false;
        let mut best_guess: Option<(usize, f64)> = None;

        for (col, &idx) in cols_cells.iter().enumerate() {
            let mut xc = x[col];
            if xc.abs() < EPSILON {
                xc = 0.0;
            } else if (xc - 1.0).abs() < EPSILON {
                xc = 1.0;
            }

            if xc == 1.0 {
                self.flag_cell(idx);
                progress = true;
            } else if xc == 0.0 {
                self.open_cell(idx);
                progress = true;
            } else if xc.is_finite() && xc > 0.0 {
                // Deterministic column-order tie-break (spec.md §9's
                // recommended default): keep the first-seen smallest value.
                if best_guess.map(|(_, v)| xc < v).unwrap_or(true) {
                    best_guess = Some((idx, xc));
                }
            }
        }

        if progress {
            return SecondOrderOutcome::Progress;
        }

        if guess {
            if let Some((idx, _)) = best_guess {
                self.open_cell(idx);
                return SecondOrderOutcome::Guessed;
            }
        }

        SecondOrderOutcome::NoProgress
    }

    /// `augmented = false`: frontier-only active set (Opened-unsatisfied rows,
    /// Closed-adjacent-to-opened columns). `augmented = true`: every currently
    /// unknown (Closed) cell is a column, and every Opened-unsatisfied cell on
    /// the whole board is a row.
    fn active_set(&self, augmented: bool) -> (Vec<usize>, Vec<usize>) {
        if augmented {
            // Iterate cells in row-major order rather than the unknown lookup's
            // hash order -- column assignment must be deterministic for a given
            // seed (spec.md §4.5: "assigned by iteration order through the
            // active set"), and `HashMap` iteration order is not.
            let mut rows = Vec::new();
            let mut cols = Vec::new();
            for (idx, cell) in self.cells.iter().enumerate() {
                match cell.state {
                    CellState::Opened if !cell.satisfied => rows.push(idx),
                    CellState::Closed => cols.push(idx),
                    _ => {}
                }
            }
            return (rows, cols);
        }

        let mut rows = Vec::new();
        let mut cols = Vec::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            match cell.state {
                CellState::Opened if !cell.satisfied => rows.push(idx),
                CellState::Closed if cell.neighbor_opened_count > 0 => cols.push(idx),
                _ => {}
            }
        }
        (rows, cols)
    }
}
