//! First-order (local, O(1)) deduction. Ports
//! `original_source/board.py::Board::solve`'s first pass, the two trivial rules
//! also applied opportunistically inside `event.rs` during cascades.

use crate::board::Board;
use crate::types::CellState;

impl Board {
    /// Sweeps every Opened, unsatisfied cell applying Rule A (open-safe) and
    /// Rule B (flag-forced), repeating whole-board sweeps until a sweep fires
    /// nothing. Returns whether any cell was opened or flagged.
    ///
    /// Most of this work already happens inside `open_cell`/`flag_cell` as they
    /// cascade (`spec.md` §4.4); this explicit pass only catches cells whose
    /// preconditions became true afterward -- e.g. a neighbor flagged by a
    /// distant cascade satisfying `C` without ever calling `open_cell`/
    /// `flag_cell` on `C` itself.
    pub(crate) fn apply_first_order(&mut self) -> bool {
        let mut any_progress = false;
        loop {
            let mut progress = false;

            let frontier: Vec<usize> = self
                .cells
                .iter()
                .enumerate()
                .filter(|(_, c)| c.state == CellState::Opened && !c.satisfied)
                .map(|(idx, _)| idx)
                .collect();

            for idx in frontier {
                let cell = &self.cells[idx];
                let open_safe = cell.neighbor_mine_count == cell.neighbor_flag_count;
                let flag_forced =
                    cell.neighbor_mine_count == cell.neighbor_count - cell.neighbor_opened_count;

                if open_safe {
                    let neighbors = self.cells[idx].neighbors.clone();
                    for n in neighbors {
                        if self.cells[n].state == CellState::Closed {
                            self.open_cell(n);
                            progress = true;
                        }
                    }
                }
                if flag_forced {
                    let neighbors = self.cells[idx].neighbors.clone();
                    for n in neighbors {
                        if self.cells[n].state == CellState::Closed {
                            self.flag_cell(n);
                            progress = true;
                        }
                    }
                }

                self.cells[idx].update_satisfied();
            }

            if !progress {
                break;
            }
            any_progress = true;
        }
        any_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenSettings;

    #[test]
    fn trivial_board_solves_with_first_order_alone() {
        // 3x3, one mine, seed=0, start=(1,1): spec.md's own golden scenario
        // claims this requires zero guesses.
        let mut board = Board::new();
        board.configure(3, 3, GenSettings::new(1).with_seed(0).with_start_position((1, 1)));
        board.open_at(1, 1);
        loop {
            if board.opened_cells() + board.flagged_cells() == 9 {
                break;
            }
            if !board.apply_first_order() {
                break;
            }
        }
        assert_eq!(board.opened_cells() + board.flagged_cells(), 9);
    }

    #[test]
    fn first_order_never_opens_a_mine_on_consistent_board() {
        let mut board = Board::new();
        board.configure(9, 9, GenSettings::new(10).with_seed(123).with_start_position((4, 4)).with_force_start_area(true));
        board.open_at(4, 4);
        while board.apply_first_order() {}
        for cell in &board.cells {
            if cell.state == CellState::Opened {
                assert!(!cell.mine, "first-order opened a mine");
            }
        }
    }

    #[test]
    fn first_order_never_flags_a_safe_cell_on_consistent_board() {
        let mut board = Board::new();
        board.configure(9, 9, GenSettings::new(10).with_seed(123).with_start_position((4, 4)).with_force_start_area(true));
        board.open_at(4, 4);
        while board.apply_first_order() {}
        for cell in &board.cells {
            if cell.state == CellState::Flagged {
                assert!(cell.mine, "first-order flagged a safe cell");
            }
        }
    }

    #[test]
    fn no_progress_returns_false_on_already_quiescent_board() {
        let mut board = Board::new();
        board.configure(5, 5, GenSettings::new(1).with_seed(1).with_start_position((0, 0)));
        board.open_at(0, 0);
        while board.apply_first_order() {}
        assert!(!board.apply_first_order());
    }
}
