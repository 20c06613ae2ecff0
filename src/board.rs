//! Board construction, grid topology, and lifecycle. Ports
//! `original_source/board.py::Board` (`__init__`, `configure`, `reset`,
//! `link_neighbors`, `reset_cells`, `get_result`, `str_real`, `str_revealed`).

use std::collections::HashMap;

use crate::backend::{DenseLstsq, LstsqBackend};
use crate::cell::Cell;
use crate::rng::SolverRng;
use crate::types::{BoardResult, BoardState, Coordinate, GenSettings};

/// Owns the grid, aggregate counters, and the backend used for second-order
/// solving. Intended to be constructed once and `configure`d repeatedly --
/// storage is reused across `configure` calls when dimensions match (see
/// `DESIGN.md` on the 10k-expert-board memory note from `benchmark.py`).
pub struct Board {
    pub(crate) cells: Vec<Cell>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) state: BoardState,
    pub(crate) opened_cells: usize,
    pub(crate) flagged_cells: usize,
    pub(crate) generated_mines: usize,
    pub(crate) settings: Option<GenSettings>,
    /// Maps a closed cell's flat index to its current column index in the
    /// second-order solver's matrix. Membership in this map is the definition of
    /// "unknown" (`Closed`); entries are removed the instant a cell is flagged or
    /// opened (see `event.rs`).
    pub(crate) unknown_cell_lookup: HashMap<usize, usize>,
    pub(crate) debug: bool,
    pub(crate) backend: Box<dyn LstsqBackend>,
}

impl Board {
    /// Creates an empty, unconfigured board using the default dense backend.
    pub fn new() -> Self {
        Board::with_backend(Box::new(DenseLstsq))
    }

    /// Creates an empty, unconfigured board using a caller-supplied backend.
    pub fn with_backend(backend: Box<dyn LstsqBackend>) -> Self {
        Board {
            cells: Vec::new(),
            width: 0,
            height: 0,
            state: BoardState::Undefined,
            opened_cells: 0,
            flagged_cells: 0,
            generated_mines: 0,
            settings: None,
            unknown_cell_lookup: HashMap::new(),
            debug: false,
            backend,
        }
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn opened_cells(&self) -> usize {
        self.opened_cells
    }

    pub fn flagged_cells(&self) -> usize {
        self.flagged_cells
    }

    pub fn generated_mines(&self) -> usize {
        self.generated_mines
    }

    #[inline]
    pub(crate) fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resets per-game aggregate state. Grid allocation and neighbor topology
    /// survive -- `configure` decides whether those need rebuilding.
    fn reset(&mut self) {
        self.state = BoardState::Undefined;
        self.opened_cells = 0;
        self.flagged_cells = 0;
        self.generated_mines = 0;
        self.settings = None;
        self.unknown_cell_lookup.clear();
    }

    /// Configures the board for a new game: reallocates the grid if dimensions
    /// changed, relinks neighbors, resets cell counters, and generates mines.
    /// Returns the start position that `solve` should open.
    ///
    /// Panics if `width == 0` or `height == 0` -- a zero-size board is a
    /// programmer error, not a runtime outcome (`spec.md` §7).
    pub fn configure(&mut self, width: usize, height: usize, settings: GenSettings) -> Coordinate {
        assert!(width > 0 && height > 0, "board dimensions must be positive");

        self.reset();
        let reconfigure = self.width != width || self.height != height || self.cells.is_empty();
        self.width = width;
        self.height = height;

        if reconfigure {
            self.cells = (0..height)
                .flat_map(|y| (0..width).map(move |x| (x, y)))
                .map(|(x, y)| Cell::new(x, y))
                .collect();
            self.link_neighbors();
        } else {
            self.reset_cells();
        }

        self.settings = Some(settings);
        let start = self.generate_mines();

        // spec.md §4.6 step 1: "initialize unknown-cell lookup from all
        // cells" -- every cell starts Closed, so the lookup's membership
        // (its definition of "unknown") must start as the full cell set, not
        // just whatever `apply_second_order` later inserts. Column values are
        // placeholders here; `apply_second_order` reassigns them per call.
        self.unknown_cell_lookup = (0..self.cells.len()).map(|idx| (idx, 0)).collect();

        start
    }

    /// Convenience: `configure` then `solve` in one call.
    pub fn configure_and_solve(
        &mut self,
        width: usize,
        height: usize,
        settings: GenSettings,
    ) -> BoardResult {
        let start = self.configure(width, height, settings);
        self.solve(start);
        self.get_result()
    }

    /// Precomputes each cell's (≤8) neighbor indices in a fixed, deterministic
    /// order: a row-major scan of the 3×3 block around the cell, `dy` outer then
    /// `dx` inner, skipping the center (`spec.md` §4.1).
    fn link_neighbors(&mut self) {
        let (width, height) = (self.width, self.height);
        for y in 0..height {
            for x in 0..width {
                let mut neighbors = Vec::with_capacity(8);
                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i32 + dx;
                        let ny = y as i32 + dy;
                        if nx >= 0 && nx < width as i32 && ny >= 0 && ny < height as i32 {
                            neighbors.push(ny as usize * width + nx as usize);
                        }
                    }
                }
                let idx = y * width + x;
                self.cells[idx].neighbor_count = neighbors.len();
                self.cells[idx].neighbors = neighbors;
            }
        }
    }

    /// Resets mutable per-cell state (mine flag, counters, lifecycle state,
    /// `satisfied`) without touching topology.
    fn reset_cells(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    pub fn get_result(&self) -> BoardResult {
        BoardResult {
            width: self.width,
            height: self.height,
            mines: self.generated_mines,
            state: self.state,
        }
    }

    /// Ground-truth rendering: one char per cell, rows joined by `\n`, no
    /// trailing newline.
    pub fn str_real(&self) -> String {
        self.render(|cell| cell.str_real())
    }

    /// Player-view rendering. `hide` blanks cells already proven `satisfied`.
    pub fn str_revealed(&self, hide: bool) -> String {
        self.render(|cell| cell.str_revealed(hide))
    }

    fn render(&self, f: impl Fn(&Cell) -> char) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width {
                out.push(f(&self.cells[self.index_of(x, y)]));
            }
        }
        out
    }

    /// Draws and records a fresh seed if `settings.seed` was absent, then
    /// returns a `SolverRng` seeded for this generation run. Mutates
    /// `self.settings` in place, matching `spec.md` §4.2 ("store it back into
    /// settings so it can be logged/reproduced").
    pub(crate) fn seed_rng(&mut self) -> SolverRng {
        let needs_seed = matches!(&self.settings, Some(s) if s.seed.is_none());
        if needs_seed {
            let seed = SolverRng::from_entropy().draw_seed();
            if let Some(settings) = self.settings.as_mut() {
                settings.seed = Some(seed);
            }
        }
        let seed = self.settings.as_ref().and_then(|s| s.seed).expect("seed must be set by now");
        if self.debug {
            tracing::debug!(seed, "solving with seed");
        }
        SolverRng::from_seed(seed)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellState;

    #[test]
    fn configure_allocates_grid_with_expected_dimensions() {
        let mut board = Board::new();
        board.configure(5, 4, GenSettings::new(3).with_seed(1));
        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 4);
        assert_eq!(board.cells.len(), 20);
    }

    #[test]
    fn corner_cell_has_three_neighbors() {
        let mut board = Board::new();
        board.configure(5, 5, GenSettings::new(1).with_seed(1));
        let idx = board.index_of(0, 0);
        assert_eq!(board.cells[idx].neighbor_count, 3);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        let mut board = Board::new();
        board.configure(5, 5, GenSettings::new(1).with_seed(1));
        let idx = board.index_of(2, 0);
        assert_eq!(board.cells[idx].neighbor_count, 5);
    }

    #[test]
    fn center_cell_has_eight_neighbors() {
        let mut board = Board::new();
        board.configure(5, 5, GenSettings::new(1).with_seed(1));
        let idx = board.index_of(2, 2);
        assert_eq!(board.cells[idx].neighbor_count, 8);
    }

    #[test]
    fn reconfigure_with_same_dimensions_reuses_allocation() {
        let mut board = Board::new();
        board.configure(4, 4, GenSettings::new(2).with_seed(1));
        let ptr_before = board.cells.as_ptr();
        board.configure(4, 4, GenSettings::new(2).with_seed(2));
        let ptr_after = board.cells.as_ptr();
        assert_eq!(ptr_before, ptr_after);
    }

    #[test]
    fn reconfigure_with_different_dimensions_reallocates() {
        let mut board = Board::new();
        board.configure(4, 4, GenSettings::new(2).with_seed(1));
        board.configure(6, 6, GenSettings::new(2).with_seed(1));
        assert_eq!(board.cells.len(), 36);
    }

    #[test]
    fn configure_resets_previous_cell_state() {
        let mut board = Board::new();
        board.configure(4, 4, GenSettings::new(2).with_seed(1));
        board.open_at(0, 0);
        board.configure(4, 4, GenSettings::new(2).with_seed(1));
        for cell in &board.cells {
            assert_eq!(cell.state, CellState::Closed);
        }
        assert_eq!(board.opened_cells, 0);
    }

    #[test]
    #[should_panic]
    fn zero_width_panics() {
        let mut board = Board::new();
        board.configure(0, 4, GenSettings::new(1));
    }

    #[test]
    fn str_real_and_str_revealed_have_no_trailing_newline() {
        let mut board = Board::new();
        board.configure(3, 3, GenSettings::new(1).with_seed(1));
        let real = board.str_real();
        assert_eq!(real.matches('\n').count(), 2);
        assert!(!real.ends_with('\n'));
        let revealed = board.str_revealed(false);
        assert_eq!(revealed.matches('\n').count(), 2);
    }
}
