//! Seeded mine placement with a safe starting region. Ports
//! `original_source/board.py::Board::generate_mines`.

use crate::board::Board;
use crate::types::Coordinate;

impl Board {
    /// Determines the start position, builds the set of valid mine positions
    /// (excluding the start, and its 3×3 block when `force_start_area`), and
    /// places `min(settings.mines, valid_positions.len())` mines. Pure function
    /// of `(width, height, settings)`: the same seed always yields the same
    /// layout.
    pub(crate) fn generate_mines(&mut self) -> Coordinate {
        let (width, height) = (self.width, self.height);
        let force_start_area = self
            .settings
            .as_ref()
            .map(|s| s.force_start_area)
            .unwrap_or(false);
        let configured_start = self.settings.as_ref().and_then(|s| s.start_position);

        let mut rng = self.seed_rng();

        let start_position = configured_start
            .unwrap_or_else(|| (rng.gen_range(width), rng.gen_range(height)));
        let (sx, sy) = start_position;

        // Construction order fixed at y-outer, x-inner (spec.md §4.2).
        let mut valid_positions = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                if x == sx && y == sy {
                    continue;
                }
                if force_start_area
                    && x + 1 >= sx
                    && x <= sx + 1
                    && y + 1 >= sy
                    && y <= sy + 1
                {
                    continue;
                }
                valid_positions.push((x, y));
            }
        }

        let requested_mines = self.settings.as_ref().map(|s| s.mines).unwrap_or(0);
        let mine_count = requested_mines.min(valid_positions.len());
        let mine_positions = rng.sample(&valid_positions, mine_count);

        for (x, y) in mine_positions {
            let idx = self.index_of(x, y);
            self.cells[idx].mine = true;
            self.generated_mines += 1;
            let neighbors = self.cells[idx].neighbors.clone();
            for n in neighbors {
                self.cells[n].neighbor_mine_count += 1;
            }
        }

        start_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenSettings;

    #[test]
    fn mine_count_is_clamped_to_valid_positions() {
        let mut board = Board::new();
        // 3x3 board = 9 cells, start excludes 1, requesting 20 mines must clamp to 8.
        board.configure(3, 3, GenSettings::new(20).with_seed(1).with_start_position((1, 1)));
        assert_eq!(board.generated_mines(), 8);
    }

    #[test]
    fn force_start_area_keeps_3x3_block_mine_free() {
        let mut board = Board::new();
        board.configure(
            9,
            9,
            GenSettings::new(40)
                .with_seed(1)
                .with_start_position((4, 4))
                .with_force_start_area(true),
        );
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let x = (4 + dx) as usize;
                let y = (4 + dy) as usize;
                let idx = board.index_of(x, y);
                assert!(!board.cells[idx].mine, "mine found in safe zone at ({x},{y})");
            }
        }
    }

    #[test]
    fn start_cell_itself_is_never_a_mine_without_force_start_area() {
        for trial in 0..20u64 {
            let mut board = Board::new();
            board.configure(
                10,
                10,
                GenSettings::new(90)
                    .with_seed(trial)
                    .with_start_position((5, 5)),
            );
            let idx = board.index_of(5, 5);
            assert!(!board.cells[idx].mine);
        }
    }

    #[test]
    fn same_seed_yields_identical_layout() {
        let mut a = Board::new();
        a.configure(9, 9, GenSettings::new(10).with_seed(123).with_start_position((4, 4)));
        let mut b = Board::new();
        b.configure(9, 9, GenSettings::new(10).with_seed(123).with_start_position((4, 4)));
        assert_eq!(a.str_real(), b.str_real());
    }

    #[test]
    fn absent_seed_is_drawn_and_recorded() {
        let mut board = Board::new();
        board.configure(5, 5, GenSettings::new(3));
        assert!(board.settings.as_ref().unwrap().seed.is_some());
    }

    #[test]
    fn neighbor_mine_counts_match_brute_force() {
        let mut board = Board::new();
        board.configure(8, 8, GenSettings::new(15).with_seed(77));
        for y in 0..8 {
            for x in 0..8 {
                let idx = board.index_of(x, y);
                let expected = board.cells[idx]
                    .neighbors
                    .iter()
                    .filter(|&&n| board.cells[n].mine)
                    .count();
                assert_eq!(board.cells[idx].neighbor_mine_count, expected);
            }
        }
    }
}
