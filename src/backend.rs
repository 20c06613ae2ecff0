//! Pluggable least-squares backend (`spec.md` §6).
//!
//! `A` is represented sparsely as one `Vec<usize>` of set column indices per row
//! (every entry is implicitly `1.0`, matching the 0/1 adjacency matrix
//! `spec.md` §4.5 builds) -- both backends consume the same `SparseRows` so the
//! matrix-construction code in `second_order.rs` never needs to know which
//! backend is active.

use nalgebra::{DMatrix, DVector};

/// A sparse 0/1 matrix: `rows[r]` lists the columns set to `1` in row `r`.
pub struct SparseRows {
    pub rows: Vec<Vec<usize>>,
    pub cols: usize,
}

impl SparseRows {
    pub fn new(cols: usize) -> Self {
        SparseRows { rows: Vec::new(), cols }
    }

    pub fn push_row(&mut self, row: Vec<usize>) {
        debug_assert!(row.iter().all(|&c| c < self.cols));
        self.rows.push(row);
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// `x = argmin ‖A·x − b‖₂`, for finite inputs returns a finite vector
/// (`spec.md` §6: "no exception discipline required beyond returning a finite
/// vector for finite inputs" -- NaNs from degenerate systems are allowed through
/// and handled by the classification epsilon test in `second_order.rs`).
pub trait LstsqBackend: Send + Sync {
    fn solve(&self, a: &SparseRows, b: &[f64]) -> Vec<f64>;
}

/// Dense solve via SVD, matching `original_source/board.py`'s use of
/// `scipy.linalg.lstsq` -- SVD naturally returns the minimum-norm solution when
/// `A` is rank-deficient, which `spec.md` §4.5 explicitly accepts as correct.
pub struct DenseLstsq;

impl LstsqBackend for DenseLstsq {
    fn solve(&self, a: &SparseRows, b: &[f64]) -> Vec<f64> {
        let (m, n) = (a.num_rows(), a.cols);
        if m == 0 || n == 0 {
            return vec![0.0; n];
        }

        let mut dense = DMatrix::<f64>::zeros(m, n);
        for (r, row) in a.rows.iter().enumerate() {
            for &c in row {
                dense[(r, c)] = 1.0;
            }
        }
        let rhs = DVector::from_row_slice(b);

        let svd = dense.svd(true, true);
        match svd.solve(&rhs, 1e-9) {
            Ok(x) => x.as_slice().to_vec(),
            Err(_) => vec![f64::NAN; n],
        }
    }
}

/// Hand-rolled LSMR-class iterative solver, operating directly on the sparse row
/// lists (no external sparse-matrix crate, per `spec.md` §9's note that a sparse
/// iterative solver is "typically fastest for expert boards"). This is the
/// textbook Golub-Kahan bidiagonalization used by LSQR/LSMR, specialized to a
/// 0/1 matrix and truncated to a bounded iteration count.
pub struct SparseLsmr;

impl SparseLsmr {
    const MAX_FACTOR: usize = 2;
    const TOL: f64 = 1e-10;

    fn mat_vec(a: &SparseRows, x: &[f64]) -> Vec<f64> {
        a.rows
            .iter()
            .map(|row| row.iter().map(|&c| x[c]).sum())
            .collect()
    }

    fn mat_t_vec(a: &SparseRows, y: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; a.cols];
        for (r, row) in a.rows.iter().enumerate() {
            for &c in row {
                out[c] += y[r];
            }
        }
        out
    }

    fn norm(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
        for (yi, xi) in y.iter_mut().zip(x) {
            *yi += alpha * xi;
        }
    }

    fn scale(v: &mut [f64], s: f64) {
        for x in v.iter_mut() {
            *x *= s;
        }
    }
}

impl LstsqBackend for SparseLsmr {
    fn solve(&self, a: &SparseRows, b: &[f64]) -> Vec<f64> {
        let (m, n) = (a.num_rows(), a.cols);
        if m == 0 || n == 0 {
            return vec![0.0; n];
        }

        // LSQR (Paige-Saunders): minimizes ||Ax - b||_2 via Golub-Kahan
        // bidiagonalization, without ever forming A^T A.
        let mut u: Vec<f64> = b.to_vec();
        let mut beta = Self::norm(&u);
        if beta > 0.0 {
            Self::scale(&mut u, 1.0 / beta);
        }

        let mut v = Self::mat_t_vec(a, &u);
        let mut alpha = Self::norm(&v);
        if alpha > 0.0 {
            Self::scale(&mut v, 1.0 / alpha);
        }

        let mut w = v.clone();
        let mut x = vec![0.0; n];

        let mut phi_bar = beta;
        let mut rho_bar = alpha;

        let max_iter = Self::MAX_FACTOR * (m + n) + 4;
        for _ in 0..max_iter {
            if alpha.abs() < Self::TOL && beta.abs() < Self::TOL {
                break;
            }

            // Bidiagonalization step.
            let mut au = Self::mat_vec(a, &v);
            Self::axpy(-alpha, &u, &mut au);
            u = au;
            beta = Self::norm(&u);
            if beta > 0.0 {
                Self::scale(&mut u, 1.0 / beta);
            }

            let mut atv = Self::mat_t_vec(a, &u);
            Self::axpy(-beta, &v, &mut atv);
            v = atv;
            alpha = Self::norm(&v);
            if alpha > 0.0 {
                Self::scale(&mut v, 1.0 / alpha);
            }

            // Orthogonal transformation (Givens rotation).
            let rho = (rho_bar * rho_bar + beta * beta).sqrt();
            if rho.abs() < f64::EPSILON {
                break;
            }
            let c = rho_bar / rho;
            let s = beta / rho;
            let theta = s * alpha;
            rho_bar = -c * alpha;
            let phi = c * phi_bar;
            phi_bar = s * phi_bar;

            let step = phi / rho;
            Self::axpy(step, &w, &mut x);

            for (wi, vi) in w.iter_mut().zip(&v) {
                *wi = *vi - (theta / rho) * *wi;
            }

            if phi_bar.abs() < Self::TOL {
                break;
            }
        }

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_from(indices: &[&[usize]], cols: usize) -> SparseRows {
        let mut a = SparseRows::new(cols);
        for r in indices {
            a.push_row(r.to_vec());
        }
        a
    }

    #[test]
    fn dense_solves_exact_square_system() {
        // x0 + x1 = 1, x0 = 1 => x0=1, x1=0
        let a = rows_from(&[&[0, 1], &[0]], 2);
        let x = DenseLstsq.solve(&a, &[1.0, 1.0]);
        assert!((x[0] - 1.0).abs() < 1e-6);
        assert!((x[1] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn dense_handles_underdetermined_system_with_min_norm() {
        // x0 + x1 = 1, one equation two unknowns -> min norm solution x0=x1=0.5
        let a = rows_from(&[&[0, 1]], 2);
        let x = DenseLstsq.solve(&a, &[1.0]);
        assert!((x[0] - 0.5).abs() < 1e-6);
        assert!((x[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sparse_lsmr_agrees_with_dense_on_exact_system() {
        let a = rows_from(&[&[0, 1], &[0]], 2);
        let dense = DenseLstsq.solve(&a, &[1.0, 1.0]);
        let sparse = SparseLsmr.solve(&a, &[1.0, 1.0]);
        assert!((dense[0] - sparse[0]).abs() < 1e-4);
        assert!((dense[1] - sparse[1]).abs() < 1e-4);
    }

    #[test]
    fn sparse_lsmr_agrees_with_dense_on_classic_corner_case() {
        // Three unknowns, two clues sharing one unknown: classic minesweeper
        // frontier shape.
        let a = rows_from(&[&[0, 1], &[1, 2]], 3);
        let b = [1.0, 1.0];
        let dense = DenseLstsq.solve(&a, &b);
        let sparse = SparseLsmr.solve(&a, &b);
        for i in 0..3 {
            assert!((dense[i] - sparse[i]).abs() < 1e-3, "index {i}: {} vs {}", dense[i], sparse[i]);
        }
    }

    #[test]
    fn empty_matrix_returns_zero_vector() {
        let a = SparseRows::new(0);
        assert_eq!(DenseLstsq.solve(&a, &[]), Vec::<f64>::new());
        assert_eq!(SparseLsmr.solve(&a, &[]), Vec::<f64>::new());
    }
}
