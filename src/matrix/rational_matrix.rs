// src/matrix/rational_matrix.rs

use serde::{Deserialize, Serialize};

use crate::rational::Rational;

/// A square matrix of exact rationals. Elimination-based operations pivot
/// by row swapping; a missing pivot surfaces as `None` from `solve` and a
/// zero determinant, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationalMatrix {
    size: usize,
    rows: Vec<Vec<Rational>>,
}

impl RationalMatrix {
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Self {
        let size = rows.len();
        assert!(rows.iter().all(|r| r.len() == size), "matrix must be square");
        RationalMatrix { size, rows }
    }

    pub fn identity(size: usize) -> Self {
        let rows = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| if i == j { Rational::one() } else { Rational::zero() })
                    .collect()
            })
            .collect();
        RationalMatrix { size, rows }
    }

    pub fn zero(size: usize) -> Self {
        RationalMatrix {
            size,
            rows: vec![vec![Rational::zero(); size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entry(&self, i: usize, j: usize) -> &Rational {
        &self.rows[i][j]
    }

    pub fn set_entry(&mut self, i: usize, j: usize, value: Rational) {
        self.rows[i][j] = value;
    }

    pub fn row(&self, i: usize) -> &[Rational] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    pub fn transpose(&self) -> RationalMatrix {
        let rows = (0..self.size)
            .map(|j| (0..self.size).map(|i| self.rows[i][j].clone()).collect())
            .collect();
        RationalMatrix { size: self.size, rows }
    }

    pub fn multiply(&self, other: &RationalMatrix) -> RationalMatrix {
        assert_eq!(self.size, other.size, "dimension mismatch");
        let mut result = RationalMatrix::zero(self.size);
        for i in 0..self.size {
            for k in 0..self.size {
                if self.rows[i][k].is_zero() {
                    continue;
                }
                for j in 0..self.size {
                    let term = &self.rows[i][k] * &other.rows[k][j];
                    result.rows[i][j] = &result.rows[i][j] + &term;
                }
            }
        }
        result
    }

    pub fn add(&self, other: &RationalMatrix) -> RationalMatrix {
        assert_eq!(self.size, other.size, "dimension mismatch");
        let rows = (0..self.size)
            .map(|i| (0..self.size).map(|j| &self.rows[i][j] + &other.rows[i][j]).collect())
            .collect();
        RationalMatrix { size: self.size, rows }
    }

    pub fn scale(&self, factor: &Rational) -> RationalMatrix {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v * factor).collect())
            .collect();
        RationalMatrix { size: self.size, rows }
    }

    pub fn trace(&self) -> Rational {
        (0..self.size).fold(Rational::zero(), |acc, i| &acc + &self.rows[i][i])
    }

    /// Determinant by Gaussian elimination with row pivoting.
    pub fn determinant(&self) -> Rational {
        let mut m = self.rows.clone();
        let n = self.size;
        let mut det = Rational::one();

        for col in 0..n {
            let pivot = match (col..n).find(|&r| !m[r][col].is_zero()) {
                Some(p) => p,
                None => return Rational::zero(),
            };
            if pivot != col {
                m.swap(pivot, col);
                det = -&det;
            }
            det = &det * &m[col][col];

            let inv = m[col][col].inv().expect("pivot is nonzero");
            for r in col + 1..n {
                if m[r][col].is_zero() {
                    continue;
                }
                let factor = &m[r][col] * &inv;
                for c in col..n {
                    let sub = &factor * &m[col][c];
                    m[r][c] = &m[r][c] - &sub;
                }
            }
        }

        det
    }

    /// Solves self · x = rhs. `None` when a pivot is missing — the system
    /// is singular and the right-hand side is not representable.
    pub fn solve(&self, rhs: &[Rational]) -> Option<Vec<Rational>> {
        assert_eq!(rhs.len(), self.size, "dimension mismatch");
        let n = self.size;
        let mut m = self.rows.clone();
        let mut b = rhs.to_vec();

        for col in 0..n {
            let pivot = (col..n).find(|&r| !m[r][col].is_zero())?;
            if pivot != col {
                m.swap(pivot, col);
                b.swap(pivot, col);
            }

            let inv = m[col][col].inv().expect("pivot is nonzero");
            for r in 0..n {
                if r == col || m[r][col].is_zero() {
                    continue;
                }
                let factor = &m[r][col] * &inv;
                for c in col..n {
                    let sub = &factor * &m[col][c];
                    m[r][c] = &m[r][c] - &sub;
                }
                let sub = &factor * &b[col];
                b[r] = &b[r] - &sub;
            }
        }

        Some(
            (0..n)
                .map(|i| {
                    let inv = m[i][i].inv().expect("pivot is nonzero");
                    &b[i] * &inv
                })
                .collect(),
        )
    }
}
