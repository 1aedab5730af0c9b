use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::NnError;

/// Per-cell tolerance used by [`Matrix::approx_eq`].
pub const TOLERANCE: f64 = 1e-11;

/// A 2-D numeric value type backed by flat row-major storage.
///
/// All transformation methods return a fresh `Matrix`; nothing hands
/// out a mutable view of the backing vector, so a value held by the
/// gradient accumulators cannot change behind the caller's back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from a row-major grid. Every row must have the
    /// same length as the first.
    pub fn from_rows(grid: Vec<Vec<f64>>) -> Result<Matrix, NnError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(rows * cols);
        for (i, row) in grid.into_iter().enumerate() {
            if row.len() != cols {
                return Err(NnError::RaggedGrid {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Matrix { rows, cols, data })
    }

    /// A 1 x n matrix holding `values` as its single row.
    pub fn row_vector(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: values,
        }
    }

    /// An n x 1 matrix holding `values` as its single column.
    pub fn column_vector(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    /// Uniform values in [-1, 1).
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for v in res.data.iter_mut() {
            *v = rng.gen::<f64>() * 2.0 - 1.0;
        }
        res
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / cols)).
    ///
    /// Keeps the variance of activations and gradients roughly equal
    /// across layers when feeding a sigmoid.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input connections).
    pub fn xavier<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let std_dev = (1.0 / cols as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for v in res.data.iter_mut() {
            *v = Matrix::sample_standard_normal(rng) * std_dev;
        }
        res
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The value at (row, col). Panics if the indices are out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index out of range");
        self.data[row * self.cols + col]
    }

    pub(crate) fn has_valid_backing(&self) -> bool {
        self.data.len() == self.rows * self.cols
    }

    /// Repacks the same elements, in row-major order, into a new shape.
    /// The element count must be conserved.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Matrix, NnError> {
        if rows * cols != self.rows * self.cols {
            return Err(NnError::InvalidReshape {
                from: (self.rows, self.cols),
                to: (rows, cols),
            });
        }
        Ok(Matrix {
            rows,
            cols,
            data: self.data.clone(),
        })
    }

    fn elementwise<F>(&self, rhs: &Matrix, op: &'static str, f: F) -> Result<Matrix, NnError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(NnError::DimensionMismatch {
                op,
                lhs: (self.rows, self.cols),
                rhs: (rhs.rows, rhs.cols),
            });
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Elementwise sum; operands must have identical shapes.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, NnError> {
        self.elementwise(rhs, "add", |a, b| a + b)
    }

    /// Elementwise difference; operands must have identical shapes.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, NnError> {
        self.elementwise(rhs, "sub", |a, b| a - b)
    }

    /// Broadcasts `x` onto every cell.
    pub fn add_scalar(&self, x: f64) -> Matrix {
        self.map(|v| v + x)
    }

    /// Broadcasts `-x` onto every cell.
    pub fn sub_scalar(&self, x: f64) -> Matrix {
        self.map(|v| v - x)
    }

    /// True matrix multiplication; requires `self.cols == rhs.rows` and
    /// yields a `(self.rows, rhs.cols)` matrix.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix, NnError> {
        if self.cols != rhs.rows {
            return Err(NnError::DimensionMismatch {
                op: "dot",
                lhs: (self.rows, self.cols),
                rhs: (rhs.rows, rhs.cols),
            });
        }
        let mut res = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }
                res.data[i * res.cols + j] = sum;
            }
        }
        Ok(res)
    }

    /// Elementwise (Hadamard) product; operands must have identical shapes.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix, NnError> {
        self.elementwise(rhs, "hadamard", |a, b| a * b)
    }

    /// Elementwise scalar multiplication.
    pub fn scale(&self, x: f64) -> Matrix {
        self.map(|v| v * x)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i * res.cols + j] = self.data[j * self.cols + i];
            }
        }
        res
    }

    /// The row index of the single largest element, scanning in
    /// row-major order and keeping the first index on ties.
    pub fn arg_max_row(&self) -> usize {
        let mut max_row = 0;
        let mut max_val = f64::NEG_INFINITY;
        for i in 0..self.rows {
            for j in 0..self.cols {
                let v = self.data[i * self.cols + j];
                if v > max_val {
                    max_val = v;
                    max_row = i;
                }
            }
        }
        max_row
    }

    /// The total of all elements.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| functor(v)).collect(),
        }
    }

    /// True iff the shapes match and every pair of cells differs by
    /// less than [`TOLERANCE`].
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() < TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::random(10, 10, &mut rng);
        for i in 0..10 {
            for j in 0..10 {
                let v = m.get(i, j);
                assert!((-1.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn xavier_is_deterministic_under_a_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let m1 = Matrix::xavier(4, 9, &mut a);
        let m2 = Matrix::xavier(4, 9, &mut b);
        assert!(m1.approx_eq(&m2));
    }

    #[test]
    fn get_reads_row_major_cells() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 3.0);
    }
}
