/*
 * Copyright (c) 2022, 2023 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A dense matrix for costs and allocations.
//!
//! Rows correspond to sources, columns to sinks. The entries are
//! stored row-major in a single vector, so cloning a matrix always
//! produces an independent copy.
//!
//! # Example
//!
//! ```
//! use rs_transport::Matrix;
//!
//! let mut m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
//! assert_eq!(m.num_rows(), 2);
//! assert_eq!(m.num_cols(), 3);
//! assert_eq!(m[(1, 2)], 6);
//!
//! m[(0, 0)] = 7;
//! assert_eq!(m.row(0), &[7, 2, 3]);
//! assert_eq!(m.to_rows(), vec![vec![7, 2, 3], vec![4, 5, 6]]);
//! ```

use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A dense `nrows x ncols` matrix.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: Copy,
{
    /// Create a matrix with all entries set to `value`.
    pub fn new(nrows: usize, ncols: usize, value: T) -> Self {
        Matrix {
            nrows,
            ncols,
            data: vec![value; nrows * ncols],
        }
    }

    /// Create a matrix from a sequence of rows.
    ///
    /// All rows must have the same length, otherwise
    /// [`Error::ShapeMismatch`] is returned.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
    {
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::ShapeMismatch {
                    what: "matrix row",
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            nrows: rows.len(),
            ncols,
            data,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Return `(num_rows, num_cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.nrows && j < self.ncols {
            Some(self.data[i * self.ncols + j])
        } else {
            None
        }
    }

    /// Return the entries of row `i`.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Iterate over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Iterate over all cells `((i, j), value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        let ncols = self.ncols;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, &x)| ((k / ncols, k % ncols), x))
    }

    /// Return the matrix as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.nrows && j < self.ncols, "matrix index out of bounds");
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(i < self.nrows && j < self.ncols, "matrix index out of bounds");
        &mut self.data[i * self.ncols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::Matrix;
    use crate::Error;

    #[test]
    fn test_ragged_rows() {
        let rows: Vec<Vec<i32>> = vec![vec![1, 2], vec![3]];
        assert_eq!(
            Matrix::from_rows(&rows),
            Err(Error::ShapeMismatch {
                what: "matrix row",
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_cells_row_major() {
        let m = Matrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap();
        let cells: Vec<_> = m.cells().collect();
        assert_eq!(
            cells,
            vec![((0, 0), 1), ((0, 1), 2), ((1, 0), 3), ((1, 1), 4), ((2, 0), 5), ((2, 1), 6)]
        );
        assert_eq!(m.get(2, 1), Some(6));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = Matrix::new(2, 2, 0.0);
        let mut b = a.clone();
        b[(1, 1)] = 3.5;
        assert_eq!(a[(1, 1)], 0.0);
        assert_eq!(b[(1, 1)], 3.5);
    }

    #[test]
    fn test_empty() {
        let rows: Vec<Vec<f64>> = vec![];
        let m = Matrix::from_rows(&rows).unwrap();
        assert_eq!(m.shape(), (0, 0));
        assert_eq!(m.cells().count(), 0);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_serde() {
        let m = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        let serialized = serde_json::to_string(&m).unwrap();
        let m2: Matrix<i32> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(m, m2);
    }
}
