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

//! Reduced costs of non-basic cells.

use super::potentials::Potentials;
use crate::basis::Basis;
use crate::matrix::Matrix;
use num_traits::{NumAssign, Signed};
use std::cmp::Ordering;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The reduced cost `u[i] + v[j] - costs[i][j]` of a non-basic cell.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Delta<F> {
    pub delta: F,
    pub cell: (usize, usize),
}

/// Return all non-basic cells with reduced cost greater than `zero`.
///
/// A positive reduced cost means that shipping on this cell lowers the
/// total cost. The cells are sorted by decreasing reduced cost, cells
/// with equal reduced cost keep their row-major order. If the returned
/// list is empty, the basis is optimal.
pub fn positive_deltas<F>(costs: &Matrix<F>, basis: &Basis, potentials: &Potentials<F>, zero: F) -> Vec<Delta<F>>
where
    F: NumAssign + Signed + PartialOrd + Copy,
{
    let mut deltas: Vec<_> = costs
        .cells()
        .filter(|&((i, j), _)| !basis.contains(i, j))
        .map(|((i, j), c)| Delta {
            delta: potentials.u[i] + potentials.v[j] - c,
            cell: (i, j),
        })
        .filter(|d| d.delta > zero)
        .collect();
    deltas.sort_by(|a, b| b.delta.partial_cmp(&a.delta).unwrap_or(Ordering::Equal));
    deltas
}

#[cfg(test)]
mod tests {
    use super::{positive_deltas, Delta};
    use crate::modi::potentials;
    use crate::{Basis, Matrix};

    #[test]
    fn test_sorted() {
        let costs = Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap();
        let x = Matrix::from_rows(&[[3500, 1100, 0, 0], [0, 900, 2500, 0], [0, 0, 2000, 1000]]).unwrap();
        let basis = Basis::from_allocation(&x, 0);
        let pot = potentials(&costs, &basis).unwrap();

        // u = [0, -30, 30], v = [30, 40, 50, -20]
        let deltas = positive_deltas(&costs, &basis, &pot, 0);
        assert_eq!(
            deltas,
            vec![
                Delta { delta: 20, cell: (2, 0) },
                Delta { delta: 20, cell: (2, 1) },
            ]
        );

        let pot = crate::modi::Potentials {
            u: vec![0, -30, 30],
            v: vec![30, 45, 50, -20],
        };
        let deltas = positive_deltas(&costs, &basis, &pot, 0);
        assert_eq!(
            deltas,
            vec![
                Delta { delta: 25, cell: (2, 1) },
                Delta { delta: 20, cell: (2, 0) },
            ]
        );
    }

    #[test]
    fn test_optimal() {
        let costs = Matrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        let x = Matrix::from_rows(&[[10.0, 0.0], [0.0, 10.0]]).unwrap();
        let mut basis = Basis::from_allocation(&x, 1e-8);
        basis.complete(&costs);
        let pot = potentials(&costs, &basis).unwrap();
        assert!(positive_deltas(&costs, &basis, &pot, 1e-8).is_empty());
    }

    #[test]
    fn test_negative_potentials() {
        let costs = Matrix::from_rows(&[[0, 1, 1], [1, 0, 5]]).unwrap();
        let mut basis = Basis::new(2, 3);
        for &(i, j) in &[(0, 0), (0, 2), (1, 2), (1, 1)] {
            basis.insert(i, j);
        }
        let pot = potentials(&costs, &basis).unwrap();
        // u = [0, 4], v = [0, -4, 1]
        assert_eq!(
            positive_deltas(&costs, &basis, &pot, 0),
            vec![Delta { delta: 3, cell: (1, 0) }]
        );
    }
}
