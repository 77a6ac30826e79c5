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

//! Dual values (potentials) of a basis.

use crate::basis::Basis;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use num_traits::{NumAssign, Signed};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Row potentials `u` and column potentials `v`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Potentials<F> {
    pub u: Vec<F>,
    pub v: Vec<F>,
}

/// Compute the potentials of a basis.
///
/// The potentials satisfy `u[i] + v[j] == costs[i][j]` for every basic
/// cell and are anchored by `u[0] == 0`. They are propagated along the
/// basic cells in rounds; each round labels at least one new row or
/// column if the basis is connected, so at most `m + n` rounds are
/// done.
///
/// Returns [`Error::DegenerateBasis`] if the basic cells do not connect
/// all rows and columns, in which case some potentials are undefined.
///
/// # Example
///
/// ```
/// use rs_transport::modi::potentials;
/// use rs_transport::{Basis, Matrix};
///
/// let costs = Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap();
/// let x = Matrix::from_rows(&[[3500, 1100, 0, 0], [0, 900, 2500, 0], [0, 0, 2000, 1000]]).unwrap();
///
/// let pot = potentials(&costs, &Basis::from_allocation(&x, 0)).unwrap();
/// assert_eq!(pot.u, vec![0, -30, 30]);
/// assert_eq!(pot.v, vec![30, 40, 50, -20]);
/// ```
pub fn potentials<F>(costs: &Matrix<F>, basis: &Basis) -> Result<Potentials<F>>
where
    F: NumAssign + Signed + Copy,
{
    let m = basis.num_rows();
    let n = basis.num_cols();
    debug_assert_eq!(costs.shape(), (m, n));

    if m == 0 || n == 0 {
        return Ok(Potentials {
            u: vec![F::zero(); m],
            v: vec![F::zero(); n],
        });
    }

    let mut u = vec![None; m];
    let mut v = vec![None; n];
    u[0] = Some(F::zero());

    let cells: Vec<_> = basis.cells().collect();
    for _ in 0..m + n {
        let mut changed = false;
        for &(i, j) in &cells {
            match (u[i], v[j]) {
                (Some(ui), None) => {
                    v[j] = Some(costs[(i, j)] - ui);
                    changed = true;
                }
                (None, Some(vj)) => {
                    u[i] = Some(costs[(i, j)] - vj);
                    changed = true;
                }
                _ => (),
            }
        }
        if !changed {
            break;
        }
    }

    let u: Option<Vec<F>> = u.into_iter().collect();
    let v: Option<Vec<F>> = v.into_iter().collect();
    match (u, v) {
        (Some(u), Some(v)) => Ok(Potentials { u, v }),
        _ => Err(Error::DegenerateBasis {
            basic: basis.len(),
            required: basis.required(),
        }),
    }
}
