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

//! The minimal cost rule.

use super::min;
use crate::matrix::Matrix;
use num_traits::NumAssign;

/// Construct an initial solution with the minimal cost rule.
///
/// In each step the cheapest cell whose row has remaining supply and
/// whose column has remaining demand is selected (the first one in
/// row-major order on ties) and as much as possible is shipped on it.
/// This is repeated until all supply or all demand is exhausted.
///
/// Each step exhausts at least one row or column, so there are at
/// most `m + n` steps, each scanning the whole cost matrix. The
/// solution may be degenerate.
///
/// # Example
///
/// ```
/// use rs_transport::initial::minimal_cost;
/// use rs_transport::Matrix;
///
/// let costs = Matrix::from_rows(&[[19, 30, 50, 10],
///                                 [70, 30, 40, 60],
///                                 [40,  8, 70, 20]]).unwrap();
/// let x = minimal_cost(&[7, 9, 18], &[5, 8, 7, 14], &costs);
/// assert_eq!(x.to_rows(), vec![vec![0, 0, 0, 7],
///                              vec![2, 0, 7, 0],
///                              vec![3, 8, 0, 7]]);
/// ```
pub fn minimal_cost<F>(supply: &[F], demand: &[F], costs: &Matrix<F>) -> Matrix<F>
where
    F: NumAssign + PartialOrd + Copy,
{
    let m = supply.len();
    let n = demand.len();
    let mut allocation = Matrix::new(m, n, F::zero());
    let mut supply_left = supply.to_vec();
    let mut demand_left = demand.to_vec();

    loop {
        let mut best: Option<(usize, usize, F)> = None;
        for i in (0..m).filter(|&i| supply_left[i] > F::zero()) {
            for j in (0..n).filter(|&j| demand_left[j] > F::zero()) {
                let c = costs[(i, j)];
                if best.map(|(_, _, b)| c < b).unwrap_or(true) {
                    best = Some((i, j, c));
                }
            }
        }

        // no row with supply or no column with demand left
        let (i, j) = match best {
            Some((i, j, _)) => (i, j),
            None => break,
        };

        let q = min(supply_left[i], demand_left[j]);
        allocation[(i, j)] += q;
        supply_left[i] -= q;
        demand_left[j] -= q;
    }

    allocation
}
