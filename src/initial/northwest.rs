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

//! The north-west corner rule.

use super::min;
use crate::matrix::Matrix;
use num_traits::NumAssign;

/// Construct an initial solution with the north-west corner rule.
///
/// Starting at cell `(0, 0)` the rule ships as much as possible, then
/// moves to the next row if the supply of the current row is
/// exhausted or to the next column if the demand of the current
/// column is exhausted. If both are exhausted at the same time, only
/// the row is advanced.
///
/// The solution has at most `m + n - 1` non-zero cells. Only the
/// supplies and demands are used, the costs are irrelevant. If the
/// instance is not balanced, the rule stops as soon as all rows or
/// all columns have been processed.
///
/// # Example
///
/// ```
/// use rs_transport::initial::north_west_corner;
///
/// let x = north_west_corner(&[4600, 3400, 3000], &[3500, 2000, 4500, 1000]);
/// assert_eq!(x.to_rows(), vec![vec![3500, 1100, 0, 0],
///                              vec![0, 900, 2500, 0],
///                              vec![0, 0, 2000, 1000]]);
/// ```
pub fn north_west_corner<F>(supply: &[F], demand: &[F]) -> Matrix<F>
where
    F: NumAssign + PartialOrd + Copy,
{
    let m = supply.len();
    let n = demand.len();
    let mut allocation = Matrix::new(m, n, F::zero());
    let mut supply_left = supply.to_vec();
    let mut demand_left = demand.to_vec();

    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        let q = min(supply_left[i], demand_left[j]);
        allocation[(i, j)] += q;
        supply_left[i] -= q;
        demand_left[j] -= q;

        if supply_left[i].is_zero() {
            i += 1;
        } else if demand_left[j].is_zero() {
            j += 1;
        } else {
            // NaN quantities
            break;
        }
    }

    allocation
}
