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

//! Reallocation of flow along a cycle.

use super::cycle::Cycle;
use crate::matrix::Matrix;
use num_traits::{NumAssign, NumCast, ToPrimitive};

/// The result of a reallocation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pivot<F> {
    /// The cell entering the basis.
    pub entering: (usize, usize),
    /// The cell leaving the basis.
    pub leaving: (usize, usize),
    /// The amount shifted along the cycle.
    pub theta: F,
    /// Whether `theta` is zero.
    ///
    /// Such a pivot shifts an infinitesimal ε along the cycle, it
    /// changes the basis but not the allocation.
    pub degenerate: bool,
}

/// Shift flow along a cycle.
///
/// The amount `theta` is the minimal allocation of all cells with sign
/// minus. It is added to every plus cell and subtracted from every
/// minus cell. Minus cells whose allocation drops below `zero` are set
/// to exactly zero. The leaving cell is the first minus cell (in cycle
/// order) attaining the minimum.
///
/// Returns `None` and leaves the allocation untouched if the cycle has
/// no minus cell or `theta` is negative or not finite.
///
/// # Example
///
/// ```
/// use rs_transport::modi::{find_cycle, reallocate};
/// use rs_transport::{Basis, Matrix};
///
/// let mut x = Matrix::from_rows(&[[0, 10], [10, 10]]).unwrap();
/// let cycle = find_cycle(&Basis::from_allocation(&x, 0), (0, 0)).unwrap();
///
/// let pivot = reallocate(&mut x, &cycle, 0).unwrap();
/// assert_eq!(pivot.theta, 10);
/// assert_eq!(pivot.leaving, (1, 0));
/// assert_eq!(x.to_rows(), vec![vec![10, 0], vec![0, 20]]);
/// ```
pub fn reallocate<F>(allocation: &mut Matrix<F>, cycle: &Cycle, zero: F) -> Option<Pivot<F>>
where
    F: NumAssign + NumCast + PartialOrd + Copy,
{
    let mut leaving = None;
    for (i, j) in cycle.minus() {
        let x = allocation[(i, j)];
        if leaving.map(|(_, theta)| x < theta).unwrap_or(true) {
            leaving = Some(((i, j), x));
        }
    }

    let (leaving, theta) = leaving?;
    if !(theta >= F::zero()) || !theta.to_f64().map(f64::is_finite).unwrap_or(false) {
        return None;
    }

    for (i, j) in cycle.plus() {
        allocation[(i, j)] += theta;
    }
    for (i, j) in cycle.minus() {
        let x = &mut allocation[(i, j)];
        *x -= theta;
        if *x < zero {
            *x = F::zero();
        }
    }

    Some(Pivot {
        entering: cycle.entering(),
        leaving,
        theta,
        degenerate: theta <= zero,
    })
}

#[cfg(test)]
mod tests {
    use super::reallocate;
    use crate::modi::find_cycle;
    use crate::problem::total_cost;
    use crate::{Basis, Matrix};

    #[test]
    fn test_scenario_pivot() {
        let costs = Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap();
        let mut x = Matrix::from_rows(&[[3500, 1100, 0, 0], [0, 900, 2500, 0], [0, 0, 2000, 1000]]).unwrap();
        let cycle = find_cycle(&Basis::from_allocation(&x, 0), (2, 0)).unwrap();

        let pivot = reallocate(&mut x, &cycle, 0).unwrap();
        assert_eq!(pivot.theta, 900);
        assert_eq!(pivot.leaving, (1, 1));
        assert!(!pivot.degenerate);
        assert_eq!(
            x.to_rows(),
            vec![vec![2600, 2000, 0, 0], vec![0, 0, 3400, 0], vec![900, 0, 1100, 1000]]
        );
        // the cost drops by delta * theta = 20 * 900
        assert_eq!(total_cost(&x, &costs), 378000 - 18000);
    }

    #[test]
    fn test_snap_to_zero() {
        let mut x = Matrix::from_rows(&[[0.0, 0.3], [0.1 + 0.2, 1.0]]).unwrap();
        let cycle = find_cycle(&Basis::from_allocation(&x, 1e-8), (0, 0)).unwrap();
        let pivot = reallocate(&mut x, &cycle, 1e-8).unwrap();
        // 0.3 < 0.1 + 0.2, so (0, 1) leaves and the residue at (1, 0) is snapped
        assert_eq!(pivot.leaving, (0, 1));
        assert_eq!(x[(1, 0)], 0.0);
        assert_eq!(x[(0, 1)], 0.0);
    }

    #[test]
    fn test_degenerate() {
        let mut basis = Basis::new(2, 2);
        basis.insert(0, 1);
        basis.insert(1, 0);
        basis.insert(1, 1);
        let mut x = Matrix::from_rows(&[[0, 10], [0, 10]]).unwrap();
        let cycle = find_cycle(&basis, (0, 0)).unwrap();
        let pivot = reallocate(&mut x, &cycle, 0).unwrap();
        assert!(pivot.degenerate);
        assert_eq!(pivot.theta, 0);
        assert_eq!(pivot.leaving, (1, 0));
        assert_eq!(x.to_rows(), vec![vec![0, 10], vec![0, 10]]);
    }

    #[test]
    fn test_malformed() {
        let mut x = Matrix::from_rows(&[[0.0, 10.0], [f64::NAN, 10.0]]).unwrap();
        let mut basis = Basis::from_allocation(&x, 1e-8);
        basis.insert(1, 0);
        let cycle = find_cycle(&basis, (0, 0)).unwrap();
        assert_eq!(reallocate(&mut x, &cycle, 1e-8), None);
        assert_eq!(x[(0, 0)], 0.0);
    }
}
