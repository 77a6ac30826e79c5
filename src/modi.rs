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

//! The MODI (modified distribution) method.
//!
//! Starting from a feasible allocation, e.g. from
//! [`build_initial_solution`](crate::initial::build_initial_solution),
//! the method repeatedly
//!
//! 1. computes the [`potentials`] of the current basis,
//! 2. computes the reduced costs of all non-basic cells ([`positive_deltas`]),
//! 3. finds the closed [`Cycle`] of the best cell through the basis and
//! 4. shifts the largest feasible amount along that cycle ([`reallocate`]),
//!
//! until no cell has a positive reduced cost.
//!
//! # Example
//!
//! ```
//! use rs_transport::initial::{build_initial_solution, Strategy};
//! use rs_transport::modi::{optimize, SolutionState};
//! use rs_transport::Matrix;
//!
//! let supply = [4600, 3400, 3000];
//! let demand = [3500, 2000, 4500, 1000];
//! let costs = Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap();
//!
//! let init = build_initial_solution(Strategy::NorthWestCorner, &supply, &demand, &costs).unwrap();
//! assert_eq!(init.total_cost, 378000);
//!
//! let plan = optimize(init.allocation, &costs).unwrap();
//! assert_eq!(plan.state, SolutionState::Optimal);
//! assert_eq!(plan.cost, 349000);
//! assert_eq!(plan.history, vec![378000, 360000, 349000]);
//! ```

pub mod cycle;
pub use self::cycle::{find_cycle, Cycle, Sign};

pub mod deltas;
pub use self::deltas::{positive_deltas, Delta};

pub mod optimizer;
pub use self::optimizer::Optimizer;

pub mod pivot;
pub use self::pivot::{reallocate, Pivot};

pub mod plan;
pub use self::plan::{Plan, Table};

pub mod potentials;
pub use self::potentials::{potentials, Potentials};

use crate::basis::Basis;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::problem::{self, default_zero};
use num_traits::{NumAssign, NumCast, Signed};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SolutionState {
    /// Unknown state, the problem has not been solved, yet
    Unknown,
    /// No non-basic cell has a positive reduced cost
    Optimal,
    /// The best pivot did not decrease the cost and has been undone
    Stalled,
    /// The maximal number of iterations has been reached
    IterationLimit,
    /// The basis could not be repaired, potentials are undefined
    Degenerate,
}

/// A single optimality check of an allocation.
#[derive(Clone, PartialEq, Debug)]
pub struct Evaluation<F> {
    /// The (completed) basis of the allocation.
    pub basis: Basis,
    /// The potentials of the basis.
    pub potentials: Potentials<F>,
    /// The improving cells, sorted by decreasing reduced cost.
    pub deltas: Vec<Delta<F>>,
}

impl<F> Evaluation<F> {
    /// Return `true` if no cell can improve the allocation.
    pub fn is_optimal(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// Evaluate an allocation without changing it.
///
/// The basis consists of the positive cells of `allocation`, completed
/// with ε-cells if necessary. Returns [`Error::NotBasic`] if the
/// positive cells contain a cycle; such an allocation can be
/// improved by [`optimize`].
///
/// # Example
///
/// ```
/// use rs_transport::modi::evaluate;
/// use rs_transport::Matrix;
///
/// let costs = Matrix::from_rows(&[[1, 3], [2, 1]]).unwrap();
/// let eval = evaluate(&Matrix::from_rows(&[[0, 10], [10, 0]]).unwrap(), &costs).unwrap();
/// assert!(!eval.is_optimal());
/// assert_eq!(eval.deltas[0].cell, (0, 0));
/// ```
pub fn evaluate<F>(allocation: &Matrix<F>, costs: &Matrix<F>) -> Result<Evaluation<F>>
where
    F: NumAssign + NumCast + Signed + PartialOrd + Copy,
{
    problem::check_shape(
        "allocation rows",
        "allocation columns",
        allocation,
        costs.num_rows(),
        costs.num_cols(),
    )?;
    let zero = default_zero();
    let mut basis = Basis::new(allocation.num_rows(), allocation.num_cols());
    for ((i, j), x) in allocation.cells() {
        if x > zero {
            if find_cycle(&basis, (i, j)).is_some() {
                return Err(Error::NotBasic { cell: (i, j) });
            }
            basis.insert(i, j);
        }
    }
    basis.complete(costs);
    let potentials = potentials(costs, &basis)?;
    let deltas = positive_deltas(costs, &basis, &potentials, zero);
    Ok(Evaluation {
        basis,
        potentials,
        deltas,
    })
}

/// Optimize an allocation with the MODI method using default parameters.
///
/// This is a shortcut for creating an [`Optimizer`], calling
/// [`Optimizer::solve`] and returning the resulting [`Plan`]. Errors
/// are only returned for malformed input, the outcome of the
/// optimization itself is reported in [`Plan::state`].
pub fn optimize<F>(allocation: Matrix<F>, costs: &Matrix<F>) -> Result<Plan<F>>
where
    F: NumAssign + NumCast + Signed + PartialOrd + Copy,
{
    let mut opt = Optimizer::new(costs, allocation)?;
    opt.solve();
    Ok(opt.into_plan())
}

#[cfg(test)]
mod tests {
    use super::{evaluate, optimize, SolutionState};
    use crate::initial::{build_initial_solution, Strategy};
    use crate::{Error, Matrix};

    fn scenario() -> (Vec<i64>, Vec<i64>, Matrix<i64>) {
        (
            vec![4600, 3400, 3000],
            vec![3500, 2000, 4500, 1000],
            Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap(),
        )
    }

    #[test]
    fn test_minimal_cost_start() {
        let (supply, demand, costs) = scenario();
        let init = build_initial_solution(Strategy::MinimalCost, &supply, &demand, &costs).unwrap();
        assert_eq!(init.total_cost, 409000);

        let plan = optimize(init.allocation, &costs).unwrap();
        assert_eq!(plan.state, SolutionState::Optimal);
        assert_eq!(plan.cost, 349000);
        assert_eq!(plan.history, vec![409000, 369000, 349000, 349000]);
        assert_eq!(plan.iterations, 3);
        assert!(plan.deltas.is_empty());
        for (i, row) in plan.allocation.rows().enumerate() {
            assert_eq!(row.iter().sum::<i64>(), supply[i]);
        }
    }

    #[test]
    fn test_optimal_is_fixpoint() {
        let (supply, demand, costs) = scenario();
        let init = build_initial_solution(Strategy::NorthWestCorner, &supply, &demand, &costs).unwrap();
        let plan = optimize(init.allocation, &costs).unwrap();

        let again = optimize(plan.allocation.clone(), &costs).unwrap();
        assert_eq!(again.state, SolutionState::Optimal);
        assert_eq!(again.iterations, 0);
        assert_eq!(again.allocation, plan.allocation);

        let eval = evaluate(&plan.allocation, &costs).unwrap();
        assert!(eval.is_optimal());
        assert_eq!(eval.basis.len(), 6);
    }

    #[test]
    fn test_already_optimal() {
        let costs = Matrix::from_rows(&[[1.0, 3.0], [2.0, 1.0]]).unwrap();
        let plan = optimize(Matrix::from_rows(&[[10.0, 0.0], [0.0, 10.0]]).unwrap(), &costs).unwrap();
        assert_eq!(plan.state, SolutionState::Optimal);
        assert_eq!(plan.iterations, 0);
        assert_eq!(plan.cost, 20.0);
    }

    #[test]
    fn test_evaluate_cyclic() {
        let costs = Matrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
        let x = Matrix::from_rows(&[[5, 5], [5, 5]]).unwrap();
        assert_eq!(evaluate(&x, &costs), Err(Error::NotBasic { cell: (1, 1) }));

        let plan = optimize(x, &costs).unwrap();
        assert_eq!(plan.state, SolutionState::Optimal);
        assert_eq!(plan.cost, 20);
        assert!(evaluate(&plan.allocation, &costs).unwrap().is_optimal());
    }

    #[test]
    fn test_evaluate_shape() {
        let costs = Matrix::from_rows(&[[1.0, 3.0], [2.0, 1.0]]).unwrap();
        let x = Matrix::from_rows(&[[10.0, 0.0]]).unwrap();
        assert_eq!(
            evaluate(&x, &costs),
            Err(Error::ShapeMismatch {
                what: "allocation rows",
                expected: 2,
                found: 1
            })
        );
    }
}
