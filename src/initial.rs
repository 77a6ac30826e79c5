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

//! Initial feasible solutions.
//!
//! # Example
//!
//! ```
//! use rs_transport::initial::{build_initial_solution, Strategy};
//! use rs_transport::Matrix;
//!
//! let costs = Matrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
//! let sol = build_initial_solution(Strategy::NorthWestCorner, &[10, 10], &[5, 15], &costs).unwrap();
//! assert_eq!(sol.allocation.to_rows(), vec![vec![5, 5], vec![0, 10]]);
//! assert_eq!(sol.total_cost, 25);
//! ```

pub mod mincost;
pub use self::mincost::minimal_cost;

pub mod northwest;
pub use self::northwest::north_west_corner;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::problem;
use num_traits::{NumAssign, NumCast};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The rule used to construct the initial solution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// The north-west corner rule.
    NorthWestCorner,
    /// The minimal cost rule.
    MinimalCost,
}

/// An initial feasible solution.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct InitialSolution<F> {
    /// The allocation matrix.
    pub allocation: Matrix<F>,
    /// The cost of the allocation.
    pub total_cost: F,
}

/// Construct an initial feasible solution with the given strategy.
///
/// The instance is checked with [`problem::check`] first, so shape
/// mismatches, invalid values and unbalanced instances are rejected
/// before any computation.
pub fn build_initial_solution<F>(
    strategy: Strategy,
    supply: &[F],
    demand: &[F],
    costs: &Matrix<F>,
) -> Result<InitialSolution<F>>
where
    F: NumAssign + NumCast + PartialOrd + Copy,
{
    problem::check(supply, demand, costs)?;

    let allocation = match strategy {
        Strategy::NorthWestCorner => north_west_corner(supply, demand),
        Strategy::MinimalCost => minimal_cost(supply, demand, costs),
    };
    let total_cost = problem::total_cost(&allocation, costs);
    log::debug!("initial solution ({:?}) with {} rows, {} cols", strategy, supply.len(), demand.len());

    Ok(InitialSolution { allocation, total_cost })
}

fn min<F: PartialOrd>(a: F, b: F) -> F {
    if b < a {
        b
    } else {
        a
    }
}
