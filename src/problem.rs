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

//! Validation of transportation instances.
//!
//! An instance consists of `m` supplies, `n` demands and an `m x n`
//! cost matrix. The algorithms of this crate only accept *closed*
//! (balanced) instances, i.e. total supply equals total demand. An
//! open instance must be closed by the caller, usually by adding a
//! dummy source or sink with zero costs.
//!
//! # Example
//!
//! ```
//! use rs_transport::problem::{balance, Balance};
//!
//! assert_eq!(balance(&[10, 20], &[15, 15]), Balance::Closed);
//! assert_eq!(balance(&[10, 25], &[15, 15]), Balance::ExcessSupply(5));
//! assert_eq!(balance(&[10, 20], &[15, 25]), Balance::ExcessDemand(10));
//! ```

use crate::error::{Error, Position, Result};
use crate::matrix::Matrix;
use num_traits::{NumAssign, NumCast, ToPrimitive};

/// Balance state of an instance.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Balance<F> {
    /// Total supply equals total demand.
    Closed,
    /// Total supply exceeds total demand by the given amount.
    ExcessSupply(F),
    /// Total demand exceeds total supply by the given amount.
    ExcessDemand(F),
}

/// The value considered to be zero by default.
///
/// This is `1e-8` for floating point types and `0` for integer types.
pub fn default_zero<F>() -> F
where
    F: NumCast + NumAssign,
{
    F::from(1e-8).unwrap_or_else(F::zero)
}

/// Classify the balance of supply and demand.
pub fn balance<F>(supply: &[F], demand: &[F]) -> Balance<F>
where
    F: NumAssign + NumCast + PartialOrd + Copy,
{
    let zero = default_zero::<F>();
    let total_supply = sum(supply);
    let total_demand = sum(demand);
    if total_supply > total_demand + zero {
        Balance::ExcessSupply(total_supply - total_demand)
    } else if total_demand > total_supply + zero {
        Balance::ExcessDemand(total_demand - total_supply)
    } else {
        Balance::Closed
    }
}

/// Check that the instance is well-formed and closed.
///
/// Returns
/// - [`Error::ShapeMismatch`] if the cost matrix is not `m x n`,
/// - [`Error::NonFinite`] or [`Error::NegativeValue`] for invalid entries,
/// - [`Error::Unbalanced`] if total supply and total demand differ.
pub fn check<F>(supply: &[F], demand: &[F], costs: &Matrix<F>) -> Result<()>
where
    F: NumAssign + NumCast + PartialOrd + Copy,
{
    check_shape("costs rows", "costs columns", costs, supply.len(), demand.len())?;

    for (i, &s) in supply.iter().enumerate() {
        check_value("supply", s, Position::Row(i))?;
    }
    for (j, &d) in demand.iter().enumerate() {
        check_value("demand", d, Position::Col(j))?;
    }
    for ((i, j), c) in costs.cells() {
        check_value("costs", c, Position::Cell(i, j))?;
    }

    match balance(supply, demand) {
        Balance::Closed => Ok(()),
        _ => Err(Error::Unbalanced {
            supply: sum(supply).to_f64().unwrap_or(f64::NAN),
            demand: sum(demand).to_f64().unwrap_or(f64::NAN),
        }),
    }
}

/// Check that `matrix` has exactly `nrows` rows and `ncols` columns.
///
/// The error names the mismatching dimension by `rows` or `cols`,
/// e.g. `"costs rows"` and `"costs columns"`.
pub fn check_shape<T>(
    rows: &'static str,
    cols: &'static str,
    matrix: &Matrix<T>,
    nrows: usize,
    ncols: usize,
) -> Result<()>
where
    T: Copy,
{
    if matrix.num_rows() != nrows {
        return Err(Error::ShapeMismatch {
            what: rows,
            expected: nrows,
            found: matrix.num_rows(),
        });
    }
    if matrix.num_cols() != ncols {
        return Err(Error::ShapeMismatch {
            what: cols,
            expected: ncols,
            found: matrix.num_cols(),
        });
    }
    Ok(())
}

/// Check that every entry of `matrix` is finite and non-negative.
pub fn check_matrix<F>(what: &'static str, matrix: &Matrix<F>) -> Result<()>
where
    F: NumAssign + NumCast + PartialOrd + Copy,
{
    for ((i, j), x) in matrix.cells() {
        check_value(what, x, Position::Cell(i, j))?;
    }
    Ok(())
}

fn check_value<F>(what: &'static str, x: F, position: Position) -> Result<()>
where
    F: NumAssign + NumCast + PartialOrd + Copy,
{
    if !x.to_f64().map(f64::is_finite).unwrap_or(false) {
        Err(Error::NonFinite { what, position })
    } else if x < F::zero() {
        Err(Error::NegativeValue { what, position })
    } else {
        Ok(())
    }
}

/// Return the total cost `sum(allocation[i][j] * costs[i][j])`.
pub fn total_cost<F>(allocation: &Matrix<F>, costs: &Matrix<F>) -> F
where
    F: NumAssign + Copy,
{
    let mut value = F::zero();
    for ((i, j), x) in allocation.cells() {
        value += x * costs[(i, j)];
    }
    value
}

fn sum<F>(xs: &[F]) -> F
where
    F: NumAssign + Copy,
{
    let mut total = F::zero();
    for &x in xs {
        total += x;
    }
    total
}
