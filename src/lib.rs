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

//#![forbid(unsafe_code)]

//! Algorithms for the classical (closed) transportation problem.
//!
//! A transportation problem consists of `m` sources with supplies,
//! `n` sinks with demands and an `m x n` matrix of unit shipping
//! costs. A feasible *allocation* ships all supplies to the sinks such
//! that every demand is met. This crate provides
//!
//! - the construction of initial feasible allocations by the north-west
//!   corner rule and the minimal cost rule ([`initial`]),
//! - the MODI (modified distribution) method to improve an allocation
//!   to optimality ([`modi`]),
//! - a text format for instances and solutions (feature `dimacs`).
//!
//! All algorithms are generic over the number type, so they can be
//! used with integers as well as floating point numbers.
//!
//! # Example
//!
//! ```
//! use rs_transport::initial::{build_initial_solution, Strategy};
//! use rs_transport::modi::optimize;
//! use rs_transport::Matrix;
//!
//! let supply = [7.0, 9.0, 18.0];
//! let demand = [5.0, 8.0, 7.0, 14.0];
//! let costs = Matrix::from_rows(&[
//!     [19.0, 30.0, 50.0, 10.0],
//!     [70.0, 30.0, 40.0, 60.0],
//!     [40.0, 8.0, 70.0, 20.0],
//! ])
//! .unwrap();
//!
//! let init = build_initial_solution(Strategy::MinimalCost, &supply, &demand, &costs).unwrap();
//! assert_eq!(init.total_cost, 814.0);
//!
//! let plan = optimize(init.allocation, &costs).unwrap();
//! assert!(plan.is_optimal());
//! assert_eq!(plan.cost, 743.0);
//! ```

pub mod error;
pub use self::error::{Error, Position, Result};

// # Data structures

pub mod matrix;
pub use self::matrix::Matrix;

pub mod basis;
pub use self::basis::Basis;

pub mod problem;
pub use self::problem::Balance;

// # Algorithms

pub mod initial;
pub use self::initial::{build_initial_solution, InitialSolution, Strategy};

pub mod modi;
pub use self::modi::{optimize, Optimizer, Plan, SolutionState};

#[cfg(any(feature = "dimacs"))]
pub mod dimacs;
