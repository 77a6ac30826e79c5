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

//! Errors reported by the transportation algorithms.

use std::error;
use std::fmt;

/// Error of a transportation problem computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The dimensions of supply, demand, costs or allocation disagree.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A quantity or cost is negative.
    NegativeValue { what: &'static str, position: Position },
    /// A quantity or cost is NaN or infinite.
    NonFinite { what: &'static str, position: Position },
    /// Total supply and total demand differ.
    Unbalanced { supply: f64, demand: f64 },
    /// The basic cells do not span all rows and columns.
    DegenerateBasis { basic: usize, required: usize },
    /// No cycle through the basis exists for the entering cell.
    NoCycleFound { cell: (usize, usize) },
    /// The positive cells of an allocation contain a cycle.
    NotBasic { cell: (usize, usize) },
}

/// The position of an offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Index into the supply vector.
    Row(usize),
    /// Index into the demand vector.
    Col(usize),
    /// A matrix cell.
    Cell(usize, usize),
}

impl fmt::Display for Position {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Position::Row(i) => write!(fmt, "row {}", i),
            Position::Col(j) => write!(fmt, "column {}", j),
            Position::Cell(i, j) => write!(fmt, "cell ({}, {})", i, j),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            ShapeMismatch { what, expected, found } => {
                write!(fmt, "Shape mismatch in {}: found {}, expected {}", what, found, expected)
            }
            NegativeValue { what, position } => write!(fmt, "Negative value in {} at {}", what, position),
            NonFinite { what, position } => write!(fmt, "Non-finite value in {} at {}", what, position),
            Unbalanced { supply, demand } => write!(
                fmt,
                "Unbalanced problem: total supply {} differs from total demand {}",
                supply, demand
            ),
            DegenerateBasis { basic, required } => write!(
                fmt,
                "Degenerate basis: {} basic cells do not span the problem ({} required)",
                basic, required
            ),
            NoCycleFound { cell } => write!(fmt, "No cycle found for entering cell ({}, {})", cell.0, cell.1),
            NotBasic { cell } => write!(
                fmt,
                "Allocation is not basic: positive cell ({}, {}) closes a cycle",
                cell.0, cell.1
            ),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
