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

//! The result of a MODI run.

use super::deltas::Delta;
use super::potentials::Potentials;
use super::SolutionState;
use crate::matrix::Matrix;
use num_traits::Zero;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A transportation plan together with its optimality certificate.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Plan<F> {
    /// The final allocation.
    pub allocation: Matrix<F>,
    /// The total cost of the allocation.
    pub cost: F,
    /// The potentials of the final basis.
    ///
    /// This is `None` if the basis did not span all rows and columns.
    pub potentials: Option<Potentials<F>>,
    /// The remaining improving cells (empty if optimal).
    pub deltas: Vec<Delta<F>>,
    /// The state the optimizer stopped in.
    pub state: SolutionState,
    /// The number of accepted pivots.
    pub iterations: usize,
    /// The cost of the initial allocation, after removing cycles of
    /// positive cells (if that changed it) and after each pivot.
    pub history: Vec<F>,
}

impl<F> Plan<F>
where
    F: Copy,
{
    /// Return `true` if the plan has been proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.state == SolutionState::Optimal
    }

    /// Return a printable table of the plan.
    ///
    /// Each cell shows the allocation followed by the cost in
    /// parentheses, empty cells are shown as `-`. If potentials are
    /// available, the last column contains `u` and the last row `v`.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_transport::modi::optimize;
    /// use rs_transport::Matrix;
    ///
    /// let costs = Matrix::from_rows(&[[1, 3], [2, 1]]).unwrap();
    /// let plan = optimize(Matrix::from_rows(&[[0, 10], [10, 0]]).unwrap(), &costs).unwrap();
    /// let table = plan.table(&costs).to_string();
    /// assert!(table.contains("10 (1)"));
    /// assert!(table.ends_with("total cost 20\n"));
    /// ```
    pub fn table<'a>(&'a self, costs: &'a Matrix<F>) -> Table<'a, F> {
        Table { plan: self, costs }
    }
}

/// Printable view of a [`Plan`], see [`Plan::table`].
pub struct Table<'a, F> {
    plan: &'a Plan<F>,
    costs: &'a Matrix<F>,
}

impl<'a, F> fmt::Display for Table<'a, F>
where
    F: fmt::Display + Zero + PartialEq + Copy,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let plan = self.plan;
        let (m, n) = plan.allocation.shape();

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(m + 2);
        let mut header: Vec<String> = vec![String::new()];
        header.extend((0..n).map(|j| format!("D{}", j + 1)));
        if plan.potentials.is_some() {
            header.push("u".to_string());
        }
        rows.push(header);

        for i in 0..m {
            let mut row = vec![format!("S{}", i + 1)];
            for j in 0..n {
                let x = plan.allocation[(i, j)];
                let c = self.costs[(i, j)];
                if x.is_zero() {
                    row.push(format!("- ({})", c));
                } else {
                    row.push(format!("{} ({})", x, c));
                }
            }
            if let Some(ref pot) = plan.potentials {
                row.push(pot.u[i].to_string());
            }
            rows.push(row);
        }

        if let Some(ref pot) = plan.potentials {
            let mut row = vec!["v".to_string()];
            row.extend(pot.v.iter().map(|v| v.to_string()));
            row.push(String::new());
            rows.push(row);
        }

        let ncols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let widths: Vec<usize> = (0..ncols)
            .map(|k| rows.iter().filter_map(|r| r.get(k)).map(|s| s.len()).max().unwrap_or(0))
            .collect();

        for row in &rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(s, &w)| format!("{:>w$}", s, w = w))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(fmt, "{}", line.trim_end())?;
        }
        writeln!(fmt, "total cost {}", plan.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::Plan;
    use crate::modi::{Potentials, SolutionState};
    use crate::Matrix;

    #[test]
    fn test_table() {
        let costs = Matrix::from_rows(&[[1, 3], [2, 1]]).unwrap();
        let plan = Plan {
            allocation: Matrix::from_rows(&[[10, 0], [0, 10]]).unwrap(),
            cost: 20,
            potentials: Some(Potentials {
                u: vec![0, 0],
                v: vec![1, 1],
            }),
            deltas: vec![],
            state: SolutionState::Optimal,
            iterations: 0,
            history: vec![20],
        };
        assert!(plan.is_optimal());

        let lines: Vec<String> = plan.table(&costs).to_string().lines().map(String::from).collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "        D1      D2  u");
        assert_eq!(lines[1], "S1  10 (1)   - (3)  0");
        assert_eq!(lines[2], "S2   - (2)  10 (1)  0");
        assert_eq!(lines[3], " v       1       1");
        assert_eq!(lines[4], "total cost 20");
    }

    #[test]
    fn test_table_without_potentials() {
        let costs = Matrix::from_rows(&[[1.5]]).unwrap();
        let plan = Plan {
            allocation: Matrix::from_rows(&[[2.0]]).unwrap(),
            cost: 3.0,
            potentials: None,
            deltas: vec![],
            state: SolutionState::Degenerate,
            iterations: 0,
            history: vec![3.0],
        };
        assert!(!plan.is_optimal());
        assert_eq!(plan.table(&costs).to_string(), "         D1\nS1  2 (1.5)\ntotal cost 3\n");
    }
}
