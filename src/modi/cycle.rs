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

//! The cycle closed by an entering cell.
//!
//! The basic cells are the edges of a bipartite graph on rows and
//! columns. If the basis is a spanning tree, adding the entering cell
//! `(i, j)` closes exactly one cycle: the entering cell together with
//! the unique tree path from column `j` back to row `i`.
//!
//! # Example
//!
//! ```
//! use rs_transport::modi::{find_cycle, Sign};
//! use rs_transport::{Basis, Matrix};
//!
//! let x = Matrix::from_rows(&[[3500, 1100, 0, 0], [0, 900, 2500, 0], [0, 0, 2000, 1000]]).unwrap();
//! let basis = Basis::from_allocation(&x, 0);
//!
//! let cycle = find_cycle(&basis, (2, 0)).unwrap();
//! assert_eq!(cycle.cells(), &[(2, 0), (0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]);
//! assert_eq!(cycle.signed().next(), Some(((2, 0), Sign::Plus)));
//! assert_eq!(cycle.minus().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 2)]);
//! ```

use crate::basis::Basis;

/// The sign of a cell on a cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sign {
    /// The allocation is increased.
    Plus,
    /// The allocation is decreased.
    Minus,
}

/// A closed cycle of cells.
///
/// The first cell is the entering cell. Consecutive cells alternate
/// between sharing a column and sharing a row, the last cell shares
/// the row of the entering cell. Cells at even positions have sign
/// [`Sign::Plus`], cells at odd positions [`Sign::Minus`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cycle {
    cells: Vec<(usize, usize)>,
}

impl Cycle {
    /// Return the cells of the cycle, starting with the entering cell.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn entering(&self) -> (usize, usize) {
        self.cells[0]
    }

    /// Return the same cycle starting at its second cell.
    ///
    /// This flips the sign of every cell, i.e. shifting along the
    /// returned cycle moves flow in the opposite direction.
    pub fn reversed(&self) -> Cycle {
        let mut cells = self.cells.clone();
        cells.rotate_left(1);
        Cycle { cells }
    }

    /// Iterate over the cells together with their signs.
    pub fn signed(&self) -> impl Iterator<Item = ((usize, usize), Sign)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(k, &cell)| (cell, if k % 2 == 0 { Sign::Plus } else { Sign::Minus }))
    }

    /// Iterate over the cells with sign [`Sign::Plus`].
    pub fn plus(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().step_by(2).cloned()
    }

    /// Iterate over the cells with sign [`Sign::Minus`].
    pub fn minus(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().skip(1).step_by(2).cloned()
    }
}

/// Find the cycle closed by adding `entering` to the basis.
///
/// Rows are the nodes `0..m`, columns the nodes `m..m+n`. A depth-first
/// search starting at the row of the entering cell records the
/// incoming cell of each reached node. Once the column of the entering
/// cell is reached, following the incoming cells back to the row
/// yields the cycle. The entering cell itself is never used as an edge
/// of the search.
///
/// Returns `None` if the row and the column of the entering cell are
/// not connected by basic cells, which happens for degenerate bases.
pub fn find_cycle(basis: &Basis, entering: (usize, usize)) -> Option<Cycle> {
    let m = basis.num_rows();
    let n = basis.num_cols();
    let (ientering, jentering) = entering;
    if ientering >= m || jentering >= n {
        return None;
    }

    let mut neighs = vec![vec![]; m + n];
    for (i, j) in basis.cells().filter(|&cell| cell != entering) {
        neighs[i].push((m + j, (i, j)));
        neighs[m + j].push((i, (i, j)));
    }

    let src = ientering;
    let snk = m + jentering;

    // the incoming cell of each reached node
    let mut seen: Vec<Option<(usize, usize)>> = vec![None; m + n];
    // pairs (node, index of next neighbor)
    let mut stack = vec![(src, 0)];
    while let Some(top) = stack.last_mut() {
        let (u, k) = *top;
        top.1 += 1;
        if let Some(&(v, cell)) = neighs[u].get(k) {
            if v != src && seen[v].is_none() {
                seen[v] = Some(cell);
                if v == snk {
                    break;
                }
                stack.push((v, 0));
            }
        } else {
            stack.pop();
        }
    }

    if seen[snk].is_none() {
        return None;
    }

    let mut cells = vec![entering];
    let mut u = snk;
    while u != src {
        let (i, j) = seen[u]?;
        cells.push((i, j));
        u = if u < m { m + j } else { i };
    }

    debug_assert!(cells.len() >= 4 && cells.len() % 2 == 0);
    Some(Cycle { cells })
}
