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

//! The set of basic cells of a transportation plan.
//!
//! The basic cells are the edges of a bipartite graph whose nodes are
//! the `m` rows (sources) and `n` columns (sinks) of the problem. A
//! non-degenerate basis has exactly `m + n - 1` cells and forms a
//! spanning tree of this graph.
//!
//! Usually the basic cells are the cells with positive allocation. If
//! there are too few of them, [`Basis::complete`] adds zero cells
//! (so-called *ε-cells*) until the cells form a spanning tree again.
//!
//! # Example
//!
//! ```
//! use rs_transport::{Basis, Matrix};
//!
//! let allocation = Matrix::from_rows(&[[10, 0], [0, 10]]).unwrap();
//! let costs = Matrix::from_rows(&[[1, 3], [2, 1]]).unwrap();
//!
//! let mut basis = Basis::from_allocation(&allocation, 0);
//! assert!(basis.is_degenerate());
//!
//! // the cheapest zero cell joining both components is added
//! assert_eq!(basis.complete(&costs), vec![(1, 0)]);
//! assert!(!basis.is_degenerate());
//! assert_eq!(basis.cells().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (1, 1)]);
//! ```

use crate::matrix::Matrix;
use std::cmp::Ordering;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A set of basic cells.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Basis {
    nrows: usize,
    ncols: usize,
    cells: Vec<bool>,
    len: usize,
}

impl Basis {
    /// Create an empty basis for an `nrows x ncols` problem.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Basis {
            nrows,
            ncols,
            cells: vec![false; nrows * ncols],
            len: 0,
        }
    }

    /// Create a basis containing all cells with allocation greater than `zero`.
    pub fn from_allocation<F>(allocation: &Matrix<F>, zero: F) -> Self
    where
        F: PartialOrd + Copy,
    {
        let mut basis = Basis::new(allocation.num_rows(), allocation.num_cols());
        for ((i, j), x) in allocation.cells() {
            if x > zero {
                basis.insert(i, j);
            }
        }
        basis
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Return the number of basic cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the number of cells of a non-degenerate basis, `m + n - 1`.
    pub fn required(&self) -> usize {
        (self.nrows + self.ncols).saturating_sub(1)
    }

    /// Return `true` if the basis has fewer than `m + n - 1` cells.
    pub fn is_degenerate(&self) -> bool {
        self.len < self.required()
    }

    /// Return `true` iff `(i, j)` is a basic cell.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.nrows && j < self.ncols && self.cells[i * self.ncols + j]
    }

    /// Add a cell to the basis.
    ///
    /// Return `true` iff the cell had not been basic before.
    pub fn insert(&mut self, i: usize, j: usize) -> bool {
        let cell = &mut self.cells[i * self.ncols + j];
        if *cell {
            false
        } else {
            *cell = true;
            self.len += 1;
            true
        }
    }

    /// Remove a cell from the basis.
    ///
    /// Return `true` iff the cell had been basic before.
    pub fn remove(&mut self, i: usize, j: usize) -> bool {
        let cell = &mut self.cells[i * self.ncols + j];
        if *cell {
            *cell = false;
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Iterate over the basic cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let ncols = self.ncols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(k, _)| (k / ncols, k % ncols))
    }

    /// Complete a degenerate basis to a spanning tree.
    ///
    /// Non-basic cells are considered in order of increasing cost
    /// (row-major order on ties). A cell is added iff it connects two
    /// different components of the rows/columns graph, exactly like an
    /// edge in Kruskal's algorithm, until all rows and columns are
    /// connected. The added cells carry an infinitesimal allocation ε,
    /// i.e. they are basic but their allocation is zero.
    ///
    /// Returns the added cells.
    pub fn complete<F>(&mut self, costs: &Matrix<F>) -> Vec<(usize, usize)>
    where
        F: PartialOrd + Copy,
    {
        let mut comps = vec![Component::Root(0); self.nrows + self.ncols];
        let mut ncomps = self.nrows + self.ncols;
        let basic: Vec<_> = self.cells().collect();
        for (i, j) in basic {
            if union(&mut comps, i, self.nrows + j) {
                ncomps -= 1;
            } else {
                log::warn!("basic cell ({}, {}) closes a cycle", i, j);
            }
        }

        let mut added = vec![];
        if ncomps <= 1 {
            return added;
        }

        let mut candidates: Vec<_> = costs.cells().filter(|&((i, j), _)| !self.contains(i, j)).collect();
        candidates.sort_by(|(_, c), (_, d)| c.partial_cmp(d).unwrap_or(Ordering::Equal));

        for ((i, j), _) in candidates {
            if ncomps <= 1 {
                break;
            }
            if union(&mut comps, i, self.nrows + j) {
                self.insert(i, j);
                added.push((i, j));
                ncomps -= 1;
            }
        }

        added
    }
}

/// Union-Find data-structure over rows and columns.
#[derive(Clone, Copy)]
enum Component {
    /// The root element with the tree's depth.
    Root(usize),
    /// An inner node with the parent node.
    Node(usize),
}

/// Return the root node and the tree's depth of node `u`.
fn find_root(comps: &[Component], u: usize) -> (usize, usize) {
    let mut v = u;
    loop {
        match comps[v] {
            Component::Node(parent) => v = parent,
            Component::Root(depth) => return (v, depth),
        }
    }
}

/// Join the components of `u` and `v`.
///
/// Return `false` if both had already been in the same component.
fn union(comps: &mut [Component], u: usize, v: usize) -> bool {
    let (uroot, udepth) = find_root(comps, u);
    let (vroot, vdepth) = find_root(comps, v);
    if uroot == vroot {
        return false;
    }
    if udepth < vdepth {
        comps[uroot] = Component::Node(vroot);
    } else {
        comps[vroot] = Component::Node(uroot);
        if udepth == vdepth {
            comps[uroot] = Component::Root(udepth + 1);
        }
    }
    true
}
