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

//! The MODI improvement loop.

use super::cycle::{find_cycle, Cycle, Sign};
use super::deltas::{positive_deltas, Delta};
use super::pivot::reallocate;
use super::plan::Plan;
use super::potentials::{potentials, Potentials};
use super::SolutionState;
use crate::basis::Basis;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::problem::{self, default_zero, total_cost};
use num_traits::{NumAssign, NumCast, Signed};

/// The MODI (modified distribution) method.
///
/// The optimizer owns the allocation it improves. Each iteration
/// computes the potentials of the current basis, selects the non-basic
/// cell with the largest positive reduced cost and shifts flow along
/// the cycle this cell closes. If the cycle of the best cell cannot be
/// found, the next best cell is tried.
///
/// The starting allocation does not need to be basic. If its positive
/// cells contain cycles, flow is shifted along each of them (in the
/// direction that does not increase the cost) until one cell of the
/// cycle drops to zero.
pub struct Optimizer<'a, F> {
    costs: &'a Matrix<F>,
    allocation: Matrix<F>,
    basis: Basis,

    /// The (allocation) value to be considered zero. Defaults to
    /// `1e-8`, i.e. `0` for integer types.
    ///
    /// Reduced costs must exceed this value to be considered
    /// improving.
    pub zero: F,
    /// The maximal number of pivots. Defaults to `max(100, 10 * m * n)`.
    pub max_iterations: usize,

    niter: usize,
    history: Vec<F>,
    solution_state: SolutionState,
    need_new_basis: bool,
}

impl<'a, F> Optimizer<'a, F>
where
    F: NumAssign + NumCast + Signed + PartialOrd + Copy,
{
    /// Create an optimizer for the given starting allocation.
    ///
    /// Returns an error if the shapes of `costs` and `allocation`
    /// differ or any entry is negative or not finite.
    pub fn new(costs: &'a Matrix<F>, allocation: Matrix<F>) -> Result<Self> {
        problem::check_shape(
            "allocation rows",
            "allocation columns",
            &allocation,
            costs.num_rows(),
            costs.num_cols(),
        )?;
        problem::check_matrix("costs", costs)?;
        problem::check_matrix("allocation", &allocation)?;

        let (m, n) = costs.shape();
        Ok(Optimizer {
            costs,
            basis: Basis::new(m, n),
            allocation,
            zero: default_zero(),
            max_iterations: (10 * m * n).max(100),
            niter: 0,
            history: vec![],
            solution_state: SolutionState::Unknown,
            need_new_basis: true,
        })
    }

    /// Return the current allocation.
    pub fn allocation(&self) -> &Matrix<F> {
        &self.allocation
    }

    /// Return the current basis.
    ///
    /// The basis contains all cells with positive allocation and
    /// possibly some ε-cells with zero allocation.
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Return the cost of the current allocation.
    pub fn value(&self) -> F {
        total_cost(&self.allocation, self.costs)
    }

    /// Return the number of pivots of the latest run.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// Return the cost of the starting allocation followed by the cost
    /// after removing cycles of positive cells (if that changed it) and
    /// after each accepted pivot.
    pub fn history(&self) -> &[F] {
        &self.history
    }

    /// Return the solution state of the latest run.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// Return the potentials of the current basis.
    pub fn potentials(&self) -> Result<Potentials<F>> {
        potentials(self.costs, &self.basis)
    }

    /// Return the improving cells of the current basis.
    pub fn positive_deltas(&self) -> Vec<Delta<F>> {
        self.potentials()
            .map(|pot| positive_deltas(self.costs, &self.basis, &pot, self.zero))
            .unwrap_or_default()
    }

    /// Improve the allocation until it is optimal or no further
    /// progress can be made.
    pub fn solve(&mut self) -> SolutionState {
        self.niter = 0;
        self.history = vec![self.value()];
        self.solution_state = SolutionState::Unknown;

        if self.need_new_basis {
            self.prepare_basis();
            let value = self.value();
            if value != self.history[0] {
                self.history.push(value);
            }
        }

        self.solution_state = loop {
            if self.niter >= self.max_iterations {
                log::warn!("iteration limit {} reached", self.max_iterations);
                break SolutionState::IterationLimit;
            }

            let pot = match potentials(self.costs, &self.basis) {
                Ok(pot) => pot,
                Err(err) => {
                    log::warn!("{}", err);
                    break SolutionState::Degenerate;
                }
            };

            let candidates = positive_deltas(self.costs, &self.basis, &pot, self.zero);
            if candidates.is_empty() {
                break SolutionState::Optimal;
            }

            if !self.pivot(&candidates) {
                break SolutionState::Stalled;
            }
            self.niter += 1;
        };

        log::debug!(
            "{:?} after {} iterations, cost {:?}",
            self.solution_state,
            self.niter,
            self.value().to_f64()
        );

        self.solution_state
    }

    /// Consume the optimizer and return the final plan.
    pub fn into_plan(self) -> Plan<F> {
        let potentials = self.potentials().ok();
        let deltas = self.positive_deltas();
        let cost = self.value();
        Plan {
            allocation: self.allocation,
            cost,
            potentials,
            deltas,
            state: self.solution_state,
            iterations: self.niter,
            history: self.history,
        }
    }

    /// Build a spanning tree basis for the current allocation.
    ///
    /// The positive cells are added in row-major order. A cell that
    /// closes a cycle with the cells added so far is removed by
    /// [`Optimizer::cancel_cycle`]. Afterwards the basis is completed
    /// with ε-cells.
    fn prepare_basis(&mut self) {
        let (m, n) = self.allocation.shape();
        self.basis = Basis::new(m, n);
        for i in 0..m {
            for j in 0..n {
                if !(self.allocation[(i, j)] > self.zero) {
                    continue;
                }
                match find_cycle(&self.basis, (i, j)) {
                    Some(cycle) => self.cancel_cycle(cycle),
                    None => {
                        self.basis.insert(i, j);
                    }
                }
            }
        }

        let added = self.basis.complete(self.costs);
        if !added.is_empty() {
            log::debug!("degenerate basis, added ε-cells {:?}", added);
        }
        self.need_new_basis = false;
    }

    /// Shift flow along a cycle of positive cells.
    ///
    /// The first cell of `cycle` is positive but not basic yet, all
    /// other cells are basic. The direction is chosen such that the
    /// cost does not increase. The first cell becomes basic unless it
    /// is the one that drops to zero.
    fn cancel_cycle(&mut self, cycle: Cycle) {
        let cell = cycle.entering();
        let mut change = F::zero();
        for (c, sign) in cycle.signed() {
            match sign {
                Sign::Plus => change += self.costs[c],
                Sign::Minus => change -= self.costs[c],
            }
        }
        let cycle = if change > F::zero() { cycle.reversed() } else { cycle };

        match reallocate(&mut self.allocation, &cycle, self.zero) {
            Some(pivot) => {
                if pivot.leaving != cell {
                    self.basis.remove(pivot.leaving.0, pivot.leaving.1);
                    self.basis.insert(cell.0, cell.1);
                }
                log::debug!(
                    "cell {:?} closes a cycle of positive cells, shifted {:?}, {:?} dropped to zero",
                    cell,
                    pivot.theta.to_f64(),
                    pivot.leaving
                );
            }
            None => log::warn!("cannot shift flow along the cycle of positive cell {:?}", cell),
        }
    }

    /// Perform one pivot.
    ///
    /// Returns `true` if a pivot has been accepted.
    fn pivot(&mut self, candidates: &[Delta<F>]) -> bool {
        let old_value = self.value();

        for cand in candidates {
            let cycle = match find_cycle(&self.basis, cand.cell) {
                Some(cycle) => cycle,
                None => {
                    log::warn!("{}", Error::NoCycleFound { cell: cand.cell });
                    continue;
                }
            };

            let snapshot = self.allocation.clone();
            let pivot = match reallocate(&mut self.allocation, &cycle, self.zero) {
                Some(pivot) => pivot,
                None => {
                    log::trace!("malformed cycle for cell {:?}", cand.cell);
                    continue;
                }
            };

            let new_value = self.value();
            if new_value < old_value || pivot.degenerate {
                self.basis.remove(pivot.leaving.0, pivot.leaving.1);
                self.basis.insert(pivot.entering.0, pivot.entering.1);
                self.history.push(new_value);
                log::debug!(
                    "pivot {}: enter {:?} (delta {:?}), leave {:?}, theta {:?}",
                    self.niter + 1,
                    pivot.entering,
                    cand.delta.to_f64(),
                    pivot.leaving,
                    pivot.theta.to_f64()
                );
                return true;
            }

            log::warn!("pivot on {:?} does not decrease the cost, stopping", cand.cell);
            self.allocation = snapshot;
            return false;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::Optimizer;
    use crate::modi::{Delta, SolutionState};
    use crate::{Basis, Error, Matrix};

    #[test]
    fn test_scenario_from_north_west() {
        let costs = Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap();
        let x = Matrix::from_rows(&[[3500, 1100, 0, 0], [0, 900, 2500, 0], [0, 0, 2000, 1000]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 349000);
        assert_eq!(opt.num_iterations(), 2);
        assert_eq!(opt.history(), &[378000, 360000, 349000]);
        assert_eq!(
            opt.allocation().to_rows(),
            vec![vec![1500, 2000, 1100, 0], vec![0, 0, 3400, 0], vec![2000, 0, 0, 1000]]
        );

        let pot = opt.potentials().unwrap();
        assert_eq!(pot.u, vec![0, -40, 10]);
        assert_eq!(pot.v, vec![30, 40, 60, 0]);
        assert!(opt.positive_deltas().is_empty());
    }

    #[test]
    fn test_two_by_two() {
        let costs = Matrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
        let x = Matrix::from_rows(&[[0, 10], [10, 0]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.allocation().to_rows(), vec![vec![10, 0], vec![0, 10]]);
        assert_eq!(opt.history(), &[40, 20]);

        // a second run does not change anything
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.num_iterations(), 0);
        assert_eq!(opt.value(), 20);
    }

    #[test]
    fn test_degenerate_start() {
        let costs = Matrix::from_rows(&[[8, 6, 10], [9, 12, 13], [14, 9, 16]]).unwrap();
        let x = Matrix::from_rows(&[[20, 0, 0], [0, 30, 0], [0, 0, 50]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 1100);
        assert_eq!(opt.basis().len(), 5);
        for w in opt.history().windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_iteration_limit() {
        let costs = Matrix::from_rows(&[[30, 40, 60, 10], [50, 10, 20, 30], [40, 50, 80, 10]]).unwrap();
        let x = Matrix::from_rows(&[[3500, 1100, 0, 0], [0, 900, 2500, 0], [0, 0, 2000, 1000]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        opt.max_iterations = 1;
        assert_eq!(opt.solve(), SolutionState::IterationLimit);
        assert_eq!(opt.num_iterations(), 1);
        assert_eq!(opt.value(), 360000);
    }

    #[test]
    fn test_shape_mismatch() {
        let costs = Matrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        let x = Matrix::from_rows(&[[10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]).unwrap();
        assert!(matches!(
            Optimizer::new(&costs, x),
            Err(Error::ShapeMismatch {
                what: "allocation columns",
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_empty() {
        let costs: Matrix<f64> = Matrix::new(0, 0, 0.0);
        let mut opt = Optimizer::new(&costs, Matrix::new(0, 0, 0.0)).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 0.0);
    }

    #[test]
    fn test_cyclic_start() {
        // all four cells are positive and form a cycle
        let costs = Matrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
        let x = Matrix::from_rows(&[[5, 5], [5, 5]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 20);
        assert_eq!(opt.allocation().to_rows(), vec![vec![10, 0], vec![0, 10]]);
        assert_eq!(opt.history(), &[30, 20]);
        assert_eq!(opt.num_iterations(), 0);
        assert_eq!(opt.basis().len(), 3);
        assert!(!opt.basis().contains(0, 1));
    }

    #[test]
    fn test_cyclic_start_reversed() {
        // the cost decreases when the last positive cell is emptied
        let costs = Matrix::from_rows(&[[2, 1], [1, 2]]).unwrap();
        let x = Matrix::from_rows(&[[5, 5], [5, 5]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 20);
        assert_eq!(opt.allocation().to_rows(), vec![vec![0, 10], vec![10, 0]]);
        assert!(opt.basis().contains(1, 1));
        assert!(!opt.basis().contains(0, 0));
    }

    #[test]
    fn test_cyclic_start_degenerate() {
        let costs = Matrix::from_rows(&[[1, 2, 9], [2, 1, 9], [9, 9, 1]]).unwrap();
        let x = Matrix::from_rows(&[[5, 5, 0], [5, 5, 0], [0, 0, 10]]).unwrap();

        let mut opt = Optimizer::new(&costs, x).unwrap();
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 30);
        assert_eq!(opt.history()[..2], [40, 30]);
        assert!(opt.positive_deltas().is_empty());
    }

    #[test]
    fn test_pivot_skips_cell_without_cycle() {
        let costs = Matrix::from_rows(&[[1, 2, 5], [2, 1, 5], [5, 5, 1]]).unwrap();
        let x = Matrix::from_rows(&[[0, 10, 0], [10, 0, 0], [0, 0, 10]]).unwrap();
        let mut opt = Optimizer::new(&costs, x).unwrap();

        // row 2 and column 2 are not connected to the rest
        opt.basis = Basis::new(3, 3);
        for &(i, j) in &[(0, 1), (1, 0), (0, 0), (2, 2)] {
            opt.basis.insert(i, j);
        }

        let candidates = vec![
            Delta {
                delta: 9,
                cell: (2, 0),
            },
            Delta {
                delta: 1,
                cell: (1, 1),
            },
        ];
        assert!(opt.pivot(&candidates));
        assert!(opt.basis().contains(1, 1));
        assert!(!opt.basis().contains(0, 1));
        assert_eq!(
            opt.allocation().to_rows(),
            vec![vec![10, 0, 0], vec![0, 10, 0], vec![0, 0, 10]]
        );
        assert_eq!(opt.history(), &[30]);
    }

    #[test]
    fn test_pivot_skips_malformed_cycle() {
        let costs = Matrix::from_rows(&[[1.0, 2.0, 5.0], [2.0, 1.0, 5.0], [5.0, 5.0, 1.0]]).unwrap();
        let x = Matrix::from_rows(&[[0.0, 10.0, 0.0], [10.0, 0.0, 0.0], [0.0, 0.0, 10.0]]).unwrap();
        let mut opt = Optimizer::new(&costs, x).unwrap();

        opt.basis = Basis::new(3, 3);
        for &(i, j) in &[(0, 1), (1, 0), (2, 2), (0, 0), (0, 2)] {
            opt.basis.insert(i, j);
        }
        // the cycle of (1, 1) has no valid theta
        opt.allocation[(0, 1)] = f64::NAN;

        let candidates = vec![
            Delta {
                delta: 1.0,
                cell: (1, 1),
            },
            Delta {
                delta: 0.5,
                cell: (2, 0),
            },
        ];
        assert!(opt.pivot(&candidates));
        assert_eq!(opt.allocation()[(1, 1)], 0.0);
        assert!(opt.basis().contains(2, 0));
        assert!(!opt.basis().contains(0, 0));
    }

    #[test]
    fn test_stalled_pivot_is_undone() {
        let costs = Matrix::from_rows(&[[1.0, 1.25], [1.25, 1.0]]).unwrap();
        let x = Matrix::from_rows(&[[10.0, 0.0], [0.0, 10.0]]).unwrap();
        let mut opt = Optimizer::new(&costs, x.clone()).unwrap();
        opt.prepare_basis();
        let basis = opt.basis().clone();

        // accept the non-improving cell (1, 0) with reduced cost -0.5
        opt.zero = -0.75;
        assert_eq!(opt.solve(), SolutionState::Stalled);
        assert_eq!(opt.allocation(), &x);
        assert_eq!(opt.basis(), &basis);
        assert_eq!(opt.num_iterations(), 0);
        assert_eq!(opt.history(), &[20.0]);
    }
}
