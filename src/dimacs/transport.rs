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

//! This module implements read and write functions for
//! transportation problems in a DIMACS-like format. A file must look
//! as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p trn <m> <n>`,
//!    where `<m>` is the number of sources and `<n>` the number of
//!    sinks.
//! 4. after the problem line there must follow supply lines `s <i>
//!    <supply>`, demand lines `d <j> <demand>` and cost lines `a <i>
//!    <j> <cost>` in any order. Sources are numbered `1..m`, sinks
//!    `1..n`. Sources and sinks with zero supply or demand do not need
//!    to be specified.
//! 5. there must be exactly one `a` line for each of the `m * n` cells.
//!
//! The reader does not check whether the instance is balanced, this is
//! done by the algorithms (see [`problem::check`](crate::problem::check)).
//!
//! Solutions are written as a line `s <value>` with the total cost
//! followed by lines `f <i> <j> <amount>` for each cell with non-zero
//! allocation.

use super::{DimacsReader, Error, Result};
use crate::matrix::Matrix;
use num_traits::Zero;
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// The maximal number of cells `m * n` accepted by [`read`].
pub const MAX_CELLS: usize = 1 << 28;

/// A transportation instance.
pub struct Instance<T> {
    /// The supply of each source.
    pub supply: Vec<T>,
    /// The demand of each sink.
    pub demand: Vec<T>,
    /// The `m x n` matrix of unit costs.
    pub costs: Matrix<T>,
}

pub fn read<R: Read, T>(r: R) -> Result<Instance<T>>
where
    T: FromStr + Zero + Copy,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);

    // Read the problem line.
    let mut pline = reader.expect_line("p")?;
    pline.expect("trn")?;
    let nrows: usize = pline.number()?;
    let ncols: usize = pline.number()?;
    pline.end()?;
    let pline_number = pline.line;

    // every cell needs its own 'a' line, so larger sizes cannot be valid
    let ncells = nrows
        .checked_mul(ncols)
        .filter(|&ncells| ncells <= MAX_CELLS)
        .ok_or_else(|| Error::Data {
            line: pline_number,
            msg: format!("invalid problem size {} x {}", nrows, ncols),
        })?;

    let mut supply = vec![T::zero(); nrows];
    let mut demand = vec![T::zero(); ncols];
    let mut costs = vec![None; ncells];

    while let Some((d, mut toks)) = reader.read_one_line_of(&["s", "d", "a"])? {
        match d {
            "s" => {
                let i = toks.index("source", nrows)?;
                supply[i] = toks.number()?;
            }
            "d" => {
                let j = toks.index("sink", ncols)?;
                demand[j] = toks.number()?;
            }
            _ => {
                let i = toks.index("source", nrows)?;
                let j = toks.index("sink", ncols)?;
                let c: T = toks.number()?;
                let cell = &mut costs[i * ncols + j];
                if cell.is_some() {
                    return Err(Error::Data {
                        line: toks.line,
                        msg: format!("duplicate 'a' line for cell ({},{})", i + 1, j + 1),
                    });
                }
                *cell = Some(c);
            }
        }

        toks.end()?;
    }

    let mut matrix = Matrix::new(nrows, ncols, T::zero());
    for (k, c) in costs.into_iter().enumerate() {
        let (i, j) = (k / ncols, k % ncols);
        matrix[(i, j)] = c.ok_or_else(|| Error::Data {
            line: reader.line_number(),
            msg: format!("missing 'a' line for cell ({},{})", i + 1, j + 1),
        })?;
    }

    Ok(Instance {
        supply,
        demand,
        costs: matrix,
    })
}

pub fn read_from_file<T>(filename: &str) -> Result<Instance<T>>
where
    T: FromStr + Zero + Copy,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a transportation instance.
pub fn write<W, T>(mut w: W, instance: &Instance<T>) -> std::io::Result<()>
where
    W: Write,
    T: Zero + Display + Copy,
{
    let (m, n) = instance.costs.shape();
    writeln!(w, "p trn {} {}", m, n)?;
    for (i, s) in instance.supply.iter().enumerate() {
        if !s.is_zero() {
            writeln!(w, "s {} {}", i + 1, s)?;
        }
    }
    for (j, d) in instance.demand.iter().enumerate() {
        if !d.is_zero() {
            writeln!(w, "d {} {}", j + 1, d)?;
        }
    }
    for ((i, j), c) in instance.costs.cells() {
        writeln!(w, "a {} {} {}", i + 1, j + 1, c)?;
    }

    Ok(())
}

/// Write a transportation instance to a named file.
pub fn write_to_file<T>(filename: &str, instance: &Instance<T>) -> std::io::Result<()>
where
    T: Zero + Display + Copy,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

/// Write a solution of a transportation problem.
pub fn write_solution<W, T>(mut w: W, allocation: &Matrix<T>, value: T) -> std::io::Result<()>
where
    W: Write,
    T: Display + Zero + Copy,
{
    writeln!(w, "s {}", value)?;
    for ((i, j), x) in allocation.cells() {
        if !x.is_zero() {
            writeln!(w, "f {} {} {}", i + 1, j + 1, x)?;
        }
    }

    Ok(())
}

/// Write a solution of a transportation problem to a named file.
pub fn write_solution_to_file<T>(filename: &str, allocation: &Matrix<T>, value: T) -> std::io::Result<()>
where
    T: Display + Zero + Copy,
{
    write_solution(&mut std::fs::File::create(filename)?, allocation, value)
}

/// Read a solution of a transportation problem.
///
/// Returns the solution value and the list of non-zero cells `(i, j,
/// amount)` with 0-based indices.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize, T)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut flows = vec![];
    let mut sol = None;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["f", "s"])? {
        if d == "f" {
            let i = toks.index("source", usize::MAX)?;
            let j = toks.index("sink", usize::MAX)?;
            flows.push((i, j, toks.number()?));
        } else {
            if sol.is_some() {
                return Err(Error::Format {
                    line: toks.line,
                    msg: "The solution value must be specified exactly once".to_string(),
                });
            }
            sol = Some(toks.number()?);
        }
        toks.end()?;
    }

    Ok((
        sol.ok_or_else(|| Error::Format {
            line: 0,
            msg: "Missing solution value".to_string(),
        })?,
        flows,
    ))
}

/// Read a solution of a transportation problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<(usize, usize, T)>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {
    use super::Instance;
    use crate::dimacs::{self, Error};
    use crate::Matrix;
    use std::io::Cursor;

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p trn 2 3
s 1 30
s 2 20

c sink 3 has no demand line
d 1 25
d 2 25

a 1 1 4
a 1 2 6
a 1 3 1
a 2 1 3
a 2 2 2
a 2 3 7
c end of the file
";
        let instance = dimacs::read::<_, i64>(Cursor::new(file)).unwrap();
        assert_eq!(instance.supply, vec![30, 20]);
        assert_eq!(instance.demand, vec![25, 25, 0]);
        assert_eq!(instance.costs.to_rows(), vec![vec![4, 6, 1], vec![3, 2, 7]]);
    }

    #[test]
    fn missing_cell() {
        let file = "p trn 1 2\ns 1 5\nd 2 5\na 1 2 3\n";
        match dimacs::read::<_, f64>(Cursor::new(file)) {
            Err(Error::Data { line, msg }) => {
                assert_eq!(line, 4);
                assert!(msg.contains("(1,1)"));
            }
            _ => panic!("expected data error"),
        }
    }

    #[test]
    fn duplicate_cell() {
        let file = "p trn 1 1\na 1 1 3\na 1 1 4\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(file)),
            Err(Error::Data { line: 3, .. })
        ));
    }

    #[test]
    fn invalid_index() {
        let file = "p trn 2 2\ns 3 10\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(file)),
            Err(Error::Data { line: 2, .. })
        ));
        let file = "p min 2 2\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(file)),
            Err(Error::Format { line: 1, .. })
        ));
    }

    #[test]
    fn invalid_size() {
        let file = format!("p trn {} 2\n", usize::MAX);
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(file)),
            Err(Error::Data { line: 1, .. })
        ));
        let file = "c huge\np trn 100000 100000\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(file)),
            Err(Error::Data { line: 2, .. })
        ));
    }

    #[test]
    fn write_test_file() {
        let instance = Instance {
            supply: vec![10, 0],
            demand: vec![4, 6],
            costs: Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap(),
        };

        let mut buf = Cursor::new(Vec::new());
        dimacs::write(&mut buf, &instance).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p trn 2 2
s 1 10
d 1 4
d 2 6
a 1 1 1
a 1 2 2
a 2 1 3
a 2 2 4
"
        );
    }

    #[test]
    fn write_solution_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let allocation = Matrix::from_rows(&[[5, 0, 2], [0, 4, 0]])?;

        let mut buf = Cursor::new(Vec::new());
        dimacs::write_solution(&mut buf, &allocation, 42)?;

        let soltxt = String::from_utf8(buf.into_inner())?;
        assert_eq!(
            soltxt,
            "s 42
f 1 1 5
f 1 3 2
f 2 2 4
"
        );

        let (value, flows) = dimacs::read_solution(Cursor::new(soltxt))?;
        assert_eq!(value, 42);
        assert_eq!(flows, vec![(0, 0, 5), (0, 2, 2), (1, 1, 4)]);

        Ok(())
    }
}
