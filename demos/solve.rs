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

use num_traits::{NumAssign, NumCast, Signed, ToPrimitive};
use rs_transport::dimacs;
use rs_transport::initial::{build_initial_solution, Strategy};
use rs_transport::modi::Optimizer;
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;
use std::str::FromStr;

use rustop::opts;
use time::OffsetDateTime;

fn run<F>(filename: &str, strategy: Strategy, max_iterations: Option<usize>, show: bool) -> Result<(), Box<dyn Error>>
where
    F: NumCast + NumAssign + PartialOrd + Copy + ToPrimitive + Signed + FromStr + Display,
    F::Err: Display,
{
    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::read_from_file::<F>(filename)?;
    let tend = OffsetDateTime::now_utc();

    let (m, n) = instance.costs.shape();
    println!("Instance            : {}", filename);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Value type          : {}", std::any::type_name::<F>());
    println!("Number of sources   : {}", m);
    println!("Number of sinks     : {}", n);

    let tstart = OffsetDateTime::now_utc();
    let init = build_initial_solution(strategy, &instance.supply, &instance.demand, &instance.costs)?;
    println!("Initial solution    : {:?}", strategy);
    println!("Initial value       : {:.2}", init.total_cost.to_f64().unwrap_or(f64::NAN));

    let mut opt = Optimizer::new(&instance.costs, init.allocation)?;
    if let Some(max_iterations) = max_iterations {
        opt.max_iterations = max_iterations;
    }
    let state = opt.solve();
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Solution state      : {:?}", state);
    println!("Value               : {:.2}", opt.value().to_f64().unwrap_or(f64::NAN));
    println!("Time (seconds)      : {:.2}", soltime);
    println!("Iterations (total)  : {}", opt.num_iterations());

    let plan = opt.into_plan();
    if show {
        println!();
        print!("{}", plan.table(&instance.costs));
    }

    println!();
    println!("Write solution to   : {}.sol", filename);

    let solfile = PathBuf::from(format!("{}.sol", filename));
    let f = &mut std::fs::File::create(&solfile)?;
    let fname = solfile
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "".into());
    writeln!(f, "c Solved with the MODI method")?;
    writeln!(f, "c instance            : {}", fname)?;
    writeln!(f, "c initial solution    : {:?}", strategy)?;
    writeln!(f, "c solution time       : {:.2} seconds", soltime)?;
    writeln!(f, "c number of iterations: {}", plan.iterations)?;
    dimacs::write_solution(f, &plan.allocation, plan.cost)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a transportation problem with the MODI method.";
        param file:String, desc:"Instance file name";
        opt mincost:bool, desc:"Start from the minimal cost rule (default: north-west corner)";
        opt max_iterations:Option<usize>, desc:"Maximal number of pivots";
        opt table:bool, desc:"Print the final transportation table";
        opt floating_point:bool, desc:"Use floating point values";
    }
    .parse_or_exit();

    let strategy = if args.mincost {
        Strategy::MinimalCost
    } else {
        Strategy::NorthWestCorner
    };

    if args.floating_point {
        run::<f64>(&args.file, strategy, args.max_iterations, args.table)
    } else {
        run::<isize>(&args.file, strategy, args.max_iterations, args.table)
    }
}
