//! Solves a facility-location problem with Gurobi and prints the plan.
//!
//! Without arguments the built-in two-plant, two-candidate problem is
//! solved. `--problem <PATH>` loads a JSON problem.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{arg, Command};
use or_routing::error::SolveError;
use or_routing::facility::{solve_facility, FacilityProblem};
use or_routing::mip::GurobiSolver;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("facility")
        .about("Chooses candidate sites and shipments at minimum cost")
        .arg(
            arg!(--problem <PATH> "Path to a JSON facility problem")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--json "Print the plan as JSON"))
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();
    let problem = match matches.get_one::<PathBuf>("problem") {
        Some(path) => FacilityProblem::from_json_str(&std::fs::read_to_string(path)?)?,
        None => FacilityProblem::textbook(),
    };

    let mut solver = GurobiSolver::new()?;
    let plan = match solve_facility(&problem, &mut solver) {
        Ok(plan) => plan,
        Err(SolveError::NotOptimal(status)) => {
            eprintln!("no optimal solution found: {status:?}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("opened: {}", plan.opened.join(", "));
    for s in &plan.shipments {
        println!("  {} -> {}: {:.1}", s.factory, s.region, s.amount);
    }
    println!("total cost: {}", plan.total_cost);

    Ok(ExitCode::SUCCESS)
}
