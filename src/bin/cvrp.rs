//! Solves a CVRP instance with Gurobi and prints one route per vehicle.
//!
//! Without arguments the built-in 9-node textbook instance is solved.
//! `--instance <PATH>` loads a JSON instance, `--random <N>` generates one.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{arg, ArgMatches, Command};
use or_routing::branch_cut::solve_cvrp;
use or_routing::error::SolveError;
use or_routing::instance::CvrpInstance;
use or_routing::mip::GurobiSolver;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("cvrp")
        .about("Solves a capacitated vehicle routing instance by branch-and-cut")
        .arg(
            arg!(--instance <PATH> "Path to a JSON instance")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("random"),
        )
        .arg(
            arg!(--random <CUSTOMERS> "Generate a random instance with this many customers")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--seed [SEED] "Seed for --random")
                .default_value("0")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"time-limit" <SECONDS> "Solver time limit")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--threads <N> "Solver threads")
                .value_parser(clap::value_parser!(i32)),
        )
}

fn load_instance(matches: &ArgMatches) -> Result<CvrpInstance, Box<dyn std::error::Error>> {
    if let Some(path) = matches.get_one::<PathBuf>("instance") {
        return Ok(CvrpInstance::from_json_file(path)?);
    }
    if let Some(&customers) = matches.get_one::<usize>("random") {
        let seed = matches.get_one::<u64>("seed").copied().unwrap_or(0);
        return Ok(CvrpInstance::random(customers, seed));
    }
    Ok(CvrpInstance::textbook())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();
    let instance = load_instance(&matches)?;

    let mut solver = GurobiSolver::new()?;
    if let Some(&threads) = matches.get_one::<i32>("threads") {
        solver = solver.with_threads(threads);
    }
    if let Some(&seconds) = matches.get_one::<f64>("time-limit") {
        solver = solver.with_time_limit(seconds);
    }

    let outcome = match solve_cvrp(&instance, &mut solver) {
        Ok(outcome) => outcome,
        Err(SolveError::NotOptimal(status)) => {
            eprintln!("no optimal solution found: {status:?}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    for route in outcome.solution.routes() {
        println!("Vehicle {} route: {}", route.vehicle_id(), route);
    }
    println!("total cost: {}", outcome.solution.total_cost());
    println!(
        "candidates: {}, cuts: {}",
        outcome.stats.candidates, outcome.stats.cuts
    );
    for v in &outcome.violations {
        eprintln!("violation: {:?}", v.kind);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_defaults_to_textbook() {
        let m = cli().try_get_matches_from(["cvrp"]).expect("valid args");
        let instance = load_instance(&m).expect("textbook");
        assert_eq!(instance, CvrpInstance::textbook());
    }

    #[test]
    fn test_random_instance_uses_seed() {
        let m = cli()
            .try_get_matches_from(["cvrp", "--random", "6", "--seed", "3"])
            .expect("valid args");
        let instance = load_instance(&m).expect("random");
        assert_eq!(instance, CvrpInstance::random(6, 3));
    }

    #[test]
    fn test_instance_conflicts_with_random() {
        let err = cli().try_get_matches_from(["cvrp", "--instance", "a.json", "--random", "4"]);
        assert!(err.is_err());
    }
}
