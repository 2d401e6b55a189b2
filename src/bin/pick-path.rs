//! Plans the sample warehouse pick walk and prints it.
//!
//! `pick-path` prints the visiting order, total length, and every step.
//! `pick-path --json` prints the plan as JSON instead. Set `RUST_LOG` for
//! log output.

use clap::{arg, Command};
use or_routing::warehouse::layout::{sample_picks, sample_warehouse, SAMPLE_START};
use or_routing::warehouse::PickPlanner;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("pick-path")
        .about("Plans a greedy pick walk through the sample warehouse")
        .arg(arg!(--json "Print the plan as JSON"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();

    let grid = sample_warehouse();
    let plan = PickPlanner::new(&grid).plan(SAMPLE_START, &sample_picks());

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("visit order (indices): {:?}", plan.order);
    println!("visit order (cells):   {:?}", plan.ordered_cells());
    println!("total length: {}", plan.total_length);
    for (from, to) in &plan.unreachable_legs {
        println!("unreachable: {from:?} -> {to:?}");
    }
    println!("steps:");
    for cell in &plan.path {
        println!("  {cell:?}");
    }

    Ok(())
}
