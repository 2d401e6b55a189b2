//! Branch-and-cut driver.

use tracing::{info, warn};

use super::{extract_routes, ArcSelection, CvrpFormulation, OracleStats, SubtourEliminationOracle};
use crate::error::SolveError;
use crate::evaluation::RouteEvaluator;
use crate::instance::CvrpInstance;
use crate::mip::{MipSolver, SolveStatus};
use crate::models::{Solution, Violation};

/// Result of a successful branch-and-cut solve.
#[derive(Debug, Clone)]
pub struct CvrpOutcome {
    /// Routes with distance and load filled in. Total cost is the solver's
    /// objective.
    pub solution: Solution,
    /// Constraint violations found when re-checking the routes. Empty for a
    /// correct solver.
    pub violations: Vec<Violation>,
    /// Callback counters.
    pub stats: OracleStats,
}

/// Solves a CVRP instance with an external MIP solver, separating
/// subtour-elimination cuts lazily.
///
/// Fails with [`SolveError::Config`] before any model is built if the
/// instance is invalid, and with [`SolveError::NotOptimal`] if the solver
/// stops without proving optimality. Neither is retried.
pub fn solve_cvrp<S: MipSolver>(
    instance: &CvrpInstance,
    solver: &mut S,
) -> Result<CvrpOutcome, SolveError<S::Error>> {
    let formulation = CvrpFormulation::build(instance)?;
    let mut oracle = SubtourEliminationOracle::for_instance(instance)?;

    info!(
        customers = instance.num_customers(),
        vehicles = instance.num_vehicles(),
        capacity = instance.capacity(),
        "starting branch-and-cut"
    );

    let outcome = solver
        .solve(formulation.model(), &mut oracle)
        .map_err(SolveError::Solver)?;
    let stats = oracle.stats();

    if outcome.status != SolveStatus::Optimal {
        warn!(status = ?outcome.status, "solver finished without an optimal solution");
        return Err(SolveError::NotOptimal(outcome.status));
    }
    let values = outcome.values.ok_or(SolveError::MissingSolution)?;

    let selection = ArcSelection::from_values(formulation.arc_index(), &values);
    let mut solution = Solution::new();
    for route in extract_routes(&selection) {
        solution.add_route(route);
    }

    let evaluator = RouteEvaluator::new(
        instance.customers(),
        instance.distances(),
        instance.capacity(),
    )
    .with_fleet_size(instance.num_vehicles());
    let (distance, violations) = evaluator.evaluate_solution(&mut solution);
    solution.set_total_cost(outcome.objective.unwrap_or(distance));

    if !violations.is_empty() {
        warn!(count = violations.len(), "optimal solution fails route checks");
    }
    info!(
        routes = solution.num_routes(),
        served = solution.num_served(),
        cost = solution.total_cost(),
        candidates = stats.candidates,
        cuts = stats.cuts,
        "branch-and-cut finished"
    );

    Ok(CvrpOutcome {
        solution,
        violations,
        stats,
    })
}
