//! MIP formulation of the facility-location problem and plan extraction.

use serde::Serialize;
use tracing::{info, warn};

use super::FacilityProblem;
use crate::error::{ConfigError, SolveError};
use crate::mip::{AcceptAll, ConstraintSense, LinearConstraint, MipModel, MipSolver, SolveStatus, VarKind};

/// Shipments at or below this amount are treated as zero.
pub const SHIPMENT_EPSILON: f64 = 1e-6;

/// Transportation model with site-selection binaries.
///
/// Columns:
///
/// - `Ship_{f}_{r}` (continuous, ≥ 0): units from site `f` to region `r`,
///   cost = unit cost. Laid out factory-major.
/// - `Open_{f}` (binary) for each candidate site, cost = fixed cost.
///
/// Fixed costs of existing sites go into the objective constant.
///
/// Rows:
///
/// - `Demand_{r}`: `Σ_f Ship_{f}_{r} = demand_r`
/// - `Cap_{f}`: `Σ_r Ship_{f}_{r} ≤ capacity_f` for existing sites, and
///   `Σ_r Ship_{f}_{r} − capacity_f · Open_{f} ≤ 0` for candidates
/// - `Select_One_New_Fac`: `Σ Open = 1` (`Select_{k}_New_Fac` for `k ≠ 1`),
///   present only if there are candidate sites
#[derive(Debug, Clone)]
pub struct FacilityModel {
    model: MipModel,
    num_regions: usize,
    open: Vec<Option<usize>>,
}

impl FacilityModel {
    /// Validates `problem` and builds its model.
    pub fn build(problem: &FacilityProblem) -> Result<Self, ConfigError> {
        problem.validate()?;
        let regions = problem.regions();
        let factories = problem.factories();
        let mut model = MipModel::new("facility_location");

        for f in factories {
            for (r, &cost) in regions.iter().zip(&f.unit_costs) {
                model.add_var(format!("Ship_{}_{}", f.name, r.name), VarKind::Continuous, cost);
            }
        }

        let mut open = Vec::with_capacity(factories.len());
        for f in factories {
            if f.candidate {
                open.push(Some(model.add_var(
                    format!("Open_{}", f.name),
                    VarKind::Binary,
                    f.fixed_cost,
                )));
            } else {
                model.add_objective_offset(f.fixed_cost);
                open.push(None);
            }
        }

        let num_regions = regions.len();
        let ship = |f: usize, r: usize| f * num_regions + r;

        for (r, region) in regions.iter().enumerate() {
            let terms = (0..factories.len()).map(|f| (ship(f, r), 1.0)).collect();
            model.add_constraint(LinearConstraint::new(
                format!("Demand_{}", region.name),
                terms,
                ConstraintSense::Equal,
                region.demand,
            ));
        }

        for (f, factory) in factories.iter().enumerate() {
            let mut terms: Vec<(usize, f64)> = (0..num_regions).map(|r| (ship(f, r), 1.0)).collect();
            let rhs = match open[f] {
                Some(col) => {
                    terms.push((col, -factory.capacity));
                    0.0
                }
                None => factory.capacity,
            };
            model.add_constraint(LinearConstraint::new(
                format!("Cap_{}", factory.name),
                terms,
                ConstraintSense::LessEqual,
                rhs,
            ));
        }

        let open_cols: Vec<usize> = open.iter().flatten().copied().collect();
        if !open_cols.is_empty() {
            let k = problem.open_candidates();
            let name = if k == 1 {
                "Select_One_New_Fac".to_string()
            } else {
                format!("Select_{k}_New_Fac")
            };
            model.add_constraint(LinearConstraint::new(
                name,
                open_cols.into_iter().map(|col| (col, 1.0)).collect(),
                ConstraintSense::Equal,
                k as f64,
            ));
        }

        Ok(Self {
            model,
            num_regions,
            open,
        })
    }

    /// The model to hand to a solver.
    pub fn model(&self) -> &MipModel {
        &self.model
    }

    /// Column of `Ship_{f}_{r}`.
    pub fn ship_column(&self, factory: usize, region: usize) -> usize {
        factory * self.num_regions + region
    }

    /// Column of `Open_{f}`, `None` for existing sites.
    pub fn open_column(&self, factory: usize) -> Option<usize> {
        self.open.get(factory).copied().flatten()
    }

    /// Reads a plan from solver values.
    ///
    /// A candidate counts as built when its binary exceeds 0.5. Shipments of
    /// at most [`SHIPMENT_EPSILON`] are dropped. Cost is the model objective
    /// at `values`.
    pub fn plan(&self, problem: &FacilityProblem, values: &[f64]) -> FacilityPlan {
        let value = |col: usize| values.get(col).copied().unwrap_or(0.0);
        let factories = problem.factories();

        let opened = factories
            .iter()
            .enumerate()
            .filter(|&(f, _)| self.open_column(f).is_some_and(|col| value(col) > 0.5))
            .map(|(_, factory)| factory.name.clone())
            .collect();

        let mut shipments = Vec::new();
        for (f, factory) in factories.iter().enumerate() {
            for (r, region) in problem.regions().iter().enumerate() {
                let amount = value(self.ship_column(f, r));
                if amount > SHIPMENT_EPSILON {
                    shipments.push(Shipment {
                        factory: factory.name.clone(),
                        region: region.name.clone(),
                        amount,
                    });
                }
            }
        }

        FacilityPlan {
            opened,
            shipments,
            total_cost: self.model.objective_value(values),
        }
    }
}

/// Units moved from one site to one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    /// Source site.
    pub factory: String,
    /// Destination region.
    pub region: String,
    /// Units shipped.
    pub amount: f64,
}

/// An optimal facility-location decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityPlan {
    /// Candidate sites that are built.
    pub opened: Vec<String>,
    /// Non-zero shipments, factory-major.
    pub shipments: Vec<Shipment>,
    /// Fixed plus variable cost.
    pub total_cost: f64,
}

impl FacilityPlan {
    /// Total units shipped out of `factory`.
    pub fn shipped_from(&self, factory: &str) -> f64 {
        self.shipments
            .iter()
            .filter(|s| s.factory == factory)
            .map(|s| s.amount)
            .sum()
    }
}

/// Builds the facility model, solves it, and reads back the plan.
///
/// Same failure modes as [`solve_cvrp`](crate::branch_cut::solve_cvrp):
/// invalid input never reaches the solver, and a non-optimal status is
/// terminal.
pub fn solve_facility<S: MipSolver>(
    problem: &FacilityProblem,
    solver: &mut S,
) -> Result<FacilityPlan, SolveError<S::Error>> {
    let formulation = FacilityModel::build(problem)?;
    info!(
        regions = problem.regions().len(),
        factories = problem.factories().len(),
        "starting facility location"
    );

    let outcome = solver
        .solve(formulation.model(), &mut AcceptAll)
        .map_err(SolveError::Solver)?;
    if outcome.status != SolveStatus::Optimal {
        warn!(status = ?outcome.status, "solver finished without an optimal solution");
        return Err(SolveError::NotOptimal(outcome.status));
    }
    let values = outcome.values.ok_or(SolveError::MissingSolution)?;

    let mut plan = formulation.plan(problem, &values);
    if let Some(objective) = outcome.objective {
        plan.total_cost = objective;
    }
    info!(opened = ?plan.opened, cost = plan.total_cost, "facility location finished");
    Ok(plan)
}
