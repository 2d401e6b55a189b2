//! [`MipSolver`] backed by Gurobi through the `grb` crate.
//!
//! Each [`MipModel`] becomes a fresh `grb` model. Lazy constraints are
//! switched on when the model asks for them, and every `MIPSol` callback is
//! forwarded to the [`LazyCallback`].

use grb::prelude as gurobi;
use tracing::{debug, info};

use super::{
    CandidateContext, ConstraintSense, LazyCallback, LinearConstraint, MipModel, MipSolver,
    ObjectiveSense, SolveOutcome, SolveStatus, VarKind,
};

/// Gurobi-backed solver.
///
/// ```no_run
/// use or_routing::branch_cut::solve_cvrp;
/// use or_routing::instance::CvrpInstance;
/// use or_routing::mip::GurobiSolver;
///
/// let mut solver = GurobiSolver::new()?.with_threads(1);
/// let outcome = solve_cvrp(&CvrpInstance::textbook(), &mut solver)?;
/// for route in outcome.solution.routes() {
///     println!("{route}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GurobiSolver {
    env: gurobi::Env,
    threads: Option<i32>,
    time_limit: Option<f64>,
}

impl GurobiSolver {
    /// Starts a Gurobi environment with default parameters.
    pub fn new() -> grb::Result<Self> {
        Ok(Self {
            env: gurobi::Env::new("")?,
            threads: None,
            time_limit: None,
        })
    }

    /// Limits the number of solver threads.
    pub fn with_threads(mut self, threads: i32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Stops the search after `seconds`; the solve then reports
    /// [`SolveStatus::LimitReached`].
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }
}

fn var_type(kind: VarKind) -> gurobi::VarType {
    match kind {
        VarKind::Binary => gurobi::VarType::Binary,
        VarKind::Integer => gurobi::VarType::Integer,
        VarKind::Continuous => gurobi::VarType::Continuous,
    }
}

fn status(status: grb::Status) -> SolveStatus {
    match status {
        grb::Status::Optimal => SolveStatus::Optimal,
        grb::Status::Infeasible | grb::Status::InfOrUnbd => SolveStatus::Infeasible,
        grb::Status::Unbounded => SolveStatus::Unbounded,
        _ => SolveStatus::LimitReached,
    }
}

fn linear_expr(terms: &[(usize, f64)], vars: &[gurobi::Var]) -> grb::expr::LinExpr {
    let mut expr = grb::expr::LinExpr::new();
    for &(col, coef) in terms {
        if let Some(&var) = vars.get(col) {
            expr.add_term(coef, var);
        }
    }
    expr
}

fn inequality(constraint: &LinearConstraint, vars: &[gurobi::Var]) -> grb::constr::IneqExpr {
    let lhs = linear_expr(&constraint.terms, vars);
    let rhs = constraint.rhs;
    match constraint.sense {
        ConstraintSense::LessEqual => grb::c!(lhs <= rhs),
        ConstraintSense::Equal => grb::c!(lhs == rhs),
        ConstraintSense::GreaterEqual => grb::c!(lhs >= rhs),
    }
}

struct Candidate<'a, 'cb> {
    ctx: grb::callback::MIPSolCtx<'cb>,
    vars: &'a [gurobi::Var],
}

impl CandidateContext for Candidate<'_, '_> {
    type Error = grb::Error;

    fn solution(&self) -> grb::Result<Vec<f64>> {
        self.ctx.get_solution(self.vars)
    }

    fn add_lazy(&mut self, constraint: LinearConstraint) -> grb::Result<()> {
        self.ctx.add_lazy(inequality(&constraint, self.vars))
    }
}

struct Forward<'a, F> {
    callback: &'a mut F,
    vars: &'a [gurobi::Var],
    candidates: usize,
}

impl<F: LazyCallback> grb::callback::Callback for Forward<'_, F> {
    fn callback(&mut self, w: gurobi::Where) -> grb::callback::CbResult {
        if let gurobi::Where::MIPSol(ctx) = w {
            self.candidates += 1;
            let mut candidate = Candidate {
                ctx,
                vars: self.vars,
            };
            let added = self.callback.on_candidate(&mut candidate)?;
            debug!(candidate = self.candidates, added, "incumbent inspected");
        }
        Ok(())
    }
}

impl MipSolver for GurobiSolver {
    type Error = grb::Error;

    fn solve<F: LazyCallback>(
        &mut self,
        model: &MipModel,
        callback: &mut F,
    ) -> grb::Result<SolveOutcome> {
        let mut lp = gurobi::Model::with_env(model.name(), &self.env)?;
        if let Some(threads) = self.threads {
            lp.set_param(grb::param::Threads, threads)?;
        }
        if let Some(seconds) = self.time_limit {
            lp.set_param(grb::param::TimeLimit, seconds)?;
        }
        if model.lazy_constraints() {
            lp.set_param(grb::param::LazyConstraints, 1)?;
        }

        let mut vars = Vec::with_capacity(model.num_vars());
        let mut objective = grb::expr::LinExpr::new();
        for v in model.variables() {
            let (lb, ub) = v.kind.bounds();
            let var = lp.add_var(&v.name, var_type(v.kind), 0.0, lb, ub, std::iter::empty())?;
            objective.add_term(v.objective, var);
            vars.push(var);
        }
        objective.add_constant(model.objective_offset());
        let sense = match model.sense() {
            ObjectiveSense::Minimize => gurobi::ModelSense::Minimize,
            ObjectiveSense::Maximize => gurobi::ModelSense::Maximize,
        };
        lp.set_objective(objective, sense)?;

        for constraint in model.constraints() {
            lp.add_constr(&constraint.name, inequality(constraint, &vars))?;
        }

        let mut forward = Forward {
            callback,
            vars: &vars,
            candidates: 0,
        };
        lp.optimize_with_callback(&mut forward)?;
        let candidates = forward.candidates;

        let status = status(lp.status()?);
        info!(model = model.name(), ?status, candidates, "gurobi finished");
        if status != SolveStatus::Optimal {
            return Ok(SolveOutcome::without_solution(status));
        }

        let objective = lp.get_attr(grb::attr::ObjVal)?;
        let values = lp.get_obj_attr_batch(grb::attr::X, vars)?;
        Ok(SolveOutcome::optimal(objective, values))
    }
}
