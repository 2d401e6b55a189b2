//! Contract between the routing code and an external MIP solver.
//!
//! The solver owns the search and the growing pool of lazy constraints. It
//! calls back into a [`LazyCallback`] each time it finds a new
//! integer-feasible candidate, and the callback may add constraints through
//! the [`CandidateContext`] before control returns.

use super::{LinearConstraint, MipModel};

/// Terminal status reported by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// No feasible solution exists.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// A time, node, or gap limit stopped the search.
    LimitReached,
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Terminal status.
    pub status: SolveStatus,
    /// Objective value of the incumbent, if any.
    pub objective: Option<f64>,
    /// Variable values of the incumbent, in column order.
    pub values: Option<Vec<f64>>,
}

impl SolveOutcome {
    /// An optimal outcome.
    pub fn optimal(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective: Some(objective),
            values: Some(values),
        }
    }

    /// An outcome without an incumbent.
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            objective: None,
            values: None,
        }
    }
}

/// View of the solver at a new integer-feasible candidate.
pub trait CandidateContext {
    /// Solver-specific error.
    type Error;

    /// Values of all columns for the current candidate.
    fn solution(&self) -> Result<Vec<f64>, Self::Error>;

    /// Adds a lazy constraint that applies for the rest of the search.
    fn add_lazy(&mut self, constraint: LinearConstraint) -> Result<(), Self::Error>;
}

/// Callback invoked once per integer-feasible candidate.
pub trait LazyCallback {
    /// Inspects the candidate and adds any violated constraints.
    ///
    /// Returns the number of constraints added. Zero means the candidate is
    /// accepted.
    fn on_candidate<C: CandidateContext>(&mut self, ctx: &mut C) -> Result<usize, C::Error>;
}

/// Callback for models without lazy constraints: accepts every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl LazyCallback for AcceptAll {
    fn on_candidate<C: CandidateContext>(&mut self, _ctx: &mut C) -> Result<usize, C::Error> {
        Ok(0)
    }
}

/// An external MIP solver that supports lazy constraints.
pub trait MipSolver {
    /// Solver-specific error.
    type Error;

    /// Optimizes `model`, invoking `callback` on every integer-feasible
    /// candidate.
    fn solve<F: LazyCallback>(
        &mut self,
        model: &MipModel,
        callback: &mut F,
    ) -> Result<SolveOutcome, Self::Error>;
}
