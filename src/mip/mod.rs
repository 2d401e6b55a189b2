//! Mixed-integer programming interface.
//!
//! A plain model description ([`MipModel`]) plus the traits an external
//! solver implements ([`MipSolver`], [`CandidateContext`]) and the callback
//! it drives ([`LazyCallback`]). No solving algorithm lives here; with the
//! `gurobi` feature, `GurobiSolver` forwards models to Gurobi.

#[cfg(feature = "gurobi")]
mod gurobi;
mod model;
mod solver;

#[cfg(feature = "gurobi")]
pub use gurobi::GurobiSolver;

pub use model::{ConstraintSense, LinearConstraint, MipModel, ObjectiveSense, VarKind, Variable};
pub use solver::{AcceptAll, CandidateContext, LazyCallback, MipSolver, SolveOutcome, SolveStatus};
