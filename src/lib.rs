//! # or-routing
//!
//! Routing building blocks for operations research: an exact CVRP
//! branch-and-cut layer that plugs into any MIP solver with lazy-constraint
//! callbacks, a facility-location model for the same solvers, and a
//! grid-based warehouse pick-path planner.
//!
//! ## Modules
//!
//! - [`branch_cut`] — CVRP model, subtour-elimination oracle, route extraction
//! - [`mip`] — Solver-agnostic model and the solver/callback traits
//! - [`models`] — Domain model types (Customer, Route, Solution)
//! - [`facility`] — Facility-location model and plan extraction
//! - [`distance`] — Distance matrix
//! - [`evaluation`] — Route feasibility checking and cost evaluation
//! - [`instance`] — CVRP instance configuration and loading
//! - [`warehouse`] — Grid BFS and greedy pick-path planning
//! - [`error`] — Error types

pub mod branch_cut;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod facility;
pub mod instance;
pub mod mip;
pub mod models;
pub mod warehouse;
