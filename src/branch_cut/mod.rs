//! CVRP branch-and-cut with lazy subtour elimination.
//!
//! The model ([`CvrpFormulation`]) only carries degree and fleet constraints.
//! Whenever the external solver finds an integer candidate, the
//! [`SubtourEliminationOracle`] splits the candidate's arcs into connected
//! components and adds a capacity-based cut for every component that misses
//! the depot. [`solve_cvrp`] wires the two together and reads the routes
//! back with [`extract_routes`].

mod arcs;
mod components;
mod formulation;
mod oracle;
mod routes;
mod solve;

pub use arcs::{ArcIndex, ArcSelection, SELECTION_THRESHOLD};
pub use components::connected_components;
pub use formulation::CvrpFormulation;
pub use oracle::{min_vehicles, Cut, OracleStats, SubtourEliminationOracle};
pub use routes::extract_routes;
pub use solve::{solve_cvrp, CvrpOutcome};
