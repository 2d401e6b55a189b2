//! Warehouse pick-path routing.
//!
//! - [`Grid`] — floor plan of aisles and shelves
//! - [`shortest_path`] — 4-neighbour BFS between two cells
//! - [`PickPlanner`] — greedy nearest-neighbour walk through all picks
//! - [`layout`] — sample floor and order

mod grid;
pub mod layout;
mod pick_path;

pub use grid::{shortest_path, Cell, Grid};
pub use pick_path::{greedy_tour, task_list, PickPlan, PickPlanner};
