//! Domain model types for vehicle routing problems.
//!
//! Customers with demands, routes as ordered sequences of visits, and
//! solutions that collect routes and their cost.

mod customer;
mod route;
mod solution;

pub use customer::Customer;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
