//! Distance matrices.
//!
//! Provides a dense distance matrix shared by the CVRP model and the
//! warehouse pick-path planner.

mod matrix;

pub use matrix::DistanceMatrix;
