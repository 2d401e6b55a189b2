//! Capacitated facility location.
//!
//! Existing sites always operate; a fixed number of candidate sites is
//! built. [`FacilityModel`] turns a [`FacilityProblem`] into a
//! [`MipModel`](crate::mip::MipModel) for any [`MipSolver`](crate::mip::MipSolver),
//! and [`solve_facility`] reads the decision back as a [`FacilityPlan`].

mod model;
mod problem;

pub use model::{solve_facility, FacilityModel, FacilityPlan, Shipment, SHIPMENT_EPSILON};
pub use problem::{FacilityProblem, Factory, Region};
