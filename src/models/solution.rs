//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A customer appears on no route.
    CustomerNotVisited {
        /// Customer ID.
        customer_id: usize,
    },
    /// A customer appears more than once across all routes.
    CustomerVisitedTwice {
        /// Customer ID.
        customer_id: usize,
    },
    /// More routes than vehicles.
    FleetSizeExceeded {
        /// Routes in the solution.
        routes: usize,
        /// Available vehicles.
        vehicles: usize,
    },
    /// A route never returns to the depot.
    RouteNotClosed {
        /// Route index in the solution.
        route_index: usize,
    },
    /// A route lists a node id that is not in the instance.
    UnknownCustomer {
        /// Route index in the solution.
        route_index: usize,
        /// The unknown id.
        customer_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution to a routing problem.
///
/// # Examples
///
/// ```
/// use or_routing::models::{Solution, Route};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(0, vec![1, 2]));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_served(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the total cost of this solution.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.customer_ids().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_solution_with_routes() {
        let mut sol = Solution::new();

        let mut r1 = Route::from_customers(0, vec![1]);
        r1.set_total_distance(50.0);
        let mut r2 = Route::from_customers(1, vec![2, 3]);
        r2.set_total_distance(80.0);

        sol.add_route(r1);
        sol.add_route(r2);

        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert!((sol.total_distance() - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::FleetSizeExceeded {
            routes: 5,
            vehicles: 4,
        });
        assert_eq!(
            v.kind,
            ViolationType::FleetSizeExceeded {
                routes: 5,
                vehicles: 4,
            }
        );
    }
}
