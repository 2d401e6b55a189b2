//! Route evaluator that computes distance, load, and feasibility.

use crate::distance::DistanceMatrix;
use crate::models::{Customer, Route, Solution, Violation, ViolationType};

/// Evaluates routes by computing total distance and load, and checks the
/// CVRP constraints: capacity, fleet size, and that every customer is served
/// exactly once.
///
/// # Examples
///
/// ```
/// use or_routing::models::Customer;
/// use or_routing::distance::DistanceMatrix;
/// use or_routing::evaluation::RouteEvaluator;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
///
/// let evaluator = RouteEvaluator::new(&customers, &dm, 100);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.total_load(), 30);
/// assert!((route.total_distance() - 20.0).abs() < 1e-10);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    customers: &'a [Customer],
    distances: &'a DistanceMatrix,
    capacity: i32,
    fleet_size: Option<usize>,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(customers: &'a [Customer], distances: &'a DistanceMatrix, capacity: i32) -> Self {
        Self {
            customers,
            distances,
            capacity,
            fleet_size: None,
        }
    }

    /// Limits the number of routes a solution may use.
    pub fn with_fleet_size(mut self, n: usize) -> Self {
        self.fleet_size = Some(n);
        self
    }

    /// Builds a route from a sequence of customer IDs, computing distance
    /// and load.
    ///
    /// Returns the constructed route and any capacity, closure, or unknown-id
    /// violation.
    pub fn build_route(&self, vehicle_id: usize, customer_ids: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::from_customers(vehicle_id, customer_ids.to_vec());
        let violations = self.evaluate_route(&mut route);
        (route, violations)
    }

    /// Fills in distance and load of an existing route and checks capacity.
    ///
    /// Ids outside the instance are reported as
    /// [`ViolationType::UnknownCustomer`] and contribute neither load nor
    /// distance. The returned violations carry `route_index` 0; callers
    /// evaluating a whole solution rewrite it.
    pub fn evaluate_route(&self, route: &mut Route) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut load = 0;
        for &c in route.customer_ids() {
            match self.customers.get(c) {
                Some(customer) => load += customer.demand(),
                None => violations.push(Violation::new(ViolationType::UnknownCustomer {
                    route_index: 0,
                    customer_id: c,
                })),
            }
        }

        let n = self.distances.size();
        let total_distance: f64 = route
            .path()
            .windows(2)
            .filter(|w| w[0] < n && w[1] < n)
            .map(|w| self.distances.get(w[0], w[1]))
            .sum();

        route.set_total_distance(total_distance);
        route.set_total_load(load);

        if load > self.capacity {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load,
                capacity: self.capacity,
            }));
        }
        if !route.is_closed() {
            violations.push(Violation::new(ViolationType::RouteNotClosed { route_index: 0 }));
        }
        violations
    }

    /// Evaluates an entire solution in place, returning total distance and
    /// all violations.
    pub fn evaluate_solution(&self, solution: &mut Solution) -> (f64, Vec<Violation>) {
        let mut total_cost = 0.0;
        let mut all_violations = Vec::new();
        let mut visits = vec![0usize; self.customers.len()];

        for (idx, route) in solution.routes_mut().iter_mut().enumerate() {
            let mut violations = self.evaluate_route(route);
            for v in &mut violations {
                match &mut v.kind {
                    ViolationType::CapacityExceeded { route_index, .. }
                    | ViolationType::RouteNotClosed { route_index }
                    | ViolationType::UnknownCustomer { route_index, .. } => *route_index = idx,
                    _ => {}
                }
            }
            for &c in route.customer_ids() {
                if let Some(count) = visits.get_mut(c) {
                    *count += 1;
                }
            }
            total_cost += route.total_distance();
            all_violations.append(&mut violations);
        }

        for (customer_id, &count) in visits.iter().enumerate().skip(1) {
            match count {
                0 => all_violations.push(Violation::new(ViolationType::CustomerNotVisited {
                    customer_id,
                })),
                1 => {}
                _ => all_violations.push(Violation::new(ViolationType::CustomerVisitedTwice {
                    customer_id,
                })),
            }
        }

        if let Some(vehicles) = self.fleet_size {
            if solution.num_routes() > vehicles {
                all_violations.push(Violation::new(ViolationType::FleetSizeExceeded {
                    routes: solution.num_routes(),
                    vehicles,
                }));
            }
        }

        (total_cost, all_violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<Customer>, DistanceMatrix) {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 3.0, 4.0, 10),
            Customer::new(2, 6.0, 8.0, 20),
            Customer::new(3, 0.0, 10.0, 15),
        ];
        let dm = DistanceMatrix::from_customers(&customers);
        (customers, dm)
    }

    #[test]
    fn test_build_route_empty() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 50);
        let (route, violations) = eval.build_route(0, &[]);
        assert!(route.customer_ids().is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.total_distance(), 0.0);
    }

    #[test]
    fn test_build_route_single() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 50);
        let (route, violations) = eval.build_route(0, &[1]);
        assert!(violations.is_empty());
        // depot->1 = 5.0, 1->depot = 5.0
        assert!((route.total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(route.total_load(), 10);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 25);
        // 10 + 20 + 15 = 45 > 25
        let (_, violations) = eval.build_route(0, &[1, 2, 3]);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 45,
                capacity: 25,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_customer_reported() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 100);
        let (route, violations) = eval.build_route(0, &[1, 7]);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::UnknownCustomer {
                route_index: 0,
                customer_id: 7,
            })]
        );
        assert_eq!(route.total_load(), 10);
        // only depot->1 is a known leg
        assert!((route.total_distance() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_customer_in_solution() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 100);
        let mut sol = Solution::new();
        sol.add_route(Route::from_customers(0, vec![1, 2, 3]));
        sol.add_route(Route::from_customers(1, vec![9]));
        let (_, violations) = eval.evaluate_solution(&mut sol);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::UnknownCustomer {
                route_index: 1,
                customer_id: 9,
            })]
        );
    }

    #[test]
    fn test_open_route_flagged() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 100);
        let mut route = Route::from_customers(0, vec![1]);
        route.set_closed(false);
        let violations = eval.evaluate_route(&mut route);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::RouteNotClosed { route_index: 0 })]
        );
    }

    #[test]
    fn test_evaluate_solution_feasible() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 30).with_fleet_size(2);
        let mut sol = Solution::new();
        sol.add_route(Route::from_customers(0, vec![1, 2]));
        sol.add_route(Route::from_customers(1, vec![3]));
        let (cost, violations) = eval.evaluate_solution(&mut sol);
        assert!(violations.is_empty());
        // 5 + 5 + 10 = 20 and 10 + 10 = 20
        assert!((cost - 40.0).abs() < 1e-10);
        assert!((sol.total_distance() - 40.0).abs() < 1e-10);
        assert_eq!(sol.routes()[0].total_load(), 30);
    }

    #[test]
    fn test_evaluate_solution_coverage_and_fleet() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 100).with_fleet_size(1);
        let mut sol = Solution::new();
        sol.add_route(Route::from_customers(0, vec![1]));
        sol.add_route(Route::from_customers(1, vec![1, 2]));
        let (_, violations) = eval.evaluate_solution(&mut sol);
        let kinds: Vec<_> = violations.into_iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationType::CustomerVisitedTwice { customer_id: 1 }));
        assert!(kinds.contains(&ViolationType::CustomerNotVisited { customer_id: 3 }));
        assert!(kinds.contains(&ViolationType::FleetSizeExceeded {
            routes: 2,
            vehicles: 1,
        }));
    }

    #[test]
    fn test_route_index_rewritten() {
        let (customers, dm) = setup();
        let eval = RouteEvaluator::new(&customers, &dm, 15);
        let mut sol = Solution::new();
        sol.add_route(Route::from_customers(0, vec![1]));
        sol.add_route(Route::from_customers(1, vec![2, 3]));
        let (_, violations) = eval.evaluate_solution(&mut sol);
        assert!(violations.iter().any(|v| matches!(
            v.kind,
            ViolationType::CapacityExceeded {
                route_index: 1,
                load: 35,
                ..
            }
        )));
    }
}
