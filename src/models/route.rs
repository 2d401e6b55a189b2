//! Route type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered sequence of customers served by a single vehicle.
///
/// A route starts and ends at the depot; the depot is not stored in the
/// customer list.
///
/// # Examples
///
/// ```
/// use or_routing::models::Route;
///
/// let route = Route::from_customers(0, vec![3, 5]);
/// assert_eq!(route.path(), vec![0, 3, 5, 0]);
/// assert_eq!(route.to_string(), "0 -> 3 -> 5 -> 0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    customer_ids: Vec<usize>,
    total_distance: f64,
    total_load: i32,
    closed: bool,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self::from_customers(vehicle_id, Vec::new())
    }

    /// Creates a route visiting the given customers in order.
    pub fn from_customers(vehicle_id: usize, customer_ids: Vec<usize>) -> Self {
        Self {
            vehicle_id,
            customer_ids,
            total_distance: 0.0,
            total_load: 0,
            closed: true,
        }
    }

    /// Appends a customer to the end of this route.
    pub fn push(&mut self, customer_id: usize) {
        self.customer_ids.push(customer_id);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the customer IDs in visit order.
    pub fn customer_ids(&self) -> &[usize] {
        &self.customer_ids
    }

    /// Returns the full node sequence, depot at both ends.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.customer_ids.len() + 2);
        path.push(0);
        path.extend_from_slice(&self.customer_ids);
        path.push(0);
        path
    }

    /// Total distance of this route (set by evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total load served by this route (set by evaluator).
    pub fn total_load(&self) -> i32 {
        self.total_load
    }

    /// `false` if the arcs this route was read from never led back to the
    /// depot.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    /// Sets the total load (used by evaluator).
    pub fn set_total_load(&mut self, load: i32) {
        self.total_load = load;
    }

    /// Marks whether the route returns to the depot.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        for (k, node) in path.iter().enumerate() {
            if k > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.customer_ids().is_empty());
        assert_eq!(r.vehicle_id(), 0);
        assert_eq!(r.total_distance(), 0.0);
        assert_eq!(r.total_load(), 0);
        assert_eq!(r.path(), vec![0, 0]);
        assert!(r.is_closed());
    }

    #[test]
    fn test_route_push() {
        let mut r = Route::new(1);
        r.push(5);
        r.push(3);
        assert_eq!(r.customer_ids(), &[5, 3]);
    }

    #[test]
    fn test_route_display() {
        let r = Route::from_customers(2, vec![1, 2, 4]);
        assert_eq!(format!("{r}"), "0 -> 1 -> 2 -> 4 -> 0");
    }
}
