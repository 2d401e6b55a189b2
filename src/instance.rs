//! CVRP instance configuration.
//!
//! An instance is the static data a model is built from: node demands, a
//! distance matrix, the vehicle capacity, and the fleet size. It can be
//! loaded from JSON, taken from the built-in textbook example, or generated
//! from a seed.
//!
//! ```json
//! {
//!   "demands": [0, 9, 18],
//!   "distances": [[0, 19, 21], [19, 0, 2], [21, 2, 0]],
//!   "capacity": 80,
//!   "num_vehicles": 2
//! }
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{ConfigError, InstanceError};
use crate::models::Customer;

/// On-disk representation.
#[derive(Debug, Serialize, Deserialize)]
struct InstanceFile {
    demands: Vec<i32>,
    distances: Vec<Vec<f64>>,
    capacity: i32,
    num_vehicles: usize,
}

/// A capacitated vehicle routing instance with a homogeneous fleet.
///
/// Node 0 is the depot; nodes `1..num_nodes()` are customers.
///
/// # Examples
///
/// ```
/// use or_routing::instance::CvrpInstance;
///
/// let inst = CvrpInstance::textbook();
/// assert_eq!(inst.num_nodes(), 9);
/// assert_eq!(inst.capacity(), 80);
/// assert!(inst.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CvrpInstance {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    capacity: i32,
    num_vehicles: usize,
}

impl CvrpInstance {
    /// Creates an instance from customers (index 0 = depot) and distances.
    ///
    /// No validation is done here; call [`validate`](Self::validate) before
    /// building a model.
    pub fn new(
        customers: Vec<Customer>,
        distances: DistanceMatrix,
        capacity: i32,
        num_vehicles: usize,
    ) -> Self {
        Self {
            customers,
            distances,
            capacity,
            num_vehicles,
        }
    }

    /// Creates an instance from a demand table and explicit distance rows.
    ///
    /// Fails if the matrix is not `demands.len()` square.
    pub fn from_demands(
        demands: &[i32],
        distances: &[Vec<f64>],
        capacity: i32,
        num_vehicles: usize,
    ) -> Result<Self, ConfigError> {
        let n = demands.len();
        if distances.len() != n {
            return Err(ConfigError::RowCountMismatch {
                expected: n,
                found: distances.len(),
            });
        }
        if let Some((row, r)) = distances.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ConfigError::DimensionMismatch {
                expected: n,
                row,
                found: r.len(),
            });
        }
        let matrix = DistanceMatrix::from_rows(distances).ok_or(ConfigError::RowCountMismatch {
            expected: n,
            found: distances.len(),
        })?;
        let customers = demands
            .iter()
            .enumerate()
            .map(|(id, &d)| Customer::with_demand(id, d))
            .collect();
        Ok(Self::new(customers, matrix, capacity, num_vehicles))
    }

    /// Parses and validates an instance from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, InstanceError> {
        let file: InstanceFile = serde_json::from_str(json)?;
        let inst = Self::from_demands(
            &file.demands,
            &file.distances,
            file.capacity,
            file.num_vehicles,
        )?;
        inst.validate()?;
        Ok(inst)
    }

    /// Reads, parses, and validates an instance file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes this instance to JSON.
    pub fn to_json(&self) -> Result<String, InstanceError> {
        let n = self.num_nodes();
        let file = InstanceFile {
            demands: self.demands(),
            distances: (0..n)
                .map(|i| (0..n).map(|j| self.distances.get(i, j)).collect())
                .collect(),
            capacity: self.capacity,
            num_vehicles: self.num_vehicles,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// The 9-node textbook instance: 8 customers, capacity 80, 4 vehicles.
    pub fn textbook() -> Self {
        let demands = [0, 9, 18, 8, 10, 12, 15, 16, 12];
        let rows: [[f64; 9]; 9] = [
            [0.0, 19.0, 21.0, 16.0, 18.0, 15.0, 19.0, 16.0, 18.0],
            [19.0, 0.0, 2.0, 4.0, 3.0, 4.0, 5.0, 5.0, 7.0],
            [21.0, 2.0, 0.0, 5.0, 4.0, 6.0, 5.0, 6.0, 7.0],
            [16.0, 4.0, 5.0, 0.0, 2.0, 1.0, 4.0, 2.0, 4.0],
            [18.0, 3.0, 4.0, 2.0, 0.0, 3.0, 2.0, 3.0, 4.0],
            [15.0, 4.0, 6.0, 1.0, 3.0, 0.0, 4.0, 2.0, 5.0],
            [19.0, 5.0, 5.0, 4.0, 2.0, 4.0, 0.0, 3.0, 2.0],
            [16.0, 5.0, 6.0, 2.0, 3.0, 2.0, 3.0, 0.0, 3.0],
            [18.0, 7.0, 7.0, 4.0, 4.0, 5.0, 2.0, 3.0, 0.0],
        ];
        let customers = demands
            .iter()
            .enumerate()
            .map(|(id, &d)| Customer::with_demand(id, d))
            .collect();
        let mut distances = DistanceMatrix::new(rows.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                distances.set(i, j, d);
            }
        }
        Self::new(customers, distances, 80, 4)
    }

    /// Generates a Euclidean instance on a 100×100 square.
    ///
    /// Demands are drawn from `1..=20`, capacity is 80, and the fleet is one
    /// vehicle more than the capacity lower bound.
    pub fn random(num_customers: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut customers = Vec::with_capacity(num_customers + 1);
        customers.push(Customer::depot(50.0, 50.0));
        for id in 1..=num_customers {
            let x = rng.random_range(0.0..100.0);
            let y = rng.random_range(0.0..100.0);
            let demand = rng.random_range(1..=20);
            customers.push(Customer::new(id, x, y, demand));
        }
        let capacity = 80;
        let total: i32 = customers.iter().map(|c| c.demand()).sum();
        let num_vehicles = (total as usize).div_ceil(capacity as usize) + 1;
        let distances = DistanceMatrix::from_customers(&customers);
        Self::new(customers, distances, capacity, num_vehicles)
    }

    /// Sets the vehicle capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the fleet size.
    pub fn with_num_vehicles(mut self, n: usize) -> Self {
        self.num_vehicles = n;
        self
    }

    /// Checks the instance before any model is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity <= 0 {
            return Err(ConfigError::NonPositiveCapacity(self.capacity));
        }
        if self.num_vehicles == 0 {
            return Err(ConfigError::NoVehicles);
        }
        if self.customers.len() < 2 {
            return Err(ConfigError::NoCustomers);
        }
        if self.distances.size() != self.customers.len() {
            return Err(ConfigError::RowCountMismatch {
                expected: self.customers.len(),
                found: self.distances.size(),
            });
        }
        let depot_demand = self.customers[0].demand();
        if depot_demand != 0 {
            return Err(ConfigError::DepotDemand(depot_demand));
        }
        if let Some(c) = self.customers.iter().find(|c| c.demand() < 0) {
            return Err(ConfigError::NegativeDemand {
                node: c.id(),
                demand: c.demand(),
            });
        }
        Ok(())
    }

    /// All locations (index 0 = depot).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Demand of every node, depot included.
    pub fn demands(&self) -> Vec<i32> {
        self.customers.iter().map(|c| c.demand()).collect()
    }

    /// Distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Fleet size.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Depot plus customers.
    pub fn num_nodes(&self) -> usize {
        self.customers.len()
    }

    /// Customers only.
    pub fn num_customers(&self) -> usize {
        self.customers.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook() {
        let inst = CvrpInstance::textbook();
        assert_eq!(inst.num_customers(), 8);
        assert_eq!(inst.num_vehicles(), 4);
        assert_eq!(inst.demands().iter().sum::<i32>(), 100);
        assert_eq!(inst.distances().get(0, 1), 19.0);
        assert_eq!(inst.distances().get(8, 6), 2.0);
        assert!(inst.validate().is_ok());
    }

    #[test]
    fn test_validate_capacity() {
        let inst = CvrpInstance::textbook().with_capacity(0);
        assert_eq!(inst.validate(), Err(ConfigError::NonPositiveCapacity(0)));
        let inst = CvrpInstance::textbook().with_capacity(-5);
        assert_eq!(inst.validate(), Err(ConfigError::NonPositiveCapacity(-5)));
    }

    #[test]
    fn test_validate_negative_demand() {
        let inst = CvrpInstance::from_demands(
            &[0, 4, -1],
            &[vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]],
            10,
            1,
        )
        .expect("square");
        assert_eq!(
            inst.validate(),
            Err(ConfigError::NegativeDemand { node: 2, demand: -1 })
        );
    }

    #[test]
    fn test_validate_depot_demand() {
        let inst =
            CvrpInstance::from_demands(&[3, 4], &[vec![0.0; 2], vec![0.0; 2]], 10, 1).expect("square");
        assert_eq!(inst.validate(), Err(ConfigError::DepotDemand(3)));
    }

    #[test]
    fn test_validate_fleet_and_customers() {
        assert_eq!(
            CvrpInstance::textbook().with_num_vehicles(0).validate(),
            Err(ConfigError::NoVehicles)
        );
        let lonely = CvrpInstance::from_demands(&[0], &[vec![0.0]], 10, 1).expect("square");
        assert_eq!(lonely.validate(), Err(ConfigError::NoCustomers));
    }

    #[test]
    fn test_from_demands_ragged() {
        let err = CvrpInstance::from_demands(&[0, 1], &[vec![0.0, 1.0], vec![1.0]], 10, 1)
            .expect_err("ragged");
        assert_eq!(
            err,
            ConfigError::DimensionMismatch {
                expected: 2,
                row: 1,
                found: 1,
            }
        );
    }

    #[test]
    fn test_json_roundtrip_textbook() {
        let inst = CvrpInstance::textbook();
        let json = inst.to_json().expect("serializable");
        let back = CvrpInstance::from_json_str(&json).expect("valid");
        assert_eq!(back.demands(), inst.demands());
        assert_eq!(back.distances(), inst.distances());
        assert_eq!(back.capacity(), 80);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let json = r#"{"demands":[0,5],"distances":[[0,1],[1,0]],"capacity":0,"num_vehicles":1}"#;
        let err = CvrpInstance::from_json_str(json).expect_err("capacity 0");
        assert!(matches!(
            err,
            InstanceError::Invalid(ConfigError::NonPositiveCapacity(0))
        ));

        let err = CvrpInstance::from_json_str("{not json").expect_err("malformed");
        assert!(matches!(err, InstanceError::Json(_)));
    }

    #[test]
    fn test_random_is_seeded() {
        let a = CvrpInstance::random(6, 42);
        let b = CvrpInstance::random(6, 42);
        assert_eq!(a, b);
        assert_eq!(a.num_customers(), 6);
        assert!(a.validate().is_ok());
        assert!(a.demands()[1..].iter().all(|&d| (1..=20).contains(&d)));
        let total: i32 = a.demands().iter().sum();
        assert!(a.num_vehicles() as i32 * a.capacity() >= total);
    }
}
