//! Error types.
//!
//! Configuration problems are caught before any model is built; solver
//! failures and non-optimal terminations are reported by the branch-and-cut
//! driver.

use thiserror::Error;

use crate::mip::SolveStatus;

/// An invalid routing or facility-location instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Vehicle capacity must be strictly positive.
    #[error("vehicle capacity must be positive, got {0}")]
    NonPositiveCapacity(i32),
    /// A customer has a negative demand.
    #[error("customer {node} has negative demand {demand}")]
    NegativeDemand {
        /// Offending node.
        node: usize,
        /// Its demand.
        demand: i32,
    },
    /// The depot (node 0) must have zero demand.
    #[error("depot demand must be zero, got {0}")]
    DepotDemand(i32),
    /// The fleet is empty.
    #[error("fleet must contain at least one vehicle")]
    NoVehicles,
    /// The instance has a depot but no customers.
    #[error("instance has no customers")]
    NoCustomers,
    /// Distance matrix has the wrong number of rows.
    #[error("distance matrix must have {expected} rows, found {found}")]
    RowCountMismatch {
        /// Number of nodes.
        expected: usize,
        /// Rows found.
        found: usize,
    },
    /// A distance matrix row has the wrong length.
    #[error("distance matrix must be {expected}x{expected}, found row {row} with {found} entries")]
    DimensionMismatch {
        /// Number of nodes.
        expected: usize,
        /// Row index that failed the check.
        row: usize,
        /// Length found.
        found: usize,
    },
    /// A facility problem without demand regions.
    #[error("facility problem has no regions")]
    NoRegions,
    /// A facility problem without factories.
    #[error("facility problem has no factories")]
    NoFactories,
    /// A demand, capacity, or cost is negative or not finite.
    #[error("{what} must be a non-negative number, got {value}")]
    InvalidQuantity {
        /// What the value describes, e.g. `capacity of A`.
        what: String,
        /// The value.
        value: f64,
    },
    /// A factory's unit cost list does not cover every region.
    #[error("factory {factory} has {found} unit costs, expected {expected}")]
    UnitCostCount {
        /// Factory name.
        factory: String,
        /// Number of regions.
        expected: usize,
        /// Costs found.
        found: usize,
    },
    /// More candidate sites must open than there are candidates.
    #[error("cannot open {requested} candidate sites out of {available}")]
    CandidateCount {
        /// Sites to open.
        requested: usize,
        /// Candidate sites available.
        available: usize,
    },
}

/// Failure while loading an instance file.
#[derive(Error, Debug)]
pub enum InstanceError {
    /// I/O error when reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed but invalid instance.
    #[error("invalid instance: {0}")]
    Invalid(#[from] ConfigError),
}

/// Failure of a solve through an external MIP solver.
///
/// `E` is the error type of the external solver.
#[derive(Error, Debug)]
pub enum SolveError<E> {
    /// The instance was rejected before model construction.
    #[error("invalid instance: {0}")]
    Config(#[from] ConfigError),
    /// The solver itself failed.
    #[error("solver error: {0}")]
    Solver(#[source] E),
    /// The solver terminated without proving optimality.
    #[error("no optimal solution found (status: {0:?})")]
    NotOptimal(SolveStatus),
    /// The solver reported optimality but returned no variable values.
    #[error("solver reported an optimal status without a solution")]
    MissingSolution,
}
