//! Facility-location problem data.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InstanceError};

/// A demand region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region name, used in variable and constraint names.
    pub name: String,
    /// Units that must be shipped to this region.
    pub demand: f64,
}

impl Region {
    /// Creates a region.
    pub fn new(name: impl Into<String>, demand: f64) -> Self {
        Self {
            name: name.into(),
            demand,
        }
    }
}

/// An existing or candidate production site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    /// Site name, used in variable and constraint names.
    pub name: String,
    /// Maximum units shipped in total.
    pub capacity: f64,
    /// Cost paid if the site operates.
    pub fixed_cost: f64,
    /// `true` if the site is only built when selected.
    pub candidate: bool,
    /// Production plus transport cost per unit, one entry per region.
    pub unit_costs: Vec<f64>,
}

impl Factory {
    /// An existing site that always operates.
    pub fn existing(name: impl Into<String>, capacity: f64, fixed_cost: f64, unit_costs: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            capacity,
            fixed_cost,
            candidate: false,
            unit_costs,
        }
    }

    /// A site that operates only if selected.
    pub fn candidate(name: impl Into<String>, capacity: f64, fixed_cost: f64, unit_costs: Vec<f64>) -> Self {
        Self {
            candidate: true,
            ..Self::existing(name, capacity, fixed_cost, unit_costs)
        }
    }
}

/// Chooses which candidate sites to build and how much each site ships to
/// each region, minimizing fixed plus per-unit cost.
///
/// # Examples
///
/// ```
/// use or_routing::facility::FacilityProblem;
///
/// let p = FacilityProblem::textbook();
/// assert_eq!(p.regions().len(), 5);
/// assert_eq!(p.candidates().count(), 2);
/// assert_eq!(p.total_demand(), 3000.0);
/// assert!(p.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityProblem {
    regions: Vec<Region>,
    factories: Vec<Factory>,
    #[serde(default = "one")]
    open_candidates: usize,
}

fn one() -> usize {
    1
}

impl FacilityProblem {
    /// Creates a problem where exactly one candidate site is built.
    pub fn new(regions: Vec<Region>, factories: Vec<Factory>) -> Self {
        Self {
            regions,
            factories,
            open_candidates: 1,
        }
    }

    /// Sets how many candidate sites must be built.
    pub fn with_open_candidates(mut self, count: usize) -> Self {
        self.open_candidates = count;
        self
    }

    /// Two existing plants (A, B), two candidate sites (C, D), five
    /// regions. Fixed costs are scaled by 10 000 to the unit-cost currency.
    pub fn textbook() -> Self {
        let regions = vec![
            Region::new("NE", 700.0),
            Region::new("ESE", 600.0),
            Region::new("MCE", 400.0),
            Region::new("S", 800.0),
            Region::new("W", 500.0),
        ];
        let factories = vec![
            Factory::existing("A", 1000.0, 100.0 * 10_000.0, vec![5.0, 6.0, 7.0, 8.0, 9.0]),
            Factory::existing("B", 1500.0, 150.0 * 10_000.0, vec![6.0, 5.0, 5.0, 7.0, 8.0]),
            Factory::candidate("C", 1500.0, 170.0 * 10_000.0, vec![6.0, 6.0, 6.0, 7.0, 7.0]),
            Factory::candidate("D", 1500.0, 150.0 * 10_000.0, vec![5.0, 5.0, 6.0, 6.0, 7.0]),
        ];
        Self::new(regions, factories)
    }

    /// Parses a problem from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, InstanceError> {
        let problem: Self = serde_json::from_str(json)?;
        problem.validate()?;
        Ok(problem)
    }

    /// Demand regions.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All sites, existing and candidate.
    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// Candidate sites.
    pub fn candidates(&self) -> impl Iterator<Item = &Factory> {
        self.factories.iter().filter(|f| f.candidate)
    }

    /// How many candidate sites must be built.
    pub fn open_candidates(&self) -> usize {
        self.open_candidates
    }

    /// Sum of all regional demand.
    pub fn total_demand(&self) -> f64 {
        self.regions.iter().map(|r| r.demand).sum()
    }

    /// Checks that every quantity is a finite non-negative number, that
    /// unit costs cover every region, and that enough candidates exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }
        if self.factories.is_empty() {
            return Err(ConfigError::NoFactories);
        }
        for r in &self.regions {
            check_quantity(|| format!("demand of {}", r.name), r.demand)?;
        }
        for f in &self.factories {
            check_quantity(|| format!("capacity of {}", f.name), f.capacity)?;
            check_quantity(|| format!("fixed cost of {}", f.name), f.fixed_cost)?;
            if f.unit_costs.len() != self.regions.len() {
                return Err(ConfigError::UnitCostCount {
                    factory: f.name.clone(),
                    expected: self.regions.len(),
                    found: f.unit_costs.len(),
                });
            }
            for (r, &cost) in self.regions.iter().zip(&f.unit_costs) {
                check_quantity(|| format!("unit cost {} -> {}", f.name, r.name), cost)?;
            }
        }
        let available = self.candidates().count();
        if self.open_candidates > available {
            return Err(ConfigError::CandidateCount {
                requested: self.open_candidates,
                available,
            });
        }
        Ok(())
    }
}

fn check_quantity(what: impl FnOnce() -> String, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidQuantity { what: what(), value })
    }
}
