//! Capacity-based subtour elimination.
//!
//! For every connected component `S` of a candidate that does not contain the
//! depot, the oracle emits
//!
//! ```text
//! Σ_{i, j ∈ S, i ≠ j} x_ij  ≤  |S| − ⌈d(S) / Q⌉
//! ```
//!
//! where `d(S)` is the component's total demand and `Q` the vehicle capacity.
//! The vehicle count `⌈d(S) / Q⌉` is the usual rounded capacity bound and is
//! not strengthened.

use tracing::debug;

use super::{ArcIndex, ArcSelection};
use crate::error::ConfigError;
use crate::instance::CvrpInstance;
use crate::mip::{CandidateContext, ConstraintSense, LazyCallback, LinearConstraint};

/// Minimum number of vehicles needed to carry `demand`: `⌈demand / capacity⌉`.
///
/// `capacity` must be positive. Zero demand needs zero vehicles.
///
/// # Examples
///
/// ```
/// use or_routing::branch_cut::min_vehicles;
///
/// assert_eq!(min_vehicles(27, 80), 1);
/// assert_eq!(min_vehicles(80, 80), 1);
/// assert_eq!(min_vehicles(81, 80), 2);
/// assert_eq!(min_vehicles(0, 80), 0);
/// ```
pub fn min_vehicles(demand: i64, capacity: i64) -> i64 {
    if demand <= 0 {
        return 0;
    }
    (demand + capacity - 1) / capacity
}

/// A subtour-elimination cut over one component's internal arcs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    component: Vec<usize>,
    demand: i64,
    min_vehicles: i64,
    rhs: i64,
}

impl Cut {
    /// Derives the cut for a component (members sorted ascending).
    pub fn for_component(component: Vec<usize>, demands: &[i32], capacity: i32) -> Self {
        let demand: i64 = component
            .iter()
            .map(|&v| i64::from(demands.get(v).copied().unwrap_or(0)))
            .sum();
        let min_vehicles = min_vehicles(demand, i64::from(capacity));
        let rhs = component.len() as i64 - min_vehicles;
        Self {
            component,
            demand,
            min_vehicles,
            rhs,
        }
    }

    /// Nodes of the component.
    pub fn component(&self) -> &[usize] {
        &self.component
    }

    /// Total demand of the component.
    pub fn demand(&self) -> i64 {
        self.demand
    }

    /// Vehicle lower bound `⌈demand / capacity⌉`.
    pub fn min_vehicles(&self) -> i64 {
        self.min_vehicles
    }

    /// Right-hand side `|S| − min_vehicles`. May be zero or negative.
    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// Every ordered pair of distinct component members.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.component.iter().flat_map(move |&i| {
            self.component
                .iter()
                .filter(move |&&j| j != i)
                .map(move |&j| (i, j))
        })
    }

    /// Number of the cut's arcs used by `selection`.
    pub fn lhs(&self, selection: &ArcSelection) -> i64 {
        self.arcs()
            .filter(|&(i, j)| selection.is_selected(i, j))
            .count() as i64
    }

    /// Whether `selection` violates this cut.
    pub fn is_violated_by(&self, selection: &ArcSelection) -> bool {
        self.lhs(selection) > self.rhs
    }

    /// Linear constraint over the arc columns of `index`.
    pub fn to_constraint(&self, index: &ArcIndex) -> LinearConstraint {
        let terms = self
            .arcs()
            .filter_map(|(i, j)| index.index(i, j))
            .map(|col| (col, 1.0))
            .collect();
        let name = self
            .component
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("_");
        LinearConstraint::new(
            format!("subtour_{name}"),
            terms,
            ConstraintSense::LessEqual,
            self.rhs as f64,
        )
    }
}

/// Counters kept across callback invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OracleStats {
    /// Candidates inspected.
    pub candidates: usize,
    /// Candidates that received at least one cut.
    pub rejected: usize,
    /// Cuts submitted to the solver.
    pub cuts: usize,
}

/// Lazy-constraint callback that separates capacity-based subtour cuts from
/// integer candidates.
///
/// # Examples
///
/// ```
/// use or_routing::branch_cut::{ArcSelection, SubtourEliminationOracle};
///
/// let oracle = SubtourEliminationOracle::new(vec![0, 9, 18, 8], 80).unwrap();
/// let sel = ArcSelection::from_arcs(4, [(1, 2), (2, 1), (0, 3), (3, 0)]);
/// let cuts = oracle.separate_selection(&sel);
/// assert_eq!(cuts.len(), 1);
/// assert_eq!(cuts[0].component(), &[1, 2]);
/// assert_eq!(cuts[0].rhs(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SubtourEliminationOracle {
    index: ArcIndex,
    demands: Vec<i32>,
    capacity: i32,
    stats: OracleStats,
}

impl SubtourEliminationOracle {
    /// Node 0.
    pub const DEPOT: usize = 0;

    /// Creates an oracle for nodes `0..demands.len()`.
    ///
    /// Demands are taken as given; only the capacity is checked.
    pub fn new(demands: Vec<i32>, capacity: i32) -> Result<Self, ConfigError> {
        if capacity <= 0 {
            return Err(ConfigError::NonPositiveCapacity(capacity));
        }
        Ok(Self {
            index: ArcIndex::new(demands.len()),
            demands,
            capacity,
            stats: OracleStats::default(),
        })
    }

    /// Creates an oracle for a validated instance.
    pub fn for_instance(instance: &CvrpInstance) -> Result<Self, ConfigError> {
        instance.validate()?;
        Self::new(instance.demands(), instance.capacity())
    }

    /// Column mapping the oracle reads candidates with.
    pub fn arc_index(&self) -> &ArcIndex {
        &self.index
    }

    /// Invocation counters.
    pub fn stats(&self) -> OracleStats {
        self.stats
    }

    /// Cuts for a candidate given as solver values.
    pub fn separate(&self, values: &[f64]) -> Vec<Cut> {
        self.separate_selection(&ArcSelection::from_values(&self.index, values))
    }

    /// One cut per connected component that excludes the depot.
    pub fn separate_selection(&self, selection: &ArcSelection) -> Vec<Cut> {
        selection
            .components()
            .into_iter()
            .filter(|c| !c.contains(&Self::DEPOT))
            .map(|c| Cut::for_component(c, &self.demands, self.capacity))
            .collect()
    }
}

impl LazyCallback for SubtourEliminationOracle {
    fn on_candidate<C: CandidateContext>(&mut self, ctx: &mut C) -> Result<usize, C::Error> {
        let values = ctx.solution()?;
        let cuts = self.separate(&values);
        self.stats.candidates += 1;
        if !cuts.is_empty() {
            self.stats.rejected += 1;
        }

        for cut in &cuts {
            debug!(
                component = ?cut.component(),
                demand = cut.demand(),
                vehicles = cut.min_vehicles(),
                rhs = cut.rhs(),
                "adding subtour cut"
            );
            ctx.add_lazy(cut.to_constraint(&self.index))?;
            self.stats.cuts += 1;
        }

        Ok(cuts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingContext {
        values: Vec<f64>,
        added: Vec<LinearConstraint>,
    }

    impl CandidateContext for RecordingContext {
        type Error = std::convert::Infallible;

        fn solution(&self) -> Result<Vec<f64>, Self::Error> {
            Ok(self.values.clone())
        }

        fn add_lazy(&mut self, constraint: LinearConstraint) -> Result<(), Self::Error> {
            self.added.push(constraint);
            Ok(())
        }
    }

    fn textbook_four() -> SubtourEliminationOracle {
        SubtourEliminationOracle::new(vec![0, 9, 18, 8], 80).expect("capacity > 0")
    }

    #[test]
    fn test_rejects_non_positive_capacity() {
        assert_eq!(
            SubtourEliminationOracle::new(vec![0, 1], 0).err(),
            Some(ConfigError::NonPositiveCapacity(0))
        );
        assert!(SubtourEliminationOracle::new(vec![0, 1], -3).is_err());
    }

    #[test]
    fn test_known_violating_case() {
        let oracle = textbook_four();
        let sel = ArcSelection::from_arcs(4, [(1, 2), (2, 1), (0, 3), (3, 0)]);
        let cuts = oracle.separate_selection(&sel);
        assert_eq!(cuts.len(), 1);
        let cut = &cuts[0];
        assert_eq!(cut.component(), &[1, 2]);
        assert_eq!(cut.demand(), 27);
        assert_eq!(cut.min_vehicles(), 1);
        assert_eq!(cut.rhs(), 1);
        assert_eq!(cut.arcs().collect::<Vec<_>>(), vec![(1, 2), (2, 1)]);
        assert!(cut.is_violated_by(&sel));

        let constraint = cut.to_constraint(oracle.arc_index());
        let idx = oracle.arc_index();
        assert_eq!(
            constraint.terms,
            vec![
                (idx.index(1, 2).expect("arc"), 1.0),
                (idx.index(2, 1).expect("arc"), 1.0)
            ]
        );
        assert_eq!(constraint.sense, ConstraintSense::LessEqual);
        assert_eq!(constraint.rhs, 1.0);
        assert_eq!(constraint.name, "subtour_1_2");
    }

    #[test]
    fn test_single_tour_no_cuts() {
        let oracle = textbook_four();
        let sel = ArcSelection::from_arcs(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(oracle.separate_selection(&sel).is_empty());
    }

    #[test]
    fn test_isolated_customer_gets_cut() {
        let oracle = SubtourEliminationOracle::new(vec![0, 5, 100], 80).expect("capacity > 0");
        let sel = ArcSelection::from_arcs(3, [(0, 1), (1, 0)]);
        let cuts = oracle.separate_selection(&sel);
        assert_eq!(cuts.len(), 1);
        assert_eq!(cuts[0].component(), &[2]);
        assert_eq!(cuts[0].min_vehicles(), 2);
        assert_eq!(cuts[0].rhs(), -1);
        assert_eq!(cuts[0].arcs().count(), 0);
        let constraint = cuts[0].to_constraint(oracle.arc_index());
        assert!(constraint.terms.is_empty());
        assert_eq!(constraint.rhs, -1.0);
    }

    #[test]
    fn test_heavy_component_needs_two_vehicles() {
        let oracle =
            SubtourEliminationOracle::new(vec![0, 50, 40, 30, 1], 80).expect("capacity > 0");
        let sel = ArcSelection::from_arcs(5, [(1, 2), (2, 3), (3, 1), (0, 4), (4, 0)]);
        let cuts = oracle.separate_selection(&sel);
        assert_eq!(cuts.len(), 1);
        assert_eq!(cuts[0].demand(), 120);
        assert_eq!(cuts[0].min_vehicles(), 2);
        assert_eq!(cuts[0].rhs(), 1);
        assert_eq!(cuts[0].lhs(&sel), 3);
    }

    #[test]
    fn test_separation_is_deterministic() {
        let oracle = textbook_four();
        let idx = *oracle.arc_index();
        let values =
            ArcSelection::from_arcs(4, [(1, 2), (2, 1), (0, 3), (3, 0)]).to_values(&idx);
        assert_eq!(oracle.separate(&values), oracle.separate(&values));
    }

    #[test]
    fn test_callback_adds_every_cut() {
        let mut oracle =
            SubtourEliminationOracle::new(vec![0, 1, 1, 1, 1, 1], 10).expect("capacity > 0");
        let idx = *oracle.arc_index();
        let sel = ArcSelection::from_arcs(6, [(0, 1), (1, 0), (2, 3), (3, 2), (4, 5), (5, 4)]);
        let mut ctx = RecordingContext {
            values: sel.to_values(&idx),
            added: Vec::new(),
        };

        let added = oracle.on_candidate(&mut ctx).expect("infallible");
        assert_eq!(added, 2);
        assert_eq!(ctx.added.len(), 2);
        assert_eq!(ctx.added[0].name, "subtour_2_3");
        assert_eq!(ctx.added[1].name, "subtour_4_5");
        assert_eq!(
            oracle.stats(),
            OracleStats {
                candidates: 1,
                rejected: 1,
                cuts: 2,
            }
        );
    }

    #[test]
    fn test_callback_accepts_tour() {
        let mut oracle = textbook_four();
        let idx = *oracle.arc_index();
        let mut ctx = RecordingContext {
            values: ArcSelection::from_arcs(4, [(0, 3), (3, 2), (2, 1), (1, 0)]).to_values(&idx),
            added: Vec::new(),
        };
        assert_eq!(oracle.on_candidate(&mut ctx).expect("infallible"), 0);
        assert!(ctx.added.is_empty());
        assert_eq!(oracle.stats().rejected, 0);
        assert_eq!(oracle.stats().candidates, 1);
    }

    #[test]
    fn test_for_instance_validates() {
        let bad = CvrpInstance::textbook().with_capacity(0);
        assert!(SubtourEliminationOracle::for_instance(&bad).is_err());
        let ok = SubtourEliminationOracle::for_instance(&CvrpInstance::textbook())
            .expect("valid");
        assert_eq!(ok.arc_index().num_nodes(), 9);
    }
}
