//! Directed arc-selection model of the CVRP.

use super::ArcIndex;
use crate::error::ConfigError;
use crate::instance::CvrpInstance;
use crate::mip::{ConstraintSense, LinearConstraint, MipModel, VarKind};

/// The CVRP as a MIP over binary arc variables.
///
/// - one binary `x_i_j` per ordered node pair, cost `dist(i, j)`;
/// - `in_k` / `out_k`: every customer has in- and out-degree 1;
/// - `depot_out` / `depot_in`: at most `num_vehicles` routes leave and
///   return to the depot.
///
/// Subtours and capacity are handled lazily by
/// [`SubtourEliminationOracle`](super::SubtourEliminationOracle).
///
/// # Examples
///
/// ```
/// use or_routing::branch_cut::CvrpFormulation;
/// use or_routing::instance::CvrpInstance;
///
/// let f = CvrpFormulation::build(&CvrpInstance::textbook()).unwrap();
/// assert_eq!(f.model().num_vars(), 72);
/// assert_eq!(f.model().constraints().len(), 18);
/// assert!(f.model().lazy_constraints());
/// ```
#[derive(Debug, Clone)]
pub struct CvrpFormulation {
    model: MipModel,
    index: ArcIndex,
}

impl CvrpFormulation {
    /// Validates the instance and builds the model.
    pub fn build(instance: &CvrpInstance) -> Result<Self, ConfigError> {
        instance.validate()?;

        let n = instance.num_nodes();
        let index = ArcIndex::new(n);
        let dist = instance.distances();
        let mut model = MipModel::new("CVRP").with_lazy_constraints(true);

        for (i, j) in index.arcs() {
            model.add_var(format!("x_{i}_{j}"), VarKind::Binary, dist.get(i, j));
        }

        let column = |i: usize, j: usize| index.index(i, j).map(|col| (col, 1.0));

        for k in 1..n {
            let inbound = (0..n).filter_map(|j| column(j, k)).collect();
            model.add_constraint(LinearConstraint::new(
                format!("in_{k}"),
                inbound,
                ConstraintSense::Equal,
                1.0,
            ));
            let outbound = (0..n).filter_map(|j| column(k, j)).collect();
            model.add_constraint(LinearConstraint::new(
                format!("out_{k}"),
                outbound,
                ConstraintSense::Equal,
                1.0,
            ));
        }

        let fleet = instance.num_vehicles() as f64;
        model.add_constraint(LinearConstraint::new(
            "depot_out",
            (1..n).filter_map(|j| column(0, j)).collect(),
            ConstraintSense::LessEqual,
            fleet,
        ));
        model.add_constraint(LinearConstraint::new(
            "depot_in",
            (1..n).filter_map(|i| column(i, 0)).collect(),
            ConstraintSense::LessEqual,
            fleet,
        ));

        Ok(Self { model, index })
    }

    /// The model to hand to a solver.
    pub fn model(&self) -> &MipModel {
        &self.model
    }

    /// Column mapping of the arc variables.
    pub fn arc_index(&self) -> &ArcIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch_cut::ArcSelection;

    #[test]
    fn test_variables_follow_arc_index() {
        let f = CvrpFormulation::build(&CvrpInstance::textbook()).expect("valid");
        let idx = f.arc_index();
        let col = idx.index(3, 5).expect("arc");
        let var = &f.model().variables()[col];
        assert_eq!(var.name, "x_3_5");
        assert_eq!(var.kind, VarKind::Binary);
        assert_eq!(var.objective, 1.0);
    }

    #[test]
    fn test_degree_constraints() {
        let f = CvrpFormulation::build(&CvrpInstance::textbook()).expect("valid");
        let m = f.model();
        let in_3 = m.constraint("in_3").expect("in_3");
        assert_eq!(in_3.terms.len(), 8);
        assert_eq!(in_3.sense, ConstraintSense::Equal);
        assert_eq!(in_3.rhs, 1.0);
        let depot_out = m.constraint("depot_out").expect("depot_out");
        assert_eq!(depot_out.terms.len(), 8);
        assert_eq!(depot_out.rhs, 4.0);
        assert!(m.constraint("in_0").is_none());
    }

    #[test]
    fn test_tour_satisfies_static_constraints() {
        let inst = CvrpInstance::textbook();
        let f = CvrpFormulation::build(&inst).expect("valid");
        let tour = [0, 5, 3, 7, 1, 2, 4, 6, 8, 0];
        let sel = ArcSelection::from_arcs(9, tour.windows(2).map(|w| (w[0], w[1])));
        let values = sel.to_values(f.arc_index());
        assert!(f
            .model()
            .constraints()
            .iter()
            .all(|c| c.is_satisfied(&values, 1e-9)));
        let expected: f64 = tour
            .windows(2)
            .map(|w| inst.distances().get(w[0], w[1]))
            .sum();
        assert!((f.model().objective_value(&values) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_invalid_instance() {
        let inst = CvrpInstance::textbook().with_capacity(-1);
        assert_eq!(
            CvrpFormulation::build(&inst).err(),
            Some(ConfigError::NonPositiveCapacity(-1))
        );
    }
}
