//! Property-based tests for component partitioning and cut derivation.

use or_routing::branch_cut::{min_vehicles, ArcIndex, ArcSelection, Cut, SubtourEliminationOracle};
use proptest::prelude::*;

/// Up to 9 nodes with an arbitrary subset of arcs.
fn selection() -> impl Strategy<Value = ArcSelection> {
    (2usize..=9).prop_flat_map(|n| {
        let arcs = n * (n - 1);
        proptest::collection::vec(any::<bool>(), arcs).prop_map(move |bits| {
            let index = ArcIndex::new(n);
            let values: Vec<f64> = bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
            ArcSelection::from_values(&index, &values)
        })
    })
}

/// A random permutation of the customers `1..n`, closed into one tour.
fn single_tour() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (2usize..=9).prop_flat_map(|n| {
        Just((1..n).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_map(move |customers| (n, customers))
    })
}

proptest! {
    #[test]
    fn components_partition_nodes(sel in selection()) {
        let comps = sel.components();
        let mut seen = vec![0usize; sel.num_nodes()];
        for comp in &comps {
            prop_assert!(!comp.is_empty());
            for &v in comp {
                seen[v] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn components_are_closed_under_selected_arcs(sel in selection()) {
        let comps = sel.components();
        let mut owner = vec![usize::MAX; sel.num_nodes()];
        for (k, comp) in comps.iter().enumerate() {
            for &v in comp {
                owner[v] = k;
            }
        }
        for (i, j) in sel.selected_arcs() {
            prop_assert_eq!(owner[i], owner[j]);
        }
    }

    #[test]
    fn one_cut_per_depot_free_component(sel in selection(), cap in 1i32..100) {
        let n = sel.num_nodes();
        let demands: Vec<i32> = (0..n as i32).map(|v| if v == 0 { 0 } else { v * 7 }).collect();
        let oracle = SubtourEliminationOracle::new(demands, cap).expect("cap > 0");
        let cuts = oracle.separate_selection(&sel);
        let expected = sel.components().iter().filter(|c| !c.contains(&0)).count();
        prop_assert_eq!(cuts.len(), expected);
        for cut in &cuts {
            prop_assert!(!cut.component().contains(&0));
            prop_assert_eq!(cut.rhs(), cut.component().len() as i64 - cut.min_vehicles());
        }
    }

    #[test]
    fn separation_is_deterministic(sel in selection()) {
        let n = sel.num_nodes();
        let oracle = SubtourEliminationOracle::new(vec![3; n], 10).expect("cap > 0");
        let values = sel.to_values(oracle.arc_index());
        prop_assert_eq!(oracle.separate(&values), oracle.separate(&values));
        prop_assert_eq!(oracle.separate(&values), oracle.separate_selection(&sel));
    }

    #[test]
    fn single_tour_gets_no_cuts((n, customers) in single_tour()) {
        let mut path = vec![0];
        path.extend(customers);
        path.push(0);
        let sel = ArcSelection::from_arcs(n, path.windows(2).map(|w| (w[0], w[1])));
        let oracle = SubtourEliminationOracle::new(vec![5; n], 7).expect("cap > 0");
        prop_assert!(oracle.separate_selection(&sel).is_empty());
    }

    #[test]
    fn more_demand_never_loosens_cut(
        base in 0i64..500,
        extra in 0i64..500,
        cap in 1i64..200,
    ) {
        prop_assert!(min_vehicles(base + extra, cap) >= min_vehicles(base, cap));

        let component = vec![1, 2, 3];
        let low = Cut::for_component(component.clone(), &[0, base as i32, 0, 0], cap as i32);
        let high = Cut::for_component(component, &[0, (base + extra) as i32, 0, 0], cap as i32);
        prop_assert!(high.rhs() <= low.rhs());
    }

    #[test]
    fn min_vehicles_is_ceiling(demand in 1i64..10_000, cap in 1i64..500) {
        let r = min_vehicles(demand, cap);
        prop_assert!(r * cap >= demand);
        prop_assert!((r - 1) * cap < demand);
    }
}
