//! Reading vehicle routes back out of selected arcs.

use tracing::warn;

use super::ArcSelection;
use crate::models::Route;

/// Walks the selected arcs from every depot exit back to the depot.
///
/// Routes are produced for each customer `j` with `(0, j)` selected, in
/// ascending `j`, numbered from vehicle 0. At each step the lowest-numbered
/// selected successor is followed. A walk that dead-ends or revisits a node
/// stops there and the route is marked open.
///
/// # Examples
///
/// ```
/// use or_routing::branch_cut::{extract_routes, ArcSelection};
///
/// let sel = ArcSelection::from_arcs(5, [(0, 3), (3, 1), (1, 0), (0, 2), (2, 4), (4, 0)]);
/// let routes = extract_routes(&sel);
/// assert_eq!(routes[0].path(), vec![0, 2, 4, 0]);
/// assert_eq!(routes[1].path(), vec![0, 3, 1, 0]);
/// ```
pub fn extract_routes(selection: &ArcSelection) -> Vec<Route> {
    let n = selection.num_nodes();
    let mut routes = Vec::new();

    for first in selection.successors(0).collect::<Vec<_>>() {
        let mut route = Route::new(routes.len());
        let mut on_route = vec![false; n];
        let mut current = first;
        let mut closed = false;

        loop {
            route.push(current);
            on_route[current] = true;
            match selection.successors(current).next() {
                Some(0) => {
                    closed = true;
                    break;
                }
                Some(next) if !on_route[next] => current = next,
                _ => break,
            }
        }

        if !closed {
            warn!(
                vehicle = route.vehicle_id(),
                customers = ?route.customer_ids(),
                "route does not return to the depot"
            );
        }
        route.set_closed(closed);
        routes.push(route);
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_depot_exits() {
        let sel = ArcSelection::from_arcs(3, [(1, 2), (2, 1)]);
        assert!(extract_routes(&sel).is_empty());
    }

    #[test]
    fn test_single_route() {
        let sel = ArcSelection::from_arcs(4, [(0, 2), (2, 3), (3, 1), (1, 0)]);
        let routes = extract_routes(&sel);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].customer_ids(), &[2, 3, 1]);
        assert_eq!(routes[0].vehicle_id(), 0);
        assert!(routes[0].is_closed());
    }

    #[test]
    fn test_dead_end_is_open() {
        let sel = ArcSelection::from_arcs(3, [(0, 1), (1, 2)]);
        let routes = extract_routes(&sel);
        assert_eq!(routes[0].path(), vec![0, 1, 2, 0]);
        assert!(!routes[0].is_closed());
    }

    #[test]
    fn test_cycle_without_depot_return_terminates() {
        let sel = ArcSelection::from_arcs(4, [(0, 1), (1, 2), (2, 3), (3, 2)]);
        let routes = extract_routes(&sel);
        assert_eq!(routes[0].customer_ids(), &[1, 2, 3]);
        assert!(!routes[0].is_closed());
    }

    #[test]
    fn test_vehicle_ids_are_sequential() {
        let sel = ArcSelection::from_arcs(
            4,
            [(0, 1), (1, 0), (0, 2), (2, 0), (0, 3), (3, 0)],
        );
        let ids: Vec<_> = extract_routes(&sel).iter().map(|r| r.vehicle_id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
