//! Connected components of a candidate's undirected support graph.

use super::ArcSelection;

/// Partitions nodes `0..adjacency.len()` into connected components.
///
/// Iterative depth-first search seeded from each unvisited node in ascending
/// order; every node and edge is touched once. Components come out ordered
/// by their smallest node, members sorted ascending.
///
/// # Examples
///
/// ```
/// use or_routing::branch_cut::connected_components;
///
/// let adjacency = vec![vec![3], vec![2], vec![1], vec![0]];
/// assert_eq!(
///     connected_components(&adjacency),
///     vec![vec![0, 3], vec![1, 2]]
/// );
/// ```
pub fn connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        let mut component = Vec::new();

        while let Some(node) = stack.pop() {
            component.push(node);
            for &next in &adjacency[node] {
                if next < n && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}

impl ArcSelection {
    /// Connected components of the undirected graph underlying this
    /// selection.
    pub fn components(&self) -> Vec<Vec<usize>> {
        connected_components(&self.undirected_adjacency())
    }
}
