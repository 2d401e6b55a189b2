//! Pick-path planning: visit every pick location once and return.
//!
//! Pairwise walking distances come from grid BFS; the visiting order is the
//! greedy nearest-neighbour tour from the start point. The plan stitches the
//! per-leg cell paths into one walk.
//!
//! # Complexity
//!
//! O(t² · R·C) for `t` tasks on an `R × C` grid (one BFS per ordered pair).

use serde::Serialize;
use tracing::{info, warn};

use super::{shortest_path, Cell, Grid};
use crate::distance::DistanceMatrix;

/// A planned pick walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickPlan {
    /// Task locations; index 0 is the start point.
    pub tasks: Vec<Cell>,
    /// Visiting order as task indices, starting and ending at 0.
    pub order: Vec<usize>,
    /// Every cell walked, in order.
    pub path: Vec<Cell>,
    /// Number of steps over all reachable legs.
    pub total_length: usize,
    /// Legs with no walkable path; they are left out of `path`.
    pub unreachable_legs: Vec<(Cell, Cell)>,
}

impl PickPlan {
    /// Task locations in visiting order.
    pub fn ordered_cells(&self) -> Vec<Cell> {
        self.order.iter().map(|&i| self.tasks[i]).collect()
    }
}

/// De-duplicates picks (first occurrence wins) and puts `start` first.
///
/// # Examples
///
/// ```
/// use or_routing::warehouse::task_list;
///
/// let tasks = task_list((0, 5), &[(3, 1), (0, 5), (3, 1), (2, 2)]);
/// assert_eq!(tasks, vec![(0, 5), (3, 1), (2, 2)]);
/// ```
pub fn task_list(start: Cell, picks: &[Cell]) -> Vec<Cell> {
    let mut tasks = vec![start];
    for &p in picks {
        if !tasks.contains(&p) {
            tasks.push(p);
        }
    }
    tasks
}

/// Greedy nearest-neighbour tour over `dm` from node 0 and back.
///
/// Ties go to the lowest index. Unreachable nodes (infinite distance) are
/// still visited, last.
///
/// # Examples
///
/// ```
/// use or_routing::distance::DistanceMatrix;
/// use or_routing::warehouse::greedy_tour;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 5.0, 1.0],
///     vec![5.0, 0.0, 2.0],
///     vec![1.0, 2.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(greedy_tour(&dm), vec![0, 2, 1, 0]);
/// ```
pub fn greedy_tour(dm: &DistanceMatrix) -> Vec<usize> {
    let n = dm.size();
    if n == 0 {
        return Vec::new();
    }
    let mut unvisited: Vec<usize> = (1..n).collect();
    let mut tour = Vec::with_capacity(n + 1);
    tour.push(0);
    let mut current = 0;

    while let Some(next) = dm.nearest_neighbor(current, &unvisited) {
        unvisited.retain(|&j| j != next);
        tour.push(next);
        current = next;
    }

    tour.push(0);
    tour
}

/// Plans pick walks on a fixed grid.
///
/// # Examples
///
/// ```
/// use or_routing::warehouse::{Grid, PickPlanner};
///
/// let grid = Grid::new(3, 3);
/// let plan = PickPlanner::new(&grid).plan((0, 0), &[(2, 2), (0, 2)]);
/// assert_eq!(plan.ordered_cells(), vec![(0, 0), (0, 2), (2, 2), (0, 0)]);
/// assert_eq!(plan.total_length, 8);
/// ```
pub struct PickPlanner<'a> {
    grid: &'a Grid,
}

impl<'a> PickPlanner<'a> {
    /// Creates a planner for the given floor.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Distance matrix and per-leg paths between `tasks`.
    ///
    /// Unreachable pairs get distance `f64::INFINITY` and no path.
    pub fn leg_matrices(&self, tasks: &[Cell]) -> (DistanceMatrix, Vec<Vec<Option<Vec<Cell>>>>) {
        let n = tasks.len();
        let mut dm = DistanceMatrix::new(n);
        let mut paths = vec![vec![None; n]; n];
        for i in 0..n {
            for j in 0..n {
                let path = shortest_path(self.grid, tasks[i], tasks[j]);
                let d = path
                    .as_ref()
                    .map_or(f64::INFINITY, |p| (p.len() - 1) as f64);
                dm.set(i, j, d);
                paths[i][j] = path;
            }
        }
        (dm, paths)
    }

    /// Plans a walk from `start` through every pick and back.
    pub fn plan(&self, start: Cell, picks: &[Cell]) -> PickPlan {
        let tasks = task_list(start, picks);
        let (dm, paths) = self.leg_matrices(&tasks);
        let order = greedy_tour(&dm);

        let mut path: Vec<Cell> = Vec::new();
        let mut total_length = 0;
        let mut unreachable_legs = Vec::new();

        for leg in order.windows(2) {
            let (from, to) = (leg[0], leg[1]);
            let segment = match &paths[from][to] {
                Some(segment) if dm.is_reachable(from, to) => segment,
                _ => {
                    warn!(from = ?tasks[from], to = ?tasks[to], "no walkable path between picks");
                    unreachable_legs.push((tasks[from], tasks[to]));
                    continue;
                }
            };
            // a leg's first cell repeats the previous leg's last one
            let skip = usize::from(!path.is_empty());
            path.extend_from_slice(&segment[skip..]);
            total_length += segment.len() - 1;
        }

        info!(
            tasks = tasks.len(),
            total_length,
            unreachable = unreachable_legs.len(),
            "pick path planned"
        );

        PickPlan {
            tasks,
            order,
            path,
            total_length,
            unreachable_legs,
        }
    }
}
