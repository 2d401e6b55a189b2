//! Warehouse floor grid and shortest walking paths.

use std::collections::VecDeque;
use std::ops::Range;

/// A grid position as `(row, col)`.
pub type Cell = (usize, usize);

/// Moves in search order: down, up, right, left.
const MOVES: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A rectangular warehouse floor of walkable aisles and shelf cells.
///
/// # Examples
///
/// ```
/// use or_routing::warehouse::Grid;
///
/// let grid = Grid::from_strings(&[
///     "....",
///     ".##.",
///     "....",
/// ])
/// .unwrap();
/// assert!(grid.is_free((0, 0)));
/// assert!(!grid.is_free((1, 1)));
/// assert!(!grid.in_bounds((3, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    shelf: Vec<bool>,
}

impl Grid {
    /// Creates an all-aisle grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            shelf: vec![false; rows * cols],
        }
    }

    /// Parses rows of `#` (shelf) and `.` (aisle). Returns `None` for ragged
    /// input or unknown characters.
    pub fn from_strings(lines: &[&str]) -> Option<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Self::new(rows, cols);
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return None;
            }
            for (c, ch) in line.chars().enumerate() {
                match ch {
                    '#' => grid.shelf[r * cols + c] = true,
                    '.' => {}
                    _ => return None,
                }
            }
        }
        Some(grid)
    }

    /// Marks the block `rows × cols` as shelving. Parts outside the grid are
    /// ignored.
    pub fn add_shelf(&mut self, rows: Range<usize>, cols: Range<usize>) {
        for r in rows.start..rows.end.min(self.rows) {
            for c in cols.start..cols.end.min(self.cols) {
                self.shelf[r * self.cols + c] = true;
            }
        }
    }

    /// Builder form of [`add_shelf`](Self::add_shelf).
    pub fn with_shelf(mut self, rows: Range<usize>, cols: Range<usize>) -> Self {
        self.add_shelf(rows, cols);
        self
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `cell` lies on the grid.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 < self.rows && cell.1 < self.cols
    }

    /// Whether `cell` is a walkable aisle cell.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.shelf[cell.0 * self.cols + cell.1]
    }

    /// In-bounds 4-neighbours of `cell`, in search order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        MOVES.iter().filter_map(move |&(dr, dc)| {
            let r = cell.0.checked_add_signed(dr)?;
            let c = cell.1.checked_add_signed(dc)?;
            self.in_bounds((r, c)).then_some((r, c))
        })
    }

    fn offset(&self, cell: Cell) -> usize {
        cell.0 * self.cols + cell.1
    }
}

/// Breadth-first shortest path from `start` to `goal`, both included.
///
/// Only aisle cells can be walked through; the goal may be a shelf cell
/// (pick faces are on the shelves) and so may the start. Returns `None` if
/// either end is off the grid or the goal cannot be reached.
///
/// # Examples
///
/// ```
/// use or_routing::warehouse::{shortest_path, Grid};
///
/// let grid = Grid::from_strings(&["...", "##.", "..."]).unwrap();
/// let path = shortest_path(&grid, (0, 0), (2, 0)).unwrap();
/// assert_eq!(path.len() - 1, 6);
/// assert_eq!(path.first(), Some(&(0, 0)));
/// assert_eq!(path.last(), Some(&(2, 0)));
/// ```
pub fn shortest_path(grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut parent: Vec<Option<Cell>> = vec![None; grid.rows() * grid.cols()];
    let mut visited = vec![false; grid.rows() * grid.cols()];
    let mut queue = VecDeque::new();
    visited[grid.offset(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            let mut path = vec![goal];
            let mut cell = goal;
            while let Some(prev) = parent[grid.offset(cell)] {
                path.push(prev);
                cell = prev;
            }
            path.reverse();
            return Some(path);
        }
        for next in grid.neighbors(current) {
            let k = grid.offset(next);
            if !visited[k] && (next == goal || grid.is_free(next)) {
                visited[k] = true;
                parent[k] = Some(current);
                queue.push_back(next);
            }
        }
    }

    None
}
