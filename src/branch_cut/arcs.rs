//! Arc variables and candidate arc selections.

/// Solver values strictly above this count as a selected arc.
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Column mapping for the directed arc variables `x_ij`, `i ≠ j`.
///
/// Columns are laid out row-major with the diagonal skipped, so node `i`
/// owns columns `i·(n−1) .. (i+1)·(n−1)`. The mapping is fixed for the
/// lifetime of a model.
///
/// # Examples
///
/// ```
/// use or_routing::branch_cut::ArcIndex;
///
/// let idx = ArcIndex::new(3);
/// assert_eq!(idx.len(), 6);
/// assert_eq!(idx.index(0, 1), Some(0));
/// assert_eq!(idx.index(1, 0), Some(2));
/// assert_eq!(idx.index(1, 1), None);
/// assert_eq!(idx.arc(5), Some((2, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcIndex {
    num_nodes: usize,
}

impl ArcIndex {
    /// Creates the mapping for a complete directed graph on `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self { num_nodes }
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of arc variables.
    pub fn len(&self) -> usize {
        self.num_nodes * self.num_nodes.saturating_sub(1)
    }

    /// Returns `true` if there are no arcs (fewer than two nodes).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column of arc `(i, j)`, or `None` for self-loops and unknown nodes.
    pub fn index(&self, i: usize, j: usize) -> Option<usize> {
        if i == j || i >= self.num_nodes || j >= self.num_nodes {
            return None;
        }
        let offset = if j < i { j } else { j - 1 };
        Some(i * (self.num_nodes - 1) + offset)
    }

    /// Arc stored in column `col`.
    pub fn arc(&self, col: usize) -> Option<(usize, usize)> {
        if col >= self.len() {
            return None;
        }
        let width = self.num_nodes - 1;
        let i = col / width;
        let r = col % width;
        let j = if r < i { r } else { r + 1 };
        Some((i, j))
    }

    /// All arcs in column order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).filter_map(move |col| self.arc(col))
    }
}

/// The set of arcs a candidate solution uses.
///
/// Rebuilt from the solver's values on every callback; nothing is kept
/// between candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcSelection {
    num_nodes: usize,
    selected: Vec<bool>,
}

impl ArcSelection {
    /// Creates a selection with no arcs.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            selected: vec![false; num_nodes * num_nodes],
        }
    }

    /// Thresholds solver values: an arc is selected iff its value is
    /// strictly above [`SELECTION_THRESHOLD`]. Missing columns count as zero.
    pub fn from_values(index: &ArcIndex, values: &[f64]) -> Self {
        let mut sel = Self::new(index.num_nodes());
        for (col, (i, j)) in index.arcs().enumerate() {
            if values.get(col).is_some_and(|&v| v > SELECTION_THRESHOLD) {
                sel.select(i, j);
            }
        }
        sel
    }

    /// Builds a selection from explicit arcs. Self-loops and arcs touching
    /// unknown nodes are ignored.
    pub fn from_arcs(num_nodes: usize, arcs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut sel = Self::new(num_nodes);
        for (i, j) in arcs {
            sel.select(i, j);
        }
        sel
    }

    /// Marks arc `(i, j)` as used.
    pub fn select(&mut self, i: usize, j: usize) {
        if i != j && i < self.num_nodes && j < self.num_nodes {
            self.selected[i * self.num_nodes + j] = true;
        }
    }

    /// Whether arc `(i, j)` is used.
    pub fn is_selected(&self, i: usize, j: usize) -> bool {
        i < self.num_nodes && j < self.num_nodes && self.selected[i * self.num_nodes + j]
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Selected successors of `i`, ascending.
    pub fn successors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes).filter(move |&j| self.is_selected(i, j))
    }

    /// All selected arcs, row-major.
    pub fn selected_arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_nodes).flat_map(move |i| self.successors(i).map(move |j| (i, j)))
    }

    /// Number of selected arcs.
    pub fn num_selected(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Undirected neighbour lists: `{i, j}` is an edge if `(i, j)` or
    /// `(j, i)` is selected. Lists are ascending and duplicate-free.
    pub fn undirected_adjacency(&self) -> Vec<Vec<usize>> {
        let n = self.num_nodes;
        (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&j| self.is_selected(i, j) || self.is_selected(j, i))
                    .collect()
            })
            .collect()
    }

    /// Converts back to solver values (1.0 selected, 0.0 otherwise) in the
    /// column order of `index`.
    pub fn to_values(&self, index: &ArcIndex) -> Vec<f64> {
        index
            .arcs()
            .map(|(i, j)| if self.is_selected(i, j) { 1.0 } else { 0.0 })
            .collect()
    }
}
