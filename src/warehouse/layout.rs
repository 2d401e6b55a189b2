//! Sample warehouse: 28×28 floor, three shelf columns, fourteen pick rows.

use super::{Cell, Grid};

/// Start and end point of the sample pick walk.
pub const SAMPLE_START: Cell = (0, 5);

/// Rows occupied by shelving in the sample layout.
const SHELF_ROWS: [(usize, usize); 8] = [
    (0, 1),
    (3, 5),
    (7, 9),
    (11, 13),
    (15, 17),
    (19, 21),
    (23, 25),
    (27, 28),
];

/// Column spans of the three shelf banks.
const SHELF_COLS: [(usize, usize); 3] = [(1, 8), (10, 17), (19, 26)];

/// Pick columns per row.
const SAMPLE_PICKS: [(usize, &[usize]); 14] = [
    (0, &[5, 14, 20, 24]),
    (3, &[11, 14, 21, 23]),
    (4, &[2, 5]),
    (7, &[2]),
    (8, &[2, 6, 11, 15, 20, 24]),
    (11, &[4, 14, 21]),
    (12, &[2, 6, 12, 14]),
    (15, &[11, 13, 15, 22]),
    (16, &[3, 6, 20, 22, 25]),
    (19, &[5]),
    (20, &[5, 13, 15, 20, 23]),
    (23, &[3, 5, 15, 20, 24]),
    (24, &[2, 11, 14]),
    (27, &[3, 7, 11, 15, 21]),
];

/// The sample warehouse floor.
pub fn sample_warehouse() -> Grid {
    let mut grid = Grid::new(28, 28);
    for &(r0, r1) in &SHELF_ROWS {
        for &(c0, c1) in &SHELF_COLS {
            grid.add_shelf(r0..r1, c0..c1);
        }
    }
    grid
}

/// Pick locations of the sample order, row by row.
pub fn sample_picks() -> Vec<Cell> {
    SAMPLE_PICKS
        .iter()
        .flat_map(|&(r, cols)| cols.iter().map(move |&c| (r, c)))
        .collect()
}
