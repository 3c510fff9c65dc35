//! Line clearing: remove every run of filled cells along any of the three
//! axes whose length reaches the threshold, repeating until a scan finds nothing.

use crate::board::Board;
use crate::hex::{AXES, HexCell};
use std::collections::BTreeSet;

/// What one call to [`remove_lines`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Every cell removed, across all passes.
    pub cleared: BTreeSet<HexCell>,
    /// Passes that removed at least one cell.
    pub passes: u32,
    /// Points earned: `points_per_cell` per removed cell, summed over passes.
    pub points: u32,
}

impl ClearReport {
    pub fn is_empty(&self) -> bool {
        self.cleared.is_empty()
    }
}

/// Contiguous filled, in-bounds cells through `start` along one axis (including `start`).
fn run_through(board: &Board, start: HexCell, axis: [HexCell; 2]) -> Vec<HexCell> {
    let mut line = vec![start];
    for step in axis {
        let mut current = start + step;
        while board.is_filled(current) && board.is_within_bounds(current) {
            line.push(current);
            current = current + step;
        }
    }
    line
}

/// One scan: every cell belonging to a run of length `>= threshold`.
pub fn find_lines(board: &Board, threshold: usize) -> BTreeSet<HexCell> {
    let mut to_remove = BTreeSet::new();
    for cell in board.all_filled() {
        for axis in AXES {
            let line = run_through(board, cell, axis);
            if line.len() >= threshold {
                to_remove.extend(line);
            }
        }
    }
    to_remove
}

/// Clear lines until a full scan finds none. There is no gravity: removed
/// cells leave holes.
pub fn remove_lines(board: &mut Board, threshold: usize, points_per_cell: u32) -> ClearReport {
    let mut report = ClearReport::default();
    loop {
        let to_remove = find_lines(board, threshold);
        if to_remove.is_empty() {
            break;
        }
        for &cell in &to_remove {
            board.unfill(cell);
        }
        let n = u32::try_from(to_remove.len()).unwrap_or(u32::MAX);
        report.points = report.points.saturating_add(n.saturating_mul(points_per_cell));
        report.passes += 1;
        log::debug!("clear pass {}: {} cells", report.passes, n);
        report.cleared.extend(to_remove);
    }
    report
}
