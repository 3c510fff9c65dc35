//! Board: the filled cells inside a hexagon of radius R centred on the origin.

use crate::hex::HexCell;
use std::collections::BTreeSet;

/// Filled cells of the honeycomb. Iteration is sorted by `(q, r)`.
///
/// `fill` and `unfill` trust their input; validity decisions go through
/// [`Board::is_within_bounds`] in the placement rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    radius: i32,
    filled: BTreeSet<HexCell>,
}

impl Board {
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            filled: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// True iff `max(|q|, |r|, |s|) <= R`.
    #[inline]
    pub fn is_within_bounds(&self, cell: HexCell) -> bool {
        cell.length() <= self.radius
    }

    #[inline]
    pub fn is_filled(&self, cell: HexCell) -> bool {
        self.filled.contains(&cell)
    }

    pub fn fill(&mut self, cell: HexCell) {
        self.filled.insert(cell);
    }

    pub fn unfill(&mut self, cell: HexCell) {
        self.filled.remove(&cell);
    }

    pub fn all_filled(&self) -> impl Iterator<Item = HexCell> + '_ {
        self.filled.iter().copied()
    }

    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    /// Number of cells inside the hexagon: `3R(R + 1) + 1`.
    pub fn capacity(&self) -> usize {
        let r = self.radius.max(0) as usize;
        3 * r * (r + 1) + 1
    }

    pub fn clear(&mut self) {
        self.filled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_radius_five() {
        let board = Board::new(5);
        assert!(board.is_within_bounds(HexCell::new(0, 0)));
        assert!(board.is_within_bounds(HexCell::new(2, -5)));
        assert!(board.is_within_bounds(HexCell::new(5, -5)));
        assert!(board.is_within_bounds(HexCell::new(-5, 0)));
        // |s| = 6
        assert!(!board.is_within_bounds(HexCell::new(3, 3)));
        assert!(!board.is_within_bounds(HexCell::new(0, -6)));
        assert!(!board.is_within_bounds(HexCell::new(-1, -5)));
    }

    #[test]
    fn test_fill_unfill() {
        let mut board = Board::new(3);
        let c = HexCell::new(1, -1);
        assert!(!board.is_filled(c));
        board.fill(c);
        board.fill(c);
        assert!(board.is_filled(c));
        assert_eq!(board.filled_count(), 1);
        board.unfill(c);
        assert!(!board.is_filled(c));
        assert!(board.is_empty());
    }

    #[test]
    fn test_all_filled_is_sorted() {
        let mut board = Board::new(5);
        for c in [(2, 0), (-1, 3), (0, 0), (-1, -2)] {
            board.fill(c.into());
        }
        let cells: Vec<HexCell> = board.all_filled().collect();
        assert_eq!(
            cells,
            vec![
                HexCell::new(-1, -2),
                HexCell::new(-1, 3),
                HexCell::new(0, 0),
                HexCell::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_capacity_matches_hexagon() {
        for radius in 0..8 {
            let board = Board::new(radius);
            assert_eq!(board.capacity(), crate::hex::hexagon(radius).len());
        }
    }
}
