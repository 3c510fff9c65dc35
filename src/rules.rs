//! Placement validity and locking.

use crate::board::Board;
use crate::hex::HexCell;
use crate::piece::Piece;

/// True iff every cell is inside the hexagon and not yet filled.
pub fn can_place<I>(board: &Board, cells: I) -> bool
where
    I: IntoIterator<Item = HexCell>,
{
    cells
        .into_iter()
        .all(|c| board.is_within_bounds(c) && !board.is_filled(c))
}

/// Shorthand for [`can_place`] over a piece's absolute cells.
#[inline]
pub fn piece_fits(board: &Board, piece: &Piece) -> bool {
    can_place(board, piece.absolute_cells())
}

/// Merge the piece into the board. Returns `true` when any locked cell sits
/// above the top row (`r < -R`), i.e. the stack overflowed.
pub fn lock(board: &mut Board, piece: &Piece) -> bool {
    let top = -board.radius();
    let mut overflowed = false;
    for cell in piece.absolute_cells() {
        board.fill(cell);
        if cell.r < top {
            overflowed = true;
        }
    }
    overflowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ShapeKind;

    #[test]
    fn test_can_place_empty_board() {
        let board = Board::new(5);
        let piece = Piece::new(ShapeKind::StraightTetra, HexCell::new(-2, 0));
        assert!(piece_fits(&board, &piece));
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let board = Board::new(5);
        // Along the top row the tromino ends at q = 5; the tetrahex pokes out.
        assert!(piece_fits(&board, &Piece::new(ShapeKind::StraightTromino, HexCell::new(3, -5))));
        assert!(!piece_fits(&board, &Piece::new(ShapeKind::StraightTetra, HexCell::new(3, -5))));
        assert!(!can_place(&board, [HexCell::new(0, 6)]));
    }

    #[test]
    fn test_can_place_rejects_filled() {
        let mut board = Board::new(5);
        board.fill(HexCell::new(1, 0));
        assert!(!piece_fits(&board, &Piece::new(ShapeKind::Domino, HexCell::new(0, 0))));
        assert!(piece_fits(&board, &Piece::new(ShapeKind::Domino, HexCell::new(2, 0))));
    }

    #[test]
    fn test_can_place_empty_cell_list() {
        let board = Board::new(1);
        assert!(can_place(&board, std::iter::empty()));
    }

    #[test]
    fn test_lock_fills_cells() {
        let mut board = Board::new(5);
        let piece = Piece::new(ShapeKind::Diamond, HexCell::new(0, 0));
        let overflowed = lock(&mut board, &piece);
        assert!(!overflowed);
        assert_eq!(board.filled_count(), 4);
        for c in piece.absolute_cells() {
            assert!(board.is_filled(c));
        }
    }

    #[test]
    fn test_lock_reports_overflow_above_top_row() {
        let mut board = Board::new(5);
        let piece = Piece::new(ShapeKind::Domino, HexCell::new(3, -6));
        assert!(lock(&mut board, &piece));
    }
}
