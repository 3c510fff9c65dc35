//! Polyhex shapes and the falling piece.

use crate::hex::HexCell;
use rand::Rng;
use rand::seq::IndexedRandom;

const fn c(q: i32, r: i32) -> HexCell {
    HexCell::new(q, r)
}

const SINGLE: &[HexCell] = &[c(0, 0)];
const DOMINO: &[HexCell] = &[c(0, 0), c(1, 0)];
const STRAIGHT_TROMINO: &[HexCell] = &[c(0, 0), c(1, 0), c(2, 0)];
const BENT_TROMINO: &[HexCell] = &[c(0, 0), c(1, 0), c(0, 1)];
const STRAIGHT_TETRA: &[HexCell] = &[c(0, 0), c(1, 0), c(2, 0), c(3, 0)];
const L_SHAPE: &[HexCell] = &[c(0, 0), c(1, 0), c(0, 1), c(0, 2)];
const S_SHAPE: &[HexCell] = &[c(0, 0), c(1, 0), c(1, 1), c(2, 1)];
const T_SHAPE: &[HexCell] = &[c(0, 0), c(1, 0), c(1, 1), c(2, 0)];
const Z_SHAPE: &[HexCell] = &[c(0, 0), c(1, 0), c(0, 1), c(-1, 1)];
const DIAMOND: &[HexCell] = &[c(0, 0), c(1, 0), c(0, 1), c(1, 1)];

/// Catalog of polyhexes (1–4 cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Single,
    Domino,
    StraightTromino,
    BentTromino,
    StraightTetra,
    L,
    S,
    T,
    Z,
    Diamond,
}

impl ShapeKind {
    pub const ALL: [Self; 10] = [
        Self::Single,
        Self::Domino,
        Self::StraightTromino,
        Self::BentTromino,
        Self::StraightTetra,
        Self::L,
        Self::S,
        Self::T,
        Self::Z,
        Self::Diamond,
    ];

    /// The four small shapes of the early ruleset.
    pub const CLASSIC: [Self; 4] = [
        Self::Single,
        Self::Domino,
        Self::StraightTromino,
        Self::BentTromino,
    ];

    /// Offsets relative to the anchor, `(q, r)`.
    pub fn offsets(&self) -> &'static [HexCell] {
        match self {
            Self::Single => SINGLE,
            Self::Domino => DOMINO,
            Self::StraightTromino => STRAIGHT_TROMINO,
            Self::BentTromino => BENT_TROMINO,
            Self::StraightTetra => STRAIGHT_TETRA,
            Self::L => L_SHAPE,
            Self::S => S_SHAPE,
            Self::T => T_SHAPE,
            Self::Z => Z_SHAPE,
            Self::Diamond => DIAMOND,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Domino => "domino",
            Self::StraightTromino => "straight tromino",
            Self::BentTromino => "bent tromino",
            Self::StraightTetra => "straight tetrahex",
            Self::L => "L",
            Self::S => "S",
            Self::T => "T",
            Self::Z => "Z",
            Self::Diamond => "diamond",
        }
    }
}

/// The piece under player control: an anchor plus the current (possibly rotated) offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: ShapeKind,
    pub anchor: HexCell,
    offsets: Vec<HexCell>,
}

impl Piece {
    pub fn new(kind: ShapeKind, anchor: HexCell) -> Self {
        Self {
            kind,
            anchor,
            offsets: kind.offsets().to_vec(),
        }
    }

    /// Pick a shape uniformly from `catalog` and anchor it at `anchor`.
    /// `None` only when the catalog is empty.
    pub fn spawn<R: Rng + ?Sized>(catalog: &[ShapeKind], anchor: HexCell, rng: &mut R) -> Option<Self> {
        catalog.choose(rng).map(|&kind| Self::new(kind, anchor))
    }

    pub fn offsets(&self) -> &[HexCell] {
        &self.offsets
    }

    pub fn absolute_cells(&self) -> impl Iterator<Item = HexCell> + '_ {
        self.offsets.iter().map(|&o| self.anchor + o)
    }

    pub fn contains(&self, cell: HexCell) -> bool {
        self.absolute_cells().any(|c| c == cell)
    }

    pub fn translated(&self, delta: HexCell) -> Self {
        self.relocated(self.anchor + delta)
    }

    pub fn relocated(&self, anchor: HexCell) -> Self {
        Self {
            kind: self.kind,
            anchor,
            offsets: self.offsets.clone(),
        }
    }

    /// Every offset turned 60° clockwise; the anchor stays put.
    pub fn rotated_cw(&self) -> Self {
        Self {
            kind: self.kind,
            anchor: self.anchor,
            offsets: self.offsets.iter().map(|o| o.rotated_cw()).collect(),
        }
    }
}
