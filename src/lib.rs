//! Honeyhoard: a falling-block puzzle on a hexagonal honeycomb.
//!
//! Pieces fall from the top of a hexagon-shaped board of axial cells. Any
//! straight run of filled cells along one of the three hex axes that reaches
//! the clear threshold is removed and scored. The game core is pure and
//! tick-driven; the terminal front end lives in the binary.

pub mod board;
pub mod clear;
pub mod config;
pub mod game;
pub mod hex;
pub mod piece;
pub mod rules;

pub use board::Board;
pub use clear::ClearReport;
pub use config::{ConfigError, DragPolicy, GameConfig};
pub use game::{FallOutcome, GameOverReason, GameState, GameStatus};
pub use hex::{HexCell, Layout, Point};
pub use piece::{Piece, ShapeKind};
