//! Tunable rules and the two rule presets.

use crate::hex::HexCell;
use crate::piece::ShapeKind;
use thiserror::Error;

/// What keyboard commands may do while a piece is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPolicy {
    /// Moves and rotation behave as usual mid-drag.
    #[default]
    AllowAll,
    /// Only rotation is accepted mid-drag.
    AllowRotate,
    /// Every piece command is ignored until the drag ends.
    BlockKeys,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Hexagon radius R.
    pub board_radius: i32,
    /// Minimum run length that clears.
    pub clear_threshold: usize,
    /// Where new pieces appear.
    pub spawn_anchor: HexCell,
    /// Ticks between automatic falls at game start.
    pub start_fall_interval: u32,
    /// The fall interval never drops below this.
    pub min_fall_interval: u32,
    pub fall_decrement_per_lock: u32,
    /// Every this many running ticks the interval drops by `periodic_speedup_decrement`.
    pub periodic_speedup_ticks: u64,
    pub periodic_speedup_decrement: u32,
    /// Fall interval while soft drop is held.
    pub soft_drop_interval: u32,
    /// Ticks the last cleared cells stay highlighted.
    pub clear_anim_ticks: u32,
    pub points_per_cell: u32,
    pub drag_policy: DragPolicy,
    pub catalog: Vec<ShapeKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let radius = 5;
        Self {
            board_radius: radius,
            clear_threshold: 5,
            spawn_anchor: HexCell::new(2, -radius),
            start_fall_interval: 120,
            min_fall_interval: 20,
            fall_decrement_per_lock: 1,
            periodic_speedup_ticks: 1800,
            periodic_speedup_decrement: 10,
            soft_drop_interval: 6,
            clear_anim_ticks: 12,
            points_per_cell: 10,
            drag_policy: DragPolicy::AllowAll,
            catalog: ShapeKind::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    /// The early ruleset: short lines (3), four small shapes, centred spawn.
    pub fn classic() -> Self {
        let base = Self::default();
        Self {
            clear_threshold: 3,
            spawn_anchor: HexCell::new(0, -base.board_radius),
            catalog: ShapeKind::CLASSIC.to_vec(),
            ..base
        }
    }

    /// Change the radius, keeping the spawn anchor on the top row.
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.spawn_anchor = HexCell::new(self.spawn_anchor.q.min(radius), -radius);
        self.board_radius = radius;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_radius < 1 {
            return Err(ConfigError::Radius(self.board_radius));
        }
        if self.clear_threshold < 2 {
            return Err(ConfigError::Threshold(self.clear_threshold));
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.min_fall_interval == 0 || self.soft_drop_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_fall_interval > self.start_fall_interval {
            return Err(ConfigError::FallFloor {
                min: self.min_fall_interval,
                start: self.start_fall_interval,
            });
        }
        if self.spawn_anchor.length() > self.board_radius {
            return Err(ConfigError::SpawnOutside(self.spawn_anchor));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board radius must be at least 1, got {0}")]
    Radius(i32),
    #[error("clear threshold must be at least 2, got {0}")]
    Threshold(usize),
    #[error("shape catalog is empty")]
    EmptyCatalog,
    #[error("fall intervals must be at least one tick")]
    ZeroInterval,
    #[error("minimum fall interval {min} exceeds starting interval {start}")]
    FallFloor { min: u32, start: u32 },
    #[error("spawn anchor {0} lies outside the board")]
    SpawnOutside(HexCell),
}
