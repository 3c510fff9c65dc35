//! Game state: board, current piece, score, fall timer and the play/pause/game-over machine.
//!
//! Everything is driven by discrete ticks. Player commands take effect
//! immediately when called; [`GameState::tick`] performs at most one
//! automatic fall (or lock) per call. Nothing advances unless the game is
//! [`GameStatus::Running`], so paused time never counts toward any timer.

use crate::board::Board;
use crate::clear;
use crate::config::{ConfigError, DragPolicy, GameConfig};
use crate::hex::HexCell;
use crate::piece::Piece;
use crate::rules;
use rand::SeedableRng;
use rand::rngs::StdRng;

const LEFT: HexCell = HexCell::new(-1, 0);
const RIGHT: HexCell = HexCell::new(1, 0);
const DOWN: HexCell = HexCell::new(0, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// A locked cell ended up above the top row.
    Overflow,
    /// The freshly spawned piece did not fit.
    SpawnBlocked,
}

/// Result of a downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    Moved,
    Locked,
    /// Nothing happened (not running, not due yet, dragging, or blocked by policy).
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    Move,
    Rotate,
}

#[derive(Debug, Clone)]
struct DragState {
    /// The piece as it was picked up; restored when the drop is refused.
    before: Piece,
    /// Set once the piece has been relocated away from its pick-up anchor.
    moved: bool,
}

#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    rng: StdRng,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    board: Board,
    piece: Option<Piece>,
    score: u32,
    fall_interval: u32,
    soft_drop: bool,
    drag: Option<DragState>,
    /// Running ticks since (re)start.
    ticks: u64,
    last_fall_tick: u64,
    last_speedup_tick: u64,
    last_cleared: Vec<HexCell>,
    clear_anim_remaining: u32,
    clear_serial: u64,
    pieces_locked: u32,
    cells_cleared: u32,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            status: GameStatus::NotStarted,
            game_over_reason: None,
            board: Board::new(config.board_radius),
            piece: None,
            score: 0,
            fall_interval: config.start_fall_interval,
            soft_drop: false,
            drag: None,
            ticks: 0,
            last_fall_tick: 0,
            last_speedup_tick: 0,
            last_cleared: Vec::new(),
            clear_anim_remaining: 0,
            clear_serial: 0,
            pieces_locked: 0,
            cells_cleared: 0,
            config,
        })
    }

    // --- Lifecycle ---

    /// Begin the first game. Ignored once a game has started; use [`restart`](Self::restart).
    pub fn start(&mut self) {
        if self.status == GameStatus::NotStarted {
            self.reset();
        }
    }

    /// Throw the current game away and start fresh, from any state.
    pub fn restart(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.board = Board::new(self.config.board_radius);
        self.piece = None;
        self.score = 0;
        self.fall_interval = self.config.start_fall_interval;
        self.soft_drop = false;
        self.drag = None;
        self.ticks = 0;
        self.last_fall_tick = 0;
        self.last_speedup_tick = 0;
        self.last_cleared.clear();
        self.clear_anim_remaining = 0;
        self.pieces_locked = 0;
        self.cells_cleared = 0;
        self.game_over_reason = None;
        self.status = GameStatus::Running;
        log::info!(
            "game started: radius {}, threshold {}",
            self.config.board_radius,
            self.config.clear_threshold
        );
        self.spawn_next();
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::NotStarted | GameStatus::GameOver => {}
        }
    }

    // --- Player commands ---

    pub fn move_left(&mut self) -> bool {
        self.key_allowed(KeyCommand::Move) && self.try_translate(LEFT)
    }

    pub fn move_right(&mut self) -> bool {
        self.key_allowed(KeyCommand::Move) && self.try_translate(RIGHT)
    }

    /// One step down; locks the piece (and spawns the next) when the step is blocked.
    pub fn move_down(&mut self) -> FallOutcome {
        if !self.key_allowed(KeyCommand::Move) {
            return FallOutcome::Idle;
        }
        self.step_down()
    }

    pub fn rotate_cw(&mut self) -> bool {
        if !self.key_allowed(KeyCommand::Rotate) {
            return false;
        }
        let Some(piece) = &self.piece else {
            return false;
        };
        let rotated = piece.rotated_cw();
        self.commit_if_fits(rotated)
    }

    /// Hold or release soft drop. Releasing is always accepted.
    pub fn set_soft_drop(&mut self, held: bool) {
        if !held || self.status == GameStatus::Running {
            self.soft_drop = held;
        }
    }

    // --- Drag and drop ---

    /// Pick the piece up. Automatic fall stops until the drag ends.
    pub fn begin_drag(&mut self) -> bool {
        if self.status != GameStatus::Running || self.drag.is_some() {
            return false;
        }
        let Some(piece) = &self.piece else {
            return false;
        };
        self.drag = Some(DragState {
            before: piece.clone(),
            moved: false,
        });
        true
    }

    /// Move the dragged piece so its anchor sits at `target`, if it fits there.
    pub fn attempt_relocate(&mut self, target: HexCell) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let (Some(_), Some(piece)) = (&self.drag, &self.piece) else {
            return false;
        };
        let candidate = piece.relocated(target);
        if !self.commit_if_fits(candidate) {
            return false;
        }
        if let Some(drag) = &mut self.drag {
            drag.moved |= target != drag.before.anchor;
        }
        true
    }

    /// Drop the piece. It locks where it is when it was dragged (or moved or
    /// turned by keys mid-drag) and still fits; otherwise the piece picked up
    /// is put back exactly as it was.
    pub fn commit_drag(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let (fits, changed) = self.piece.as_ref().map_or((false, false), |p| {
            (rules::piece_fits(&self.board, p), *p != drag.before)
        });
        if (drag.moved || changed) && fits {
            self.lock_and_spawn();
            true
        } else {
            self.piece = Some(drag.before);
            false
        }
    }

    /// Abandon a drag, putting back the piece that was picked up.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.piece = Some(drag.before);
        }
    }

    // --- Time ---

    /// Advance one tick: automatic fall (or lock), periodic speed-up, clear highlight countdown.
    pub fn tick(&mut self) -> FallOutcome {
        if self.status != GameStatus::Running {
            return FallOutcome::Idle;
        }
        self.ticks += 1;

        let mut outcome = FallOutcome::Idle;
        if self.drag.is_none() && self.ticks - self.last_fall_tick >= u64::from(self.current_fall_interval()) {
            outcome = self.step_down();
            self.last_fall_tick = self.ticks;
        }

        let period = self.config.periodic_speedup_ticks;
        if self.status == GameStatus::Running
            && period > 0
            && self.ticks - self.last_speedup_tick >= period
            && self.fall_interval > self.config.min_fall_interval
        {
            self.fall_interval = self
                .fall_interval
                .saturating_sub(self.config.periodic_speedup_decrement)
                .max(self.config.min_fall_interval);
            self.last_speedup_tick = self.ticks;
            log::debug!("speed-up: fall interval now {} ticks", self.fall_interval);
        }

        if self.clear_anim_remaining > 0 {
            self.clear_anim_remaining -= 1;
            if self.clear_anim_remaining == 0 {
                self.last_cleared.clear();
            }
        }
        outcome
    }

    // --- Internals ---

    fn key_allowed(&self, command: KeyCommand) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        if self.drag.is_none() {
            return true;
        }
        match self.config.drag_policy {
            DragPolicy::AllowAll => true,
            DragPolicy::AllowRotate => command == KeyCommand::Rotate,
            DragPolicy::BlockKeys => false,
        }
    }

    fn try_translate(&mut self, delta: HexCell) -> bool {
        let Some(piece) = &self.piece else {
            return false;
        };
        let moved = piece.translated(delta);
        self.commit_if_fits(moved)
    }

    fn commit_if_fits(&mut self, candidate: Piece) -> bool {
        if rules::piece_fits(&self.board, &candidate) {
            self.piece = Some(candidate);
            true
        } else {
            false
        }
    }

    fn step_down(&mut self) -> FallOutcome {
        if self.status != GameStatus::Running || self.piece.is_none() {
            return FallOutcome::Idle;
        }
        if self.try_translate(DOWN) {
            FallOutcome::Moved
        } else {
            self.lock_and_spawn();
            FallOutcome::Locked
        }
    }

    fn lock_and_spawn(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        self.drag = None;
        let overflowed = rules::lock(&mut self.board, &piece);
        self.pieces_locked += 1;
        log::debug!("locked {} at {}", piece.kind.name(), piece.anchor);

        let report = clear::remove_lines(
            &mut self.board,
            self.config.clear_threshold,
            self.config.points_per_cell,
        );
        if !report.is_empty() {
            self.score = self.score.saturating_add(report.points);
            self.cells_cleared = self
                .cells_cleared
                .saturating_add(u32::try_from(report.cleared.len()).unwrap_or(u32::MAX));
            self.last_cleared = report.cleared.into_iter().collect();
            self.clear_anim_remaining = self.config.clear_anim_ticks;
            self.clear_serial += 1;
        }

        self.fall_interval = self
            .fall_interval
            .saturating_sub(self.config.fall_decrement_per_lock)
            .max(self.config.min_fall_interval);

        if overflowed {
            self.end(GameOverReason::Overflow);
        } else {
            self.spawn_next();
        }
    }

    fn spawn_next(&mut self) {
        self.piece = Piece::spawn(&self.config.catalog, self.config.spawn_anchor, &mut self.rng);
        let fits = self
            .piece
            .as_ref()
            .is_some_and(|p| rules::piece_fits(&self.board, p));
        if !fits && self.status == GameStatus::Running {
            self.end(GameOverReason::SpawnBlocked);
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        self.soft_drop = false;
        self.drag = None;
        log::info!("game over ({:?}), score {}", reason, self.score);
    }

    // --- Read-only view ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn radius(&self) -> i32 {
        self.config.board_radius
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Base fall interval (ignores soft drop).
    pub fn fall_interval(&self) -> u32 {
        self.fall_interval
    }

    /// Interval actually used for the next automatic fall.
    pub fn current_fall_interval(&self) -> u32 {
        if self.soft_drop {
            self.config.soft_drop_interval
        } else {
            self.fall_interval
        }
    }

    pub fn is_soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cells removed by the latest clear, kept while the highlight countdown runs.
    pub fn last_cleared(&self) -> &[HexCell] {
        &self.last_cleared
    }

    pub fn clear_anim_remaining(&self) -> u32 {
        self.clear_anim_remaining
    }

    /// Bumped once per clear that removed cells.
    pub fn clear_serial(&self) -> u64 {
        self.clear_serial
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn cells_cleared(&self) -> u32 {
        self.cells_cleared
    }
}
