//! App: terminal init, main loop, tick pacing, key and mouse handling.

use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::ui::{self, HexGrid};
use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use honeyhoard::{GameState, GameStatus, HexCell};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Without key-release reporting, soft drop ends this long after the last press or repeat.
const SOFT_DROP_HOLD_MS: u64 = 450;
/// Cap on ticks replayed after a stall so the game never jumps ahead.
const MAX_CATCH_UP_TICKS: u32 = 5;
const FRAME_MS: u64 = 16;

/// Frontend options that do not affect game rules.
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub tick_rate: f64,
    pub animate: bool,
    pub skip_menu: bool,
}

pub struct App {
    game: GameState,
    theme: Theme,
    options: AppOptions,
    tick_interval: Duration,
    last_tick: Instant,
    /// Last soft-drop press or repeat, for terminals that never report releases.
    soft_drop_pressed: Option<Instant>,
    release_events_seen: bool,
    /// Grid from the most recent frame; mouse picking uses it.
    grid: Option<HexGrid>,
    /// Cell under the cursor minus the piece anchor when the drag began.
    grab_offset: HexCell,
    clear_effect: Option<Effect>,
    clear_effect_time: Option<Instant>,
    seen_clear_serial: u64,
}

impl App {
    pub fn new(game: GameState, theme: Theme, options: AppOptions) -> Self {
        let now = Instant::now();
        Self {
            game,
            theme,
            tick_interval: Duration::from_secs_f64(1.0 / options.tick_rate),
            options,
            last_tick: now,
            soft_drop_pressed: None,
            release_events_seen: false,
            grid: None,
            grab_offset: HexCell::ORIGIN,
            clear_effect: None,
            clear_effect_time: None,
            seen_clear_serial: 0,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{
                DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
                PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
            },
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        // Release events are optional; not every terminal supports the protocol.
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );

        let result = ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        if self.options.skip_menu {
            self.game.start();
        }
        loop {
            let now = Instant::now();
            if self.game.clear_serial() != self.seen_clear_serial {
                self.seen_clear_serial = self.game.clear_serial();
                self.clear_effect = None;
                self.clear_effect_time = None;
            }

            let mut grid = None;
            terminal.draw(|f| {
                grid = ui::draw(
                    f,
                    &self.game,
                    &self.theme,
                    &mut self.clear_effect,
                    &mut self.clear_effect_time,
                    now,
                    self.options.animate,
                    self.options.tick_rate,
                );
            })?;
            self.grid = grid;
            if self.clear_effect.as_ref().is_some_and(Effect::done) {
                self.clear_effect = None;
                self.clear_effect_time = None;
            }

            let timeout = Duration::from_millis(FRAME_MS).saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let keep_running = match event::read()? {
                        Event::Key(key) => self.handle_key(key),
                        Event::Mouse(mouse) => {
                            self.handle_mouse(mouse);
                            true
                        }
                        _ => true,
                    };
                    if !keep_running {
                        return Ok(());
                    }
                }
            }

            self.expire_soft_drop();
            self.advance_ticks();
        }
    }

    /// Run as many game ticks as wall-clock time calls for.
    fn advance_ticks(&mut self) {
        if self.game.status() != GameStatus::Running {
            self.last_tick = Instant::now();
            return;
        }
        let mut replayed = 0;
        while self.last_tick.elapsed() >= self.tick_interval {
            self.game.tick();
            self.last_tick += self.tick_interval;
            replayed += 1;
            if replayed >= MAX_CATCH_UP_TICKS {
                self.last_tick = Instant::now();
                break;
            }
        }
    }

    fn expire_soft_drop(&mut self) {
        if self.release_events_seen {
            return;
        }
        let expired = self
            .soft_drop_pressed
            .is_some_and(|t| t.elapsed() >= Duration::from_millis(SOFT_DROP_HOLD_MS));
        if expired {
            self.game.set_soft_drop(false);
            self.soft_drop_pressed = None;
        }
    }

    /// Returns `false` when the player quits.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = key_to_action(key);
        match key.kind {
            KeyEventKind::Release => {
                self.release_events_seen = true;
                if action == Action::SoftDrop {
                    self.game.set_soft_drop(false);
                    self.soft_drop_pressed = None;
                }
                return true;
            }
            KeyEventKind::Repeat => {
                // Held keys repeat moves and keep soft drop alive; everything else fires once.
                if !matches!(
                    action,
                    Action::MoveLeft | Action::MoveRight | Action::RotateCw | Action::SoftDrop
                ) {
                    return true;
                }
            }
            KeyEventKind::Press => {}
        }

        if action == Action::Quit {
            return false;
        }
        match self.game.status() {
            GameStatus::NotStarted => {
                if matches!(action, Action::Start | Action::RotateCw) {
                    self.game.start();
                }
            }
            GameStatus::Running => self.apply_action(action),
            GameStatus::Paused => match action {
                Action::Pause => self.game.toggle_pause(),
                Action::Restart => self.game.restart(),
                _ => {}
            },
            GameStatus::GameOver => {
                if matches!(action, Action::Restart | Action::Start) {
                    self.game.restart();
                }
            }
        }
        true
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => {
                self.game.move_left();
            }
            Action::MoveRight => {
                self.game.move_right();
            }
            Action::RotateCw => {
                self.game.rotate_cw();
            }
            Action::SoftDrop => {
                self.game.set_soft_drop(true);
                self.soft_drop_pressed = Some(Instant::now());
            }
            Action::Pause => {
                self.game.cancel_drag();
                self.game.set_soft_drop(false);
                self.game.toggle_pause();
            }
            Action::Restart => self.game.restart(),
            Action::Start | Action::Quit | Action::None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(grid) = self.grid else {
            return;
        };
        if self.game.status() != GameStatus::Running {
            return;
        }
        let cell = grid.cell_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(anchor) = self
                    .game
                    .piece()
                    .filter(|p| p.contains(cell))
                    .map(|p| p.anchor)
                else {
                    return;
                };
                if self.game.begin_drag() {
                    self.grab_offset = cell - anchor;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.game.is_dragging() => {
                self.game.attempt_relocate(cell - self.grab_offset);
            }
            MouseEventKind::Up(MouseButton::Left) if self.game.is_dragging() => {
                self.game.commit_drag();
            }
            _ => {}
        }
    }
}
