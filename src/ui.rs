//! Layout and drawing: menu, honeycomb board, sidebar, pause and game-over popups.
//!
//! Cells sit on a lattice four columns apart with alternate rows shifted by two,
//! so a cell `(q, r)` is centred at column `4q + 2r` and row `2r` relative to the
//! board centre. Treating a terminal position as the point `(col, row·√3)` turns
//! that lattice into a regular pointy-top hex layout of size `4/√3`, which is what
//! [`HexGrid`] hands to the core's pixel math for mouse picking.

use crate::theme::Theme;
use honeyhoard::hex::{self, SQRT_3};
use honeyhoard::{GameOverReason, GameState, GameStatus, HexCell, Point};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

const SIDEBAR_WIDTH: u16 = 26;
/// Columns between neighbouring cell centres on one row.
const CELL_STEP: i32 = 4;

const FILLED_GLYPH: &str = "▐█▌";
const EMPTY_GLYPH: &str = " ⬡ ";

/// Maps board cells to terminal positions and back.
#[derive(Debug, Clone, Copy)]
pub struct HexGrid {
    layout: hex::Layout,
    area: Rect,
}

impl HexGrid {
    /// Grid centred in `area`.
    pub fn centered_in(area: Rect) -> Self {
        let col = f64::from(area.x) + f64::from(area.width / 2);
        let row = f64::from(area.y) + f64::from(area.height / 2);
        Self {
            layout: hex::Layout::new(f64::from(CELL_STEP) / SQRT_3, Point::new(col, row * SQRT_3)),
            area,
        }
    }

    /// Terminal (column, row) of the cell centre.
    pub fn cell_position(&self, cell: HexCell) -> (i32, i32) {
        let p = self.layout.to_pixel(cell);
        (p.x.round() as i32, (p.y / SQRT_3).round() as i32)
    }

    /// Cell under a terminal position.
    pub fn cell_at(&self, column: u16, row: u16) -> HexCell {
        self.layout
            .to_hex(Point::new(f64::from(column), f64::from(row) * SQRT_3))
    }

    pub fn area(&self) -> Rect {
        self.area
    }
}

/// Terminal size (width, height) of a board of the given radius, border included.
pub fn board_size(radius: i32) -> (u16, u16) {
    let r = radius.max(0) as u16;
    (8 * r + 3 + 2, 4 * r + 1 + 2)
}

/// Draw the frame for the current game status. Returns the grid used for the
/// board, or `None` while the menu is shown.
pub fn draw(
    frame: &mut Frame,
    game: &GameState,
    theme: &Theme,
    clear_effect: &mut Option<Effect>,
    clear_effect_time: &mut Option<Instant>,
    now: Instant,
    animate: bool,
    tick_rate: f64,
) -> Option<HexGrid> {
    let area = frame.area();
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, frame.buffer_mut());

    if game.status() == GameStatus::NotStarted {
        draw_menu(frame, game, theme, area);
        return None;
    }

    let grid = draw_game(frame, game, theme, area, animate);
    if animate && game.clear_anim_remaining() > 0 {
        let fade_ms = (f64::from(game.config().clear_anim_ticks) * 1000.0 / tick_rate) as u32;
        apply_clear_effect(
            frame,
            game,
            theme,
            &grid,
            clear_effect,
            clear_effect_time,
            now,
            fade_ms,
        );
    }
    match game.status() {
        GameStatus::Paused => draw_pause_overlay(frame, theme, area),
        GameStatus::GameOver => draw_game_over(frame, game, theme, area),
        GameStatus::NotStarted | GameStatus::Running => {}
    }
    Some(grid)
}

fn popup_rect(area: Rect, w: u16, h: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

fn draw_menu(frame: &mut Frame, game: &GameState, theme: &Theme, area: Rect) {
    let popup = popup_rect(area, 46, 18);
    let config = game.config();
    let title_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let fg = Style::default().fg(theme.text);
    let key = Style::default().fg(theme.filled);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ⬢ ", Style::default().fg(theme.filled)),
            Span::styled("H O N E Y H O A R D", title_style),
            Span::styled(" ⬢ ", Style::default().fg(theme.filled)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Line up {} cells along any axis to clear",
                config.clear_threshold
            ),
            fg,
        )),
        Line::from(Span::styled(
            format!(
                "Comb radius {}  ·  {} shapes",
                config.board_radius,
                config.catalog.len()
            ),
            fg,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("←/→ ", key),
            Span::styled("move   ", fg),
            Span::styled("↑/Space ", key),
            Span::styled("rotate", fg),
        ]),
        Line::from(vec![
            Span::styled("↓ ", key),
            Span::styled("soft drop   ", fg),
            Span::styled("mouse ", key),
            Span::styled("drag & drop", fg),
        ]),
        Line::from(vec![
            Span::styled("P ", key),
            Span::styled("pause   ", fg),
            Span::styled("R ", key),
            Span::styled("restart   ", fg),
            Span::styled("Q ", key),
            Span::styled("quit", fg),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Enter — Start ",
            Style::default()
                .fg(theme.bg)
                .bg(theme.filled)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.stroke).bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}

/// Board on the left, stats on the right, both centred in `area`.
fn draw_game(frame: &mut Frame, game: &GameState, theme: &Theme, area: Rect, animate: bool) -> HexGrid {
    let (bw, bh) = board_size(game.radius());
    let total_w = bw + SIDEBAR_WIDTH;

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh.max(14)),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    let board_outer = Rect {
        height: bh.min(inner[0].height),
        ..inner[0]
    };
    let grid = draw_board(frame, game, theme, board_outer, animate);
    draw_sidebar(frame, game, theme, inner[1]);
    grid
}

fn draw_board(frame: &mut Frame, game: &GameState, theme: &Theme, area: Rect, animate: bool) -> HexGrid {
    let title = if game.is_dragging() {
        " drag "
    } else if game.is_soft_drop() {
        " ↓↓ "
    } else {
        " hoard "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.stroke).bg(theme.bg))
        .title(Span::styled(title, Style::default().fg(theme.accent)));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let grid = HexGrid::centered_in(inner);
    let flashing: HashSet<HexCell> = if animate && game.clear_anim_remaining() > 0 {
        game.last_cleared().iter().copied().collect()
    } else {
        HashSet::new()
    };
    let piece_color = if game.is_dragging() { theme.drag } else { theme.piece };

    let buf = frame.buffer_mut();
    for cell in hex::hexagon(game.radius()) {
        let (glyph, color) = if game.piece().is_some_and(|p| p.contains(cell)) {
            (FILLED_GLYPH, piece_color)
        } else if game.board().is_filled(cell) {
            (FILLED_GLYPH, theme.filled)
        } else if flashing.contains(&cell) {
            (FILLED_GLYPH, theme.flash)
        } else {
            (EMPTY_GLYPH, theme.empty)
        };
        put_glyph(buf, inner, grid.cell_position(cell), glyph, Style::default().fg(color).bg(theme.bg));
    }
    grid
}

/// Write a three-column glyph centred on `centre`, clipped to `clip`.
fn put_glyph(buf: &mut Buffer, clip: Rect, centre: (i32, i32), glyph: &str, style: Style) {
    let (col, row) = centre;
    for (i, ch) in glyph.chars().enumerate() {
        let x = col - 1 + i as i32;
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(row)) else {
            continue;
        };
        if !clip.contains(Position::new(x, y)) {
            continue;
        }
        if let Some(c) = buf.cell_mut((x, y)) {
            c.set_char(ch).set_style(style);
        }
    }
}

/// Buffer positions covered by the given cells.
fn cell_positions(grid: &HexGrid, cells: &[HexCell]) -> HashSet<(u16, u16)> {
    let mut set = HashSet::new();
    for &cell in cells {
        let (col, row) = grid.cell_position(cell);
        for x in col - 1..=col + 1 {
            if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(row)) {
                set.insert((x, y));
            }
        }
    }
    set
}

/// Fade the just-cleared cells back to the empty comb colour.
fn apply_clear_effect(
    frame: &mut Frame,
    game: &GameState,
    theme: &Theme,
    grid: &HexGrid,
    clear_effect: &mut Option<Effect>,
    clear_effect_time: &mut Option<Instant>,
    now: Instant,
    fade_ms: u32,
) {
    let delta = clear_effect_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let tfx_delta = TfxDuration::from_millis(delta.as_millis().min(u128::from(u32::MAX)) as u32);
    *clear_effect_time = Some(now);

    if clear_effect.is_none() {
        let positions = cell_positions(grid, game.last_cleared());
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            positions.contains(&(pos.x, pos.y))
        }));
        let effect = fx::fade_to(theme.empty, theme.bg, (fade_ms.max(1), Interpolation::Linear))
            .with_filter(filter)
            .with_area(grid.area());
        *clear_effect = Some(effect);
    }

    if let Some(effect) = clear_effect {
        frame.render_effect(effect, grid.area(), tfx_delta);
    }
}

fn draw_sidebar(frame: &mut Frame, game: &GameState, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.accent);
    let fg_style = Style::default().fg(theme.text);
    let border_style = Style::default().fg(theme.stroke).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // stats
            Constraint::Length(1),
            Constraint::Length(6), // piece
        ])
        .split(area);

    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value, fg_style),
        ])
    };
    let stats = vec![
        stat("Score:    ", game.score().to_string()),
        stat("Interval: ", format!("{} ticks", game.current_fall_interval())),
        stat("Pieces:   ", game.pieces_locked().to_string()),
        stat("Cleared:  ", game.cells_cleared().to_string()),
        stat("Line:     ", format!("{} cells", game.config().clear_threshold)),
    ];
    Paragraph::new(Text::from(stats))
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .render(chunks[0], frame.buffer_mut());

    let piece_lines = match game.piece() {
        Some(p) => vec![
            stat("Piece:  ", p.kind.name().to_string()),
            stat("Anchor: ", p.anchor.to_string()),
            stat("Cells:  ", p.offsets().len().to_string()),
        ],
        None => vec![Line::from(Span::styled("—", fg_style))],
    };
    Paragraph::new(Text::from(piece_lines))
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .render(chunks[2], frame.buffer_mut());
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = popup_rect(area, 30, 5);
    let lines = vec![
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(theme.bg).bg(theme.filled),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " P — Resume    Q — Quit ",
            Style::default().fg(theme.text),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.stroke).bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}

fn draw_game_over(frame: &mut Frame, game: &GameState, theme: &Theme, area: Rect) {
    let popup = popup_rect(area, 34, 9);
    let reason = match game.game_over_reason() {
        Some(GameOverReason::Overflow) => "The hoard spilled over",
        Some(GameOverReason::SpawnBlocked) => "No room for the next piece",
        None => "",
    };
    let fg = Style::default().fg(theme.text);
    let lines = vec![
        Line::from(Span::styled(
            " Game Over ",
            Style::default()
                .fg(Color::White)
                .bg(theme.alert)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(reason, fg)),
        Line::from(""),
        Line::from(Span::styled(format!(" Score: {} ", game.score()), fg)),
        Line::from(Span::styled(format!(" Pieces: {} ", game.pieces_locked()), fg)),
        Line::from(""),
        Line::from(Span::styled(" R — Restart    Q — Quit ", fg)),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.stroke).bg(theme.bg))
                .title(Span::styled(" Honeyhoard ", Style::default().fg(theme.accent))),
        )
        .render(popup, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> HexGrid {
        HexGrid::centered_in(Rect::new(0, 0, 43, 21))
    }

    #[test]
    fn test_lattice_positions() {
        let g = grid();
        let (c0, r0) = g.cell_position(HexCell::ORIGIN);
        assert_eq!((c0, r0), (21, 10));
        assert_eq!(g.cell_position(HexCell::new(1, 0)), (c0 + 4, r0));
        assert_eq!(g.cell_position(HexCell::new(0, 1)), (c0 + 2, r0 + 2));
        assert_eq!(g.cell_position(HexCell::new(-5, 5)), (c0 - 10, r0 + 10));
    }

    #[test]
    fn test_picking_hits_cell_under_glyph() {
        let g = grid();
        for cell in hex::hexagon(5) {
            let (col, row) = g.cell_position(cell);
            for dx in -1..=1 {
                let picked = g.cell_at((col + dx) as u16, row as u16);
                assert_eq!(picked, cell, "column offset {dx}");
            }
        }
    }

    #[test]
    fn test_board_fits_its_size() {
        let (w, h) = board_size(5);
        let area = Rect::new(0, 0, w - 2, h - 2);
        let g = HexGrid::centered_in(area);
        for cell in hex::hexagon(5) {
            let (col, row) = g.cell_position(cell);
            assert!(col - 1 >= 0 && col + 1 < i32::from(area.width), "{cell}");
            assert!(row >= 0 && row < i32::from(area.height), "{cell}");
        }
    }
}
