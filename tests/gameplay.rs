//! Drives whole games through the public command API.

use honeyhoard::{
    DragPolicy, FallOutcome, GameConfig, GameOverReason, GameState, GameStatus, HexCell, ShapeKind,
    rules,
};
use proptest::prelude::*;

fn singles() -> GameConfig {
    GameConfig {
        catalog: vec![ShapeKind::Single],
        ..GameConfig::default()
    }
}

fn started(config: GameConfig, seed: u64) -> GameState {
    let mut game = GameState::new(config, seed).expect("valid config");
    game.start();
    game
}

/// Drag the current piece to `target` and drop it there.
fn drop_at(game: &mut GameState, target: HexCell) {
    let origin = game.piece().expect("piece").anchor;
    assert!(game.begin_drag());
    if target == origin {
        // A drop only counts once the piece has actually moved.
        let detour = [HexCell::new(0, 0), HexCell::new(1, 0)]
            .into_iter()
            .find(|&c| c != origin)
            .expect("detour");
        assert!(game.attempt_relocate(detour));
    }
    assert!(game.attempt_relocate(target), "cannot relocate to {target}");
    assert!(game.commit_drag());
}

#[test]
fn five_in_a_row_clears_and_scores() {
    let mut game = started(singles(), 7);
    for q in -2..=1 {
        drop_at(&mut game, HexCell::new(q, 0));
    }
    assert_eq!(game.board().filled_count(), 4);
    assert_eq!(game.score(), 0);

    drop_at(&mut game, HexCell::new(2, 0));
    assert_eq!(game.score(), 50);
    assert!(game.board().is_empty());
    assert_eq!(game.last_cleared().len(), 5);
    assert_eq!(game.clear_serial(), 1);
}

#[test]
fn gap_prevents_clear() {
    let mut game = started(singles(), 7);
    for q in [-3, -2, 0, 1, 2, 3] {
        drop_at(&mut game, HexCell::new(q, 0));
    }
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().filled_count(), 6);
}

#[test]
fn diagonal_axis_clears() {
    let mut game = started(singles(), 3);
    for i in -2..=2 {
        drop_at(&mut game, HexCell::new(i, -i));
    }
    assert_eq!(game.score(), 50);
    assert!(game.board().is_empty());
}

#[test]
fn shared_cell_counts_once() {
    let mut game = started(singles(), 3);
    for q in [-2, -1, 1, 2] {
        drop_at(&mut game, HexCell::new(q, 0));
    }
    for r in [-2, -1, 1, 2] {
        drop_at(&mut game, HexCell::new(0, r));
    }
    assert_eq!(game.score(), 0);
    drop_at(&mut game, HexCell::ORIGIN);
    assert_eq!(game.score(), 90);
    assert_eq!(game.cells_cleared(), 9);
}

#[test]
fn rotation_blocked_by_wall_leaves_piece() {
    let config = GameConfig {
        catalog: vec![ShapeKind::Domino],
        ..GameConfig::default()
    };
    let mut game = started(config, 1);
    while game.move_right() {}
    let before = game.piece().cloned();
    assert!(!game.rotate_cw());
    assert_eq!(game.piece().cloned(), before);
}

#[test]
fn filled_spawn_point_ends_game() {
    let mut game = started(singles(), 11);
    let spawn = game.config().spawn_anchor;
    drop_at(&mut game, spawn);
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.game_over_reason(), Some(GameOverReason::SpawnBlocked));
    assert_eq!(game.board().filled_count(), 1);

    assert!(!game.move_left());
    assert_eq!(game.tick(), FallOutcome::Idle);
    game.restart();
    assert_eq!(game.status(), GameStatus::Running);
    assert!(game.board().is_empty());
}

#[test]
fn fall_interval_speeds_up_per_lock() {
    let mut game = started(singles(), 5);
    let targets = [(-5, 5), (-3, 5), (-1, 5), (-4, 3), (1, 2)];
    for (n, &(q, r)) in targets.iter().enumerate() {
        drop_at(&mut game, HexCell::new(q, r));
        assert_eq!(game.fall_interval(), 120 - (n as u32 + 1));
    }
    assert_eq!(game.pieces_locked(), 5);
}

#[test]
fn piece_falls_to_floor_and_locks() {
    let mut game = started(singles(), 5);
    let anchor = game.piece().expect("piece").anchor;
    let mut locked = false;
    for _ in 0..20 * 120 {
        if game.tick() == FallOutcome::Locked {
            locked = true;
            break;
        }
    }
    assert!(locked);
    // Column q = 2 bottoms out at r = 3.
    assert!(game.board().is_filled(HexCell::new(anchor.q, 3)));
}

#[test]
fn paused_time_does_not_count() {
    let mut game = started(singles(), 5);
    for _ in 0..60 {
        game.tick();
    }
    game.pause();
    for _ in 0..10_000 {
        game.tick();
    }
    game.resume();
    assert_eq!(game.ticks(), 60);
    assert_eq!(game.piece().expect("piece").anchor, game.config().spawn_anchor);
}

#[test]
fn block_keys_policy_during_drag() {
    let config = GameConfig {
        drag_policy: DragPolicy::BlockKeys,
        ..singles()
    };
    let mut game = started(config, 5);
    assert!(game.begin_drag());
    assert!(!game.move_right());
    game.cancel_drag();
    assert!(game.move_right());
}

#[derive(Debug, Clone)]
enum Op {
    Left,
    Right,
    Down,
    Rotate,
    Tick(u8),
    SoftDrop(bool),
    Drag(i8, i8),
    Grab,
    DragTo(i8, i8),
    Release,
    Pause,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Left),
        1 => Just(Op::Right),
        4 => Just(Op::Down),
        1 => Just(Op::Rotate),
        2 => (1u8..=200).prop_map(Op::Tick),
        1 => any::<bool>().prop_map(Op::SoftDrop),
        1 => (-6i8..=6, -6i8..=6).prop_map(|(q, r)| Op::Drag(q, r)),
        1 => Just(Op::Grab),
        1 => (-6i8..=6, -6i8..=6).prop_map(|(q, r)| Op::DragTo(q, r)),
        1 => Just(Op::Release),
        1 => Just(Op::Pause),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_keeps_invariants(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..300)) {
        let mut game = started(GameConfig::default(), seed);
        let config = game.config().clone();
        for op in ops {
            match op {
                Op::Left => { game.move_left(); }
                Op::Right => { game.move_right(); }
                Op::Down => { game.move_down(); }
                Op::Rotate => { game.rotate_cw(); }
                Op::Tick(n) => for _ in 0..n { game.tick(); },
                Op::SoftDrop(held) => game.set_soft_drop(held),
                Op::Drag(q, r) => {
                    if game.begin_drag() {
                        game.attempt_relocate(HexCell::new(i32::from(q), i32::from(r)));
                        game.commit_drag();
                    }
                }
                Op::Grab => { game.begin_drag(); }
                Op::DragTo(q, r) => { game.attempt_relocate(HexCell::new(i32::from(q), i32::from(r))); }
                Op::Release => { game.commit_drag(); }
                Op::Pause => game.toggle_pause(),
            }

            for cell in game.board().all_filled() {
                prop_assert!(game.board().is_within_bounds(cell), "{cell} out of bounds");
            }
            if game.status() != GameStatus::GameOver {
                let piece = game.piece().expect("live piece");
                prop_assert!(rules::piece_fits(game.board(), piece));
            }
            prop_assert_eq!(game.score() % 10, 0);
            prop_assert!(game.fall_interval() >= config.min_fall_interval);
            prop_assert!(game.fall_interval() <= config.start_fall_interval);
            if game.status() == GameStatus::GameOver {
                prop_assert!(!game.is_dragging());
            }
        }
    }
}
