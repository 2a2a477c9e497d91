//! End-to-end match scenarios through the public API

use std::sync::mpsc;

use brickfall::sim::{Ball, BrickGrid, GameEvent, GamePhase, MatchState};
use brickfall::{ArenaConfig, ChannelReporter, Match, NullReporter, Snapshot, ValidationError};
use glam::Vec2;

fn resume_playing<R: brickfall::ScoreReporter>(pos: Vec2, vel: Vec2, reporter: R) -> Match<R> {
    let config = ArenaConfig::default();
    let mut state = MatchState::new(&config);
    state.phase = GamePhase::Playing;
    state.player_name = "ada".to_string();
    state.ball = Ball { pos, vel };
    Match::resume(config, state, reporter).unwrap()
}

#[test]
fn reference_grid_layout() {
    let grid = BrickGrid::generate(&ArenaConfig::default());
    assert_eq!(grid.len(), 35);
    assert_eq!(grid.alive_count(), 35);
    let first = grid.get(0).unwrap();
    assert_eq!((first.x, first.y, first.width, first.height), (0.0, 5.0, 12.0, 4.0));
}

#[test]
fn paddle_catches_falling_ball() {
    let mut game = resume_playing(Vec2::new(50.0, 88.0), Vec2::new(3.0, 3.0), NullReporter);
    let snap = game.tick();
    assert_eq!(snap.ball.vel.y, -3.0);
    assert_eq!(snap.phase, GamePhase::Playing);
}

#[test]
fn right_wall_bounce() {
    let mut game = resume_playing(Vec2::new(98.0, 50.0), Vec2::new(3.0, 0.0), NullReporter);
    let snap = game.tick();
    assert_eq!(snap.ball.vel.x, -3.0);
    assert_eq!(game.last_events(), &[GameEvent::WallBounce]);
}

#[test]
fn missed_ball_reports_score_once() {
    let (tx, rx) = mpsc::channel();
    let mut game = resume_playing(
        Vec2::new(50.0, 32.0),
        Vec2::new(3.0, -3.0),
        ChannelReporter::new(tx),
    );

    // Hit a brick on the way up, then let the ball drop past the paddle
    game.tick();
    assert_eq!(game.score(), 10);
    let mut state = game.state().clone();
    state.ball = Ball {
        pos: Vec2::new(10.0, 97.0),
        vel: Vec2::new(3.0, 3.0),
    };
    let mut game = Match::resume(game.config().clone(), state, game.into_reporter()).unwrap();

    let snap = game.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    game.tick();

    let reports: Vec<_> = rx.try_iter().collect();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].player_name, "ada");
    assert_eq!(reports[0].score, 10);
}

#[test]
fn lifecycle_from_name_to_restart() {
    let mut game = Match::new(ArenaConfig::default(), NullReporter).unwrap();
    assert_eq!(game.start(), Err(ValidationError::EmptyPlayerName));

    game.set_player_name("grace").unwrap();
    game.start().unwrap();
    let mut last = game.snapshot();
    for _ in 0..30 {
        let snap = game.tick();
        assert!(snap.score >= last.score);
        assert_eq!(snap.score, 10 * (35 - snap.bricks.len()) as u64);
        last = snap;
    }
    assert_eq!(last.tick, 30);
    assert_eq!(
        game.restart(),
        Err(ValidationError::InvalidPhase {
            command: "restart",
            phase: GamePhase::Playing,
        })
    );
}

#[test]
fn snapshot_serializes_for_renderers() {
    let game = Match::new(ArenaConfig::default(), NullReporter).unwrap();
    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game.snapshot());
    assert_eq!(back.bricks.len(), 35);
}

#[test]
fn demo_config_loads() {
    let config = ArenaConfig::from_json(include_str!("../demos/fast_paddle.json")).unwrap();
    assert_eq!(config.paddle_step, 30.0);
    assert!(config.end_on_clear);
}
