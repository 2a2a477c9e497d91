//! Brickfall demo entry point
//!
//! Runs one headless match with an autopilot standing in for the input
//! collaborator, and writes the final score as a JSON line on stdout.
//!
//! Usage: `brickfall [config.json] [player-name]`

use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use brickfall::sim::{Direction, GameEvent, GamePhase};
use brickfall::{
    ArenaConfig, ChannelReporter, JsonLinesReporter, Match, ScoreReporter, SharedMatch, Snapshot,
    TickDriver,
};

/// Give up on matches the autopilot keeps alive forever
const MAX_DEMO_DURATION: Duration = Duration::from_secs(120);

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brickfall (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ArenaConfig {
            end_on_clear: true,
            ..Default::default()
        },
    };
    let player = args.next().unwrap_or_else(|| "autopilot".to_string());

    // Stdout writes happen off the tick thread, never under the match lock
    let (tx, rx) = mpsc::channel();
    let writer = thread::spawn(move || {
        let mut out = JsonLinesReporter::new(std::io::stdout());
        for report in rx {
            out.report(&report);
        }
    });

    let game = match Match::new(config.clone(), ChannelReporter::new(tx)) {
        Ok(game) => SharedMatch::new(game),
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = game.set_player_name(&player).and_then(|_| game.start()) {
        log::error!("Cannot start match: {}", e);
        return ExitCode::FAILURE;
    }

    let driver = TickDriver::spawn(game.clone(), config.tick_interval(), |snap, events| {
        for event in events {
            if let GameEvent::BrickDestroyed { index, .. } = event {
                log::debug!("tick {}: brick {} down, score {}", snap.tick, index, snap.score);
            }
        }
    });

    // Input collaborator: steer the paddle under the ball
    let started = Instant::now();
    while !driver.is_finished() && started.elapsed() < MAX_DEMO_DURATION {
        let snap = game.snapshot();
        if let Some(direction) = autopilot(&snap, config.paddle_step) {
            game.move_paddle(direction, config.paddle_step);
        }
        thread::sleep(config.tick_interval());
    }

    let ticks = driver.stop();
    let snap = game.snapshot();
    log::info!(
        "Finished after {} ticks: {:?}, score {}, {} bricks left",
        ticks,
        snap.phase,
        snap.score,
        snap.bricks.len()
    );

    if snap.phase != GamePhase::GameOver {
        log::warn!("Match did not finish within {:?}", MAX_DEMO_DURATION);
    }

    // Last sender goes with the match; the writer drains and exits
    drop(game);
    if writer.join().is_err() {
        log::error!("Score writer panicked");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn load_config(path: &str) -> Result<ArenaConfig, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path, e))?;
    ArenaConfig::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

/// Move toward the ball's center unless already within one step of it
fn autopilot(snap: &Snapshot, step: f32) -> Option<Direction> {
    let ball_center = snap.ball.pos.x + snap.ball_size / 2.0;
    let paddle_center = snap.paddle.x + snap.paddle.width / 2.0;
    let offset = ball_center - paddle_center;

    if offset.abs() < step {
        None
    } else if offset < 0.0 {
        Some(Direction::Left)
    } else {
        Some(Direction::Right)
    }
}
