//! Fixed-cadence tick driver for native hosts
//!
//! The match itself never owns a timer. A host wraps it in a [`SharedMatch`]
//! so input threads and the driver thread serialize on one lock: a paddle
//! move either lands entirely before a tick or entirely after it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::ValidationError;
use crate::game::{Match, Snapshot};
use crate::report::ScoreReporter;
use crate::sim::{Direction, GameEvent, GamePhase};

/// A match shared between the driver thread and input collaborators
pub struct SharedMatch<R: ScoreReporter> {
    inner: Arc<Mutex<Match<R>>>,
}

impl<R: ScoreReporter> Clone for SharedMatch<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ScoreReporter> SharedMatch<R> {
    pub fn new(game: Match<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Run `f` with exclusive access to the match
    pub fn with<T>(&self, f: impl FnOnce(&mut Match<R>) -> T) -> T {
        let mut guard = self.lock();
        f(&mut guard)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.lock().phase()
    }

    pub fn set_player_name(&self, name: &str) -> Result<(), ValidationError> {
        self.lock().set_player_name(name)
    }

    pub fn start(&self) -> Result<(), ValidationError> {
        self.lock().start()
    }

    pub fn restart(&self) -> Result<(), ValidationError> {
        self.lock().restart()
    }

    pub fn move_paddle(&self, direction: Direction, step: f32) {
        self.lock().move_paddle(direction, step);
    }

    pub fn tick(&self) -> Snapshot {
        self.lock().tick()
    }

    // A panic mid-command cannot leave a half-written state: ticks swap the
    // whole MatchState in one assignment.
    fn lock(&self) -> MutexGuard<'_, Match<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Spawns the driver thread
pub struct TickDriver;

impl TickDriver {
    /// Tick `game` every `interval` until the phase leaves `Playing` or the
    /// handle is stopped. `on_frame` sees every post-tick snapshot.
    pub fn spawn<R, F>(game: SharedMatch<R>, interval: Duration, mut on_frame: F) -> DriverHandle
    where
        R: ScoreReporter + 'static,
        F: FnMut(&Snapshot, &[GameEvent]) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            let mut ticks = 0u64;
            let mut deadline = Instant::now() + interval;

            loop {
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                    deadline += interval;
                } else {
                    // Fell behind: skip missed ticks instead of bursting
                    deadline = now + interval;
                }

                if stop_flag.load(Ordering::Acquire) {
                    break;
                }

                let frame = game.with(|m| {
                    if m.phase() != GamePhase::Playing {
                        return None;
                    }
                    let snapshot = m.tick();
                    Some((snapshot, m.last_events().to_vec()))
                });

                let Some((snapshot, events)) = frame else {
                    break;
                };
                ticks += 1;
                on_frame(&snapshot, &events);

                if snapshot.phase != GamePhase::Playing {
                    break;
                }
            }

            log::info!("Tick driver stopped after {} ticks", ticks);
            ticks
        });

        DriverHandle {
            stop,
            thread: Some(thread),
        }
    }
}

/// Controls a running driver. Dropping the handle stops the driver without waiting.
pub struct DriverHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<u64>>,
}

impl DriverHandle {
    /// Cancel the driver and wait for it. Returns the number of ticks run.
    pub fn stop(mut self) -> u64 {
        self.stop.store(true, Ordering::Release);
        self.wait()
    }

    /// Wait for the driver to end on its own (game over)
    pub fn join(mut self) -> u64 {
        self.wait()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    fn wait(&mut self) -> u64 {
        match self.thread.take().map(JoinHandle::join) {
            Some(Ok(ticks)) => ticks,
            Some(Err(_)) => {
                log::error!("Tick driver thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}
