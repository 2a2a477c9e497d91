//! Score reporter boundary
//!
//! The core hands a finished match's score to an injected reporter exactly
//! once per game over. Reporting is fire-and-forget: the core never observes
//! success or failure, and a failing reporter cannot block a restart.

use std::io::Write;
use std::sync::mpsc::Sender;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Final result of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub player_name: String,
    pub score: u64,
    /// Unix timestamp (ms) of the game over
    pub timestamp_ms: u64,
}

impl ScoreReport {
    /// Stamp a report with the current wall-clock time
    pub fn now(player_name: impl Into<String>, score: u64) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            player_name: player_name.into(),
            score,
            timestamp_ms,
        }
    }
}

/// Receives final scores. Implementations must not panic on failure; log and move on.
pub trait ScoreReporter: Send {
    fn report(&mut self, report: &ScoreReport);
}

impl<F> ScoreReporter for F
where
    F: FnMut(&ScoreReport) + Send,
{
    fn report(&mut self, report: &ScoreReport) {
        self(report)
    }
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ScoreReporter for NullReporter {
    fn report(&mut self, _report: &ScoreReport) {}
}

/// Forwards reports over a channel to whoever persists them
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: Sender<ScoreReport>,
}

impl ChannelReporter {
    pub fn new(tx: Sender<ScoreReport>) -> Self {
        Self { tx }
    }
}

impl ScoreReporter for ChannelReporter {
    fn report(&mut self, report: &ScoreReport) {
        if self.tx.send(report.clone()).is_err() {
            log::warn!(
                "Score report for {} dropped: receiver disconnected",
                report.player_name
            );
        }
    }
}

/// Writes one JSON object per line
#[derive(Debug)]
pub struct JsonLinesReporter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ScoreReporter for JsonLinesReporter<W> {
    fn report(&mut self, report: &ScoreReport) {
        let written = serde_json::to_string(report)
            .map_err(std::io::Error::from)
            .and_then(|json| {
                writeln!(self.out, "{}", json)?;
                self.out.flush()
            });
        match written {
            Ok(()) => log::info!("Score saved ({} pts for {})", report.score, report.player_name),
            Err(e) => log::warn!("Failed to save score: {}", e),
        }
    }
}
