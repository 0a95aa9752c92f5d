use std::time::{Duration, Instant};

use anyhow::Result;

use crate::board::QuoteBoard;
use crate::present::Presenter;
use crate::sync::SyncEngine;

/// Cooperative timer loop: a fetch-merge cycle every interval and a retry
/// cycle every second interval. Cycle failures are reported and skipped;
/// nothing here is fatal to the process.
pub fn run(
    board: &QuoteBoard,
    engine: &SyncEngine,
    presenter: &dyn Presenter,
    interval: Duration,
) -> Result<()> {
    let mut next_fetch = Instant::now();
    let mut next_retry = Instant::now() + interval * 2;

    loop {
        let now = Instant::now();

        if now >= next_fetch {
            next_fetch = now + interval;
            match engine.run_fetch_cycle() {
                Ok(outcome) if outcome.changed() => {
                    presenter.notify(&format!(
                        "Synced with server: {} new, {} conflicts resolved.",
                        outcome.added, outcome.resolved
                    ));
                    board.refresh_saved(presenter)?;
                }
                Ok(_) => {}
                Err(err) => presenter.notify(&format!("Sync failed: {:#}", err)),
            }
        }

        if now >= next_retry {
            next_retry = now + interval * 2;
            match engine.run_retry_cycle() {
                Ok(outcome) if outcome.succeeded > 0 || outcome.remaining > 0 => {
                    presenter.notify(&format!(
                        "Retried failed pushes: {} sent, {} still queued.",
                        outcome.succeeded, outcome.remaining
                    ));
                }
                Ok(_) => {}
                Err(err) => presenter.notify(&format!("Retry cycle failed: {:#}", err)),
            }
        }

        let wake = next_fetch.min(next_retry);
        std::thread::sleep(wake.saturating_duration_since(Instant::now()).min(interval));
    }
}
