//! Reconciliation of the local board against the remote collection:
//! fetch-merge, outbound push, and the failed-push retry cycle.

use anyhow::{Context, Result};
use time::format_description::well_known::Rfc3339;

use crate::model::{FailedSyncRecord, Quote};
use crate::remote::RemoteClient;
use crate::store::QuoteStore;

/// Decision for one matched local/candidate pair. The default policy is
/// last-write-wins with server priority; swapping the resolver changes the
/// policy without touching fetch or push mechanics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictResolution {
    KeepLocal,
    TakeServer,
}

pub type ConflictResolver = fn(local: &Quote, candidate: &Quote) -> ConflictResolution;

pub fn server_wins(_local: &Quote, _candidate: &Quote) -> ConflictResolution {
    ConflictResolution::TakeServer
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub added: usize,
    pub resolved: usize,
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.resolved > 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushOutcome {
    pub pushed: usize,
    pub queued: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryOutcome {
    pub succeeded: usize,
    pub remaining: usize,
}

pub struct SyncEngine {
    store: QuoteStore,
    client: RemoteClient,
    resolver: ConflictResolver,
}

impl SyncEngine {
    pub fn new(store: QuoteStore, client: RemoteClient) -> Self {
        Self::with_resolver(store, client, server_wins)
    }

    pub fn with_resolver(store: QuoteStore, client: RemoteClient, resolver: ConflictResolver) -> Self {
        Self {
            store,
            client,
            resolver,
        }
    }

    /// One fetch-merge pass: read a bounded page, map posts into candidate
    /// quotes, merge them into the local sequence, persist when anything
    /// changed.
    pub fn run_fetch_cycle(&self) -> Result<MergeOutcome> {
        let limit = self.client.remote().page_limit;
        let posts = self.client.fetch_posts(limit)?;
        let candidates: Vec<Quote> = posts.into_iter().map(|p| p.into_quote()).collect();

        let mut quotes = self.store.load_quotes()?;
        let outcome = merge_candidates(&mut quotes, candidates, self.resolver);
        if outcome.changed() {
            self.store.save_quotes(&quotes)?;
        }
        Ok(outcome)
    }

    /// One push pass over the given quotes. A failed push queues one
    /// FailedSyncRecord with `attempt = 1` and is not retried inline.
    pub fn run_push_cycle(&self, quotes: &[Quote]) -> Result<PushOutcome> {
        let mut outcome = PushOutcome::default();
        for quote in quotes {
            match self.client.push_quote(quote, correlation_id()) {
                Ok(()) => outcome.pushed += 1,
                Err(_) => {
                    self.store.push_failed_sync(FailedSyncRecord {
                        quote: quote.clone(),
                        timestamp: now_rfc3339()?,
                        attempt: 1,
                    })?;
                    outcome.queued += 1;
                }
            }
        }
        Ok(outcome)
    }

    /// All local-origin quotes, for the periodic bulk push.
    pub fn pushable_quotes(&self) -> Result<Vec<Quote>> {
        let quotes = self.store.load_quotes()?;
        Ok(quotes.into_iter().filter(|q| !q.is_server_origin()).collect())
    }

    /// One pass over the failed-push queue: a successful re-attempt removes
    /// the record, a failure keeps it with the attempt counter bumped.
    pub fn run_retry_cycle(&self) -> Result<RetryOutcome> {
        let records = self.store.read_failed_syncs()?;
        if records.is_empty() {
            return Ok(RetryOutcome::default());
        }

        let mut outcome = RetryOutcome::default();
        let mut kept = Vec::new();
        for mut record in records {
            match self.client.push_quote(&record.quote, correlation_id()) {
                Ok(()) => outcome.succeeded += 1,
                Err(_) => {
                    record.attempt += 1;
                    kept.push(record);
                }
            }
        }
        outcome.remaining = kept.len();
        self.store.write_failed_syncs(&kept)?;
        Ok(outcome)
    }
}

/// Merge decision per candidate, evaluated against the full local sequence:
/// no match by text or server id appends the candidate; a match against a
/// non-server local quote with differing text is a conflict handed to the
/// resolver; anything else is already present and ignored.
pub fn merge_candidates(
    quotes: &mut Vec<Quote>,
    candidates: Vec<Quote>,
    resolver: ConflictResolver,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for candidate in candidates {
        match quotes.iter().position(|q| q.matches(&candidate)) {
            None => {
                quotes.push(candidate);
                outcome.added += 1;
            }
            Some(idx) => {
                let local = &quotes[idx];
                let conflicted = !local.is_server_origin() && local.text != candidate.text;
                if conflicted && resolver(local, &candidate) == ConflictResolution::TakeServer {
                    let mut winner = candidate;
                    winner.resolved = true;
                    quotes[idx] = winner;
                    outcome.resolved += 1;
                }
            }
        }
    }
    outcome
}

fn correlation_id() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

fn now_rfc3339() -> Result<String> {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format timestamp")
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
