//! The resolution sweep: the background loop that turns waiting calls into
//! terminal outcomes.
//!
//! Each tick fetches every waiting record, and for each one independently:
//! draws a weighted outcome, classifies it, projects the notification
//! payload, attempts one webhook delivery, and persists the terminal state
//! only when delivery was confirmed. A failed delivery leaves the record
//! waiting; the next tick runs the whole pipeline again with a fresh draw
//! (by contract — caching the previous draw would skew the observed
//! distribution under repeated failures).
//!
//! Ticks are serialized within one process: the next tick does not start
//! until the previous sweep finished. Two processes sweeping the same store
//! can still both pick up the same waiting record and double-deliver; there
//! is no per-record lock.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::call::{CallKind, PendingCall};
use crate::engine::classify::classify;
use crate::engine::selector::{RandomSource, select_outcome};
use crate::error::BlastError;
use crate::notify::{NotificationPayload, Notifier};
use crate::store::{CallStore, OutcomeSource};

/// How a single record fared within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Notification delivered and terminal state persisted.
    Resolved,
    /// Dispatch failed; the record stays waiting and is retried next tick.
    DeliveryFailed,
    /// No usable outcome distribution; the record is skipped this tick.
    Skipped,
    /// Delivered but the write failed. The record stays waiting, so the
    /// webhook may fire again next tick (at-least-once delivery).
    PersistFailed,
}

/// Tally of one sweep tick, for logs and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub fetched: usize,
    pub resolved: usize,
    pub delivery_failed: usize,
    pub skipped: usize,
    pub persist_failed: usize,
}

/// Orchestrates selection, classification, dispatch and persistence for all
/// waiting calls, one concurrent task per record.
pub struct Sweeper<S, O, N, R> {
    core: Arc<SweepCore<S, O, N, R>>,
}

// The collaborators live behind one Arc so per-record tasks can be spawned.
struct SweepCore<S, O, N, R> {
    store: S,
    outcomes: O,
    notifier: N,
    rng: R,
}

impl<S, O, N, R> Clone for Sweeper<S, O, N, R> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<S, O, N, R> Sweeper<S, O, N, R>
where
    S: CallStore + 'static,
    O: OutcomeSource + 'static,
    N: Notifier + 'static,
    R: RandomSource + 'static,
{
    pub fn new(store: S, outcomes: O, notifier: N, rng: R) -> Self {
        Self {
            core: Arc::new(SweepCore {
                store,
                outcomes,
                notifier,
                rng,
            }),
        }
    }

    /// Run the sweep forever at the given period. The first tick fires
    /// immediately; a tick that runs long delays the next one rather than
    /// stacking up.
    pub async fn run(&self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.sweep_once().await {
                Ok(report) if report.fetched == 0 => {
                    tracing::debug!("sweep tick: nothing waiting");
                }
                Ok(report) => {
                    tracing::info!(
                        fetched = report.fetched,
                        resolved = report.resolved,
                        delivery_failed = report.delivery_failed,
                        skipped = report.skipped,
                        persist_failed = report.persist_failed,
                        "sweep tick complete"
                    );
                }
                Err(err) => {
                    // Nothing was mutated; the next tick starts fresh.
                    tracing::error!(error = %err, "sweep tick aborted");
                }
            }
        }
    }

    /// One tick: fetch all waiting records across every collection and
    /// resolve them concurrently. A fetch failure aborts the whole tick
    /// before anything is mutated; per-record failures are isolated and
    /// tallied in the report.
    pub async fn sweep_once(&self) -> Result<SweepReport, BlastError> {
        let mut waiting = Vec::new();
        for kind in CallKind::ALL {
            waiting.extend(self.core.store.fetch_waiting(kind).await?);
        }

        let mut report = SweepReport {
            fetched: waiting.len(),
            ..SweepReport::default()
        };

        let mut tasks = JoinSet::new();
        for call in waiting {
            let core = Arc::clone(&self.core);
            tasks.spawn(async move { core.resolve_call(call).await });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Resolution::Resolved) => report.resolved += 1,
                Ok(Resolution::DeliveryFailed) => report.delivery_failed += 1,
                Ok(Resolution::Skipped) => report.skipped += 1,
                Ok(Resolution::PersistFailed) => report.persist_failed += 1,
                Err(err) => tracing::error!(error = %err, "resolution task panicked"),
            }
        }

        Ok(report)
    }
}

impl<S, O, N, R> SweepCore<S, O, N, R>
where
    S: CallStore,
    O: OutcomeSource,
    N: Notifier,
    R: RandomSource,
{
    /// Selection → classification → payload → dispatch → conditional persist
    /// for one record. The distribution is read fresh here so configuration
    /// changes apply to the very next resolution.
    async fn resolve_call(&self, call: PendingCall) -> Resolution {
        let distribution = match self.outcomes.fetch_distribution().await {
            Ok(distribution) => distribution,
            Err(err) => {
                tracing::warn!(
                    uuid = %call.uuid,
                    error = %err,
                    "could not read outcome distribution; record skipped this tick"
                );
                return Resolution::Skipped;
            }
        };

        let outcome = match select_outcome(&distribution, &self.rng) {
            Ok(label) => label,
            Err(err) => {
                tracing::warn!(uuid = %call.uuid, error = %err, "record skipped this tick");
                return Resolution::Skipped;
            }
        };

        let status = classify(&outcome);
        let payload = NotificationPayload::project(&call, status, &outcome);

        if let Err(err) = self
            .notifier
            .notify(&call.notify_url, &call.notify_http_method, &payload)
            .await
        {
            tracing::warn!(
                uuid = %call.uuid,
                url = %call.notify_url,
                error = %err,
                "notification failed; record stays waiting"
            );
            return Resolution::DeliveryFailed;
        }

        tracing::info!(
            uuid = %call.uuid,
            url = %call.notify_url,
            outcome = %outcome,
            "notification delivered"
        );

        if let Err(err) = self
            .store
            .persist_result(call.kind, &call.uuid, status, &outcome)
            .await
        {
            // The webhook already went out; the still-waiting record will be
            // re-delivered next tick. At-least-once, by contract.
            tracing::error!(
                uuid = %call.uuid,
                error = %err,
                "delivered but failed to persist terminal state"
            );
            return Resolution::PersistFailed;
        }

        Resolution::Resolved
    }
}
