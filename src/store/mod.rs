//! Seams to the external persistence collaborators.
//!
//! The engine never talks to a concrete database: it fetches waiting records
//! and persists terminal states through [`CallStore`], and reads the outcome
//! distribution through [`OutcomeSource`]. The in-memory implementations in
//! [`memory`] back the demo CLI and the tests.

pub mod memory;

use std::future::Future;

use crate::call::{CallKind, OutcomeWeight, PendingCall, ResultCategory};
use crate::error::BlastError;

/// Access to the pending-call collections.
pub trait CallStore: Send + Sync {
    /// All records of `kind` still awaiting resolution. Already-resolved
    /// records are filtered out at the source.
    fn fetch_waiting(
        &self,
        kind: CallKind,
    ) -> impl Future<Output = Result<Vec<PendingCall>, BlastError>> + Send;

    /// Write the terminal state for one record. Called only after the
    /// notification for that record was confirmed delivered.
    fn persist_result(
        &self,
        kind: CallKind,
        uuid: &str,
        status: ResultCategory,
        outcome: &str,
    ) -> impl Future<Output = Result<(), BlastError>> + Send;
}

/// Read side of the outcome distribution. Fetched fresh on every resolution
/// so configuration changes take effect without a restart.
pub trait OutcomeSource: Send + Sync {
    fn fetch_distribution(
        &self,
    ) -> impl Future<Output = Result<Vec<OutcomeWeight>, BlastError>> + Send;
}

pub use memory::{MemoryOutcomes, MemoryStore};
