use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::call::{CallKind, OutcomeWeight, PendingCall, ResultCategory};
use crate::error::BlastError;

use super::{CallStore, OutcomeSource};

/// In-memory pending-call store, one bucket per [`CallKind`].
///
/// Backs the demo CLI and the sweep tests. Mutation goes through the same
/// two operations the engine would use against a real document store.
#[derive(Default)]
pub struct MemoryStore {
    calls: RwLock<HashMap<CallKind, Vec<PendingCall>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, call: PendingCall) {
        let mut calls = self.calls.write().await;
        calls.entry(call.kind).or_default().push(call);
    }

    /// Look up a record by id across every collection.
    pub async fn get(&self, uuid: &str) -> Option<PendingCall> {
        let calls = self.calls.read().await;
        calls
            .values()
            .flatten()
            .find(|call| call.uuid == uuid)
            .cloned()
    }

    pub async fn waiting_count(&self) -> usize {
        let calls = self.calls.read().await;
        calls
            .values()
            .flatten()
            .filter(|call| call.state.is_waiting())
            .count()
    }
}

impl CallStore for MemoryStore {
    async fn fetch_waiting(&self, kind: CallKind) -> Result<Vec<PendingCall>, BlastError> {
        let calls = self.calls.read().await;
        Ok(calls
            .get(&kind)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|call| call.state.is_waiting())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn persist_result(
        &self,
        kind: CallKind,
        uuid: &str,
        status: ResultCategory,
        outcome: &str,
    ) -> Result<(), BlastError> {
        let mut calls = self.calls.write().await;
        let call = calls
            .get_mut(&kind)
            .and_then(|bucket| bucket.iter_mut().find(|call| call.uuid == uuid))
            .ok_or_else(|| BlastError::Persistence {
                uuid: uuid.to_string(),
                message: format!("no such record in the {kind} collection"),
            })?;
        call.resolve(status, outcome.to_string());
        Ok(())
    }
}

/// In-memory outcome distribution with hot swap.
///
/// [`set`](MemoryOutcomes::set) replaces the whole distribution; the next
/// resolution picks it up, mirroring how a config-store edit would behave.
pub struct MemoryOutcomes {
    weights: RwLock<Vec<OutcomeWeight>>,
}

impl MemoryOutcomes {
    pub fn new(weights: Vec<OutcomeWeight>) -> Self {
        Self {
            weights: RwLock::new(weights),
        }
    }

    pub async fn set(&self, weights: Vec<OutcomeWeight>) {
        *self.weights.write().await = weights;
    }
}

impl OutcomeSource for MemoryOutcomes {
    async fn fetch_distribution(&self) -> Result<Vec<OutcomeWeight>, BlastError> {
        Ok(self.weights.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiting_call(kind: CallKind, number: &str) -> PendingCall {
        PendingCall::new(
            kind,
            number.into(),
            "http://callback.test/notify".into(),
            "POST".into(),
        )
    }

    #[tokio::test]
    async fn fetch_waiting_filters_by_kind_and_state() {
        let store = MemoryStore::new();
        let voice = waiting_call(CallKind::Voice, "+111");
        let tts = waiting_call(CallKind::Tts, "+222");
        let voice_id = voice.uuid.clone();
        store.insert(voice).await;
        store.insert(tts).await;

        let fetched = store.fetch_waiting(CallKind::Voice).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].uuid, voice_id);

        store
            .persist_result(CallKind::Voice, &voice_id, ResultCategory::Success, "ANSWERED")
            .await
            .unwrap();

        // Resolved records are no longer fetched.
        let fetched = store.fetch_waiting(CallKind::Voice).await.unwrap();
        assert!(fetched.is_empty());
        assert_eq!(store.waiting_count().await, 1);
    }

    #[tokio::test]
    async fn persist_result_applies_terminal_state() {
        let store = MemoryStore::new();
        let call = waiting_call(CallKind::Tts, "+333");
        let uuid = call.uuid.clone();
        store.insert(call).await;

        store
            .persist_result(CallKind::Tts, &uuid, ResultCategory::Error, "CONGESTION")
            .await
            .unwrap();

        let stored = store.get(&uuid).await.unwrap();
        assert_eq!(
            stored.state,
            crate::call::CallState::Resolved {
                status: ResultCategory::Error,
                outcome: "CONGESTION".into(),
            }
        );
    }

    #[tokio::test]
    async fn persist_unknown_record_fails() {
        let store = MemoryStore::new();
        let err = store
            .persist_result(CallKind::Voice, "missing", ResultCategory::Success, "ANSWERED")
            .await
            .unwrap_err();
        assert!(matches!(err, BlastError::Persistence { .. }));
    }

    #[tokio::test]
    async fn outcomes_hot_swap_is_visible_on_next_fetch() {
        let outcomes = MemoryOutcomes::new(vec![OutcomeWeight::new("ANSWERED", 100.0)]);
        let first = outcomes.fetch_distribution().await.unwrap();
        assert_eq!(first.len(), 1);

        outcomes
            .set(vec![
                OutcomeWeight::new("NOANSWER", 50.0),
                OutcomeWeight::new("CONGESTION", 50.0),
            ])
            .await;

        let second = outcomes.fetch_distribution().await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].label, "NOANSWER");
    }
}
