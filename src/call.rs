use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which collection a call record belongs to.
///
/// Pre-recorded audio calls and TTS calls live in separate collections but
/// share the same resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Voice,
    Tts,
}

impl CallKind {
    /// Every collection the sweeper fetches from.
    pub const ALL: [CallKind; 2] = [CallKind::Voice, CallKind::Tts];
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallKind::Voice => write!(f, "voice"),
            CallKind::Tts => write!(f, "tts"),
        }
    }
}

/// Coarse delivery category derived from a raw outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultCategory {
    Success,
    Error,
}

impl std::fmt::Display for ResultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultCategory::Success => write!(f, "success"),
            ResultCategory::Error => write!(f, "error"),
        }
    }
}

/// Result state of a call record.
///
/// A record is created `Waiting` and is moved to `Resolved` by the sweeper
/// once the webhook notification for it has been confirmed delivered.
/// `Resolved` is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallState {
    Waiting,
    Resolved {
        status: ResultCategory,
        /// The raw outcome label drawn in the sweep that resolved this call.
        outcome: String,
    },
}

impl CallState {
    pub fn is_waiting(&self) -> bool {
        matches!(self, CallState::Waiting)
    }
}

/// A single outbound call awaiting resolution.
///
/// Created by the submission layer with `state = Waiting`; the sweeper is the
/// only writer afterwards. Records are never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCall {
    pub uuid: String,
    pub number: String,
    pub kind: CallKind,
    pub blaster_type: String,
    pub press_election: String,
    pub auxiliary_field: String,
    #[serde(default)]
    pub test_mode: bool,
    pub notify_url: String,
    pub notify_http_method: String,
    pub state: CallState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PendingCall {
    pub fn new(
        kind: CallKind,
        number: String,
        notify_url: String,
        notify_http_method: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4().to_string(),
            number,
            kind,
            blaster_type: kind.to_string(),
            press_election: String::new(),
            auxiliary_field: String::new(),
            test_mode: false,
            notify_url,
            notify_http_method,
            state: CallState::Waiting,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the terminal state to this record.
    pub fn resolve(&mut self, status: ResultCategory, outcome: String) {
        self.state = CallState::Resolved { status, outcome };
        self.updated_at = Utc::now();
    }
}

/// One (label, weight) entry of the outcome distribution.
///
/// The full set of entries forms a probability distribution over labels
/// proportional to weight. Owned by configuration; read-only for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeWeight {
    pub label: String,
    pub weight: f64,
}

impl OutcomeWeight {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_call() -> PendingCall {
        PendingCall::new(
            CallKind::Voice,
            "+5511999990000".into(),
            "http://localhost:9000/hook".into(),
            "POST".into(),
        )
    }

    #[test]
    fn new_call_starts_waiting() {
        let call = sample_call();
        assert!(call.state.is_waiting());
        assert_eq!(call.kind, CallKind::Voice);
        assert!(!call.test_mode);
        assert!(!call.uuid.is_empty());
    }

    #[test]
    fn resolve_is_terminal_state() {
        let mut call = sample_call();
        call.resolve(ResultCategory::Success, "ANSWERED".into());
        assert!(!call.state.is_waiting());
        assert_eq!(
            call.state,
            CallState::Resolved {
                status: ResultCategory::Success,
                outcome: "ANSWERED".into(),
            }
        );
    }

    #[test]
    fn result_category_display() {
        assert_eq!(ResultCategory::Success.to_string(), "success");
        assert_eq!(ResultCategory::Error.to_string(), "error");
    }

    #[test]
    fn result_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResultCategory::Success).unwrap(),
            r#""success""#
        );
        assert_eq!(
            serde_json::to_string(&ResultCategory::Error).unwrap(),
            r#""error""#
        );
    }

    #[test]
    fn call_serialization_roundtrip() {
        let call = sample_call();
        let json = serde_json::to_string(&call).unwrap();
        let parsed: PendingCall = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.uuid, call.uuid);
        assert_eq!(parsed.number, "+5511999990000");
        assert!(parsed.state.is_waiting());
    }

    #[test]
    fn call_kind_covers_every_collection() {
        assert_eq!(CallKind::ALL, [CallKind::Voice, CallKind::Tts]);
        assert_eq!(CallKind::Voice.to_string(), "voice");
        assert_eq!(CallKind::Tts.to_string(), "tts");
    }
}
