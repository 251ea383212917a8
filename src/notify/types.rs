//! Tipos de dados para o corpo da notificação de resolução.
//!
//! O [`NotificationPayload`] deriva `Serialize` e `Deserialize` para conversão
//! JSON no formato exato esperado pelos endpoints de callback — as chaves em
//! camelCase via `serde(rename_all)`.

use serde::{Deserialize, Serialize};

use crate::call::{PendingCall, ResultCategory};

/// Corpo JSON enviado ao endpoint de callback quando uma chamada é resolvida.
///
/// Projeção determinística do registro [`PendingCall`] mais a categoria
/// calculada e o label bruto sorteado. Exatamente estas oito chaves vão no
/// fio — nenhum outro campo do registro vaza.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Identificador único da chamada.
    pub uuid: String,
    /// Categoria do resultado: "success" ou "error".
    pub status: ResultCategory,
    /// Flag de modo de teste fornecida na submissão.
    pub test_mode: bool,
    /// Entrada de eleição por tecla fornecida na submissão.
    pub press_election: String,
    /// Tag do tipo de blaster da chamada.
    pub blaster_type: String,
    /// Campo auxiliar livre fornecido na submissão.
    pub auxiliary_field: String,
    /// Número de destino da chamada.
    pub number: String,
    /// Label bruto do resultado sorteado (ex.: "ANSWERED").
    pub result: String,
}

impl NotificationPayload {
    /// Projeta o payload a partir do registro e do resultado calculado.
    pub fn project(call: &PendingCall, status: ResultCategory, outcome: &str) -> Self {
        Self {
            uuid: call.uuid.clone(),
            status,
            test_mode: call.test_mode,
            press_election: call.press_election.clone(),
            blaster_type: call.blaster_type.clone(),
            auxiliary_field: call.auxiliary_field.clone(),
            number: call.number.clone(),
            result: outcome.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallKind;

    fn sample_call() -> PendingCall {
        let mut call = PendingCall::new(
            CallKind::Voice,
            "+5511988887777".into(),
            "http://callback.test/notify".into(),
            "POST".into(),
        );
        call.press_election = "1".into();
        call.blaster_type = "campaign-a".into();
        call.auxiliary_field = "batch-42".into();
        call.test_mode = true;
        call
    }

    #[test]
    fn payload_copies_fields_unchanged() {
        let call = sample_call();
        let payload = NotificationPayload::project(&call, ResultCategory::Success, "ANSWERED");

        assert_eq!(payload.uuid, call.uuid);
        assert_eq!(payload.number, "+5511988887777");
        assert_eq!(payload.press_election, "1");
        assert_eq!(payload.blaster_type, "campaign-a");
        assert_eq!(payload.auxiliary_field, "batch-42");
        assert!(payload.test_mode);
        assert_eq!(payload.status, ResultCategory::Success);
        assert_eq!(payload.result, "ANSWERED");
    }

    #[test]
    fn payload_has_exactly_the_wire_keys() {
        let call = sample_call();
        let payload = NotificationPayload::project(&call, ResultCategory::Error, "CONGESTION");

        let value = serde_json::to_value(&payload).unwrap();
        let map = value.as_object().unwrap();

        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "auxiliaryField",
                "blasterType",
                "number",
                "pressElection",
                "result",
                "status",
                "testMode",
                "uuid",
            ]
        );
    }

    #[test]
    fn payload_serializes_camel_case_values() {
        let call = sample_call();
        let payload = NotificationPayload::project(&call, ResultCategory::Error, "NOANSWER");
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["result"], "NOANSWER");
        assert_eq!(value["testMode"], true);
        assert_eq!(value["blasterType"], "campaign-a");
    }

    #[test]
    fn payload_deserializes_from_wire_format() {
        let json = r#"{
            "uuid": "abc-123",
            "status": "success",
            "testMode": false,
            "pressElection": "2",
            "blasterType": "voice",
            "auxiliaryField": "x",
            "number": "+111",
            "result": "ANSWERED"
        }"#;
        let payload: NotificationPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.uuid, "abc-123");
        assert_eq!(payload.status, ResultCategory::Success);
        assert_eq!(payload.result, "ANSWERED");
    }
}
