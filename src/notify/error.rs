//! Tipos de erro para a entrega de notificações webhook.
//!
//! Define [`DeliveryError`] com variantes para respostas não-2xx, timeout e
//! falhas de transporte. Usa `thiserror` para derivar `Display` e `Error`
//! automaticamente a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao entregar uma notificação ao endpoint de callback.
///
/// Toda falha de entrega é capturada aqui — nada escapa como panic. As
/// variantes cobrem os cenários de falha:
/// - [`Status`](DeliveryError::Status) — o endpoint respondeu fora da faixa 2xx
/// - [`Timeout`](DeliveryError::Timeout) — a requisição excedeu o tempo limite
/// - [`Transport`](DeliveryError::Transport) — falha na camada de rede (DNS, conexão recusada)
/// - [`InvalidMethod`](DeliveryError::InvalidMethod) — o registro carrega um método HTTP inválido
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// O endpoint respondeu com um status fora da faixa 2xx.
    /// Contém o código de status e o corpo da resposta para o log.
    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A requisição excedeu o tempo limite configurado.
    #[error("notification request timed out")]
    Timeout,

    /// Falha de rede subjacente (DNS, conexão recusada).
    #[error("transport error: {0}")]
    Transport(String),

    /// O método HTTP armazenado no registro não é um método válido.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeliveryError::Timeout
        } else {
            DeliveryError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        let err = DeliveryError::Status {
            status: 503,
            body: "service unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "endpoint returned status 503: service unavailable"
        );
    }

    #[test]
    fn invalid_method_display() {
        let err = DeliveryError::InvalidMethod("P0ST".into());
        assert_eq!(err.to_string(), "invalid HTTP method: P0ST");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeliveryError>();
    }
}
