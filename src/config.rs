//! Configuração do BLASTSIM carregada a partir de `blastsim.toml`.
//!
//! A struct [`BlastConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `BLASTSIM_INTERVAL` tem precedência sobre o arquivo.
//! A configuração é construída uma vez no arranque e passada explicitamente
//! ao sweeper — nenhum estado global.

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::call::OutcomeWeight;

/// Configuração de nível superior carregada de `blastsim.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlastConfig {
    /// Intervalo entre varreduras de resolução, em segundos. Deve ser > 0.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Timeout de cada requisição de notificação, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Distribuição de pesos sobre os resultados sorteados.
    #[serde(default = "default_outcomes")]
    pub outcomes: Vec<OutcomeWeight>,
}

// Valor padrão para o intervalo de varredura: 10s.
fn default_interval_secs() -> u64 {
    10
}

// Valor padrão para o timeout de notificação: 30s.
fn default_request_timeout_secs() -> u64 {
    30
}

// Distribuição padrão: 70% atendida, 20% sem resposta, 10% congestionada.
fn default_outcomes() -> Vec<OutcomeWeight> {
    vec![
        OutcomeWeight::new("ANSWERED", 70.0),
        OutcomeWeight::new("NOANSWER", 20.0),
        OutcomeWeight::new("CONGESTION", 10.0),
    ]
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            outcomes: default_outcomes(),
        }
    }
}

impl BlastConfig {
    /// Carrega a configuração de `blastsim.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("blastsim.toml"))
    }

    /// Carrega a configuração do caminho dado, aplicando a precedência da
    /// variável de ambiente e a validação.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<BlastConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para o intervalo.
        if let Ok(value) = std::env::var("BLASTSIM_INTERVAL")
            && !value.is_empty()
        {
            config.interval_secs = value
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid BLASTSIM_INTERVAL: {value}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejeita configurações sem sentido. O intervalo precisa ser positivo;
    /// a distribuição pode ficar vazia (a varredura apenas pula registros e
    /// loga até a configuração ser corrigida).
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            bail!("interval_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
