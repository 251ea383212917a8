//! Interface de linha de comando do BLASTSIM baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, sweep, status)
//! e flags globais (--interval, --verbose).

use clap::{Parser, Subcommand};

/// BLASTSIM — backend simulado de disparo de chamadas em massa.
#[derive(Debug, Parser)]
#[command(name = "blastsim", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Intervalo entre varreduras em segundos (sobrepõe o arquivo de configuração).
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Semeia chamadas simuladas e executa o loop periódico de resolução.
    Run {
        /// Quantidade de chamadas de demonstração a semear.
        #[arg(long, default_value_t = 5)]
        calls: u32,

        /// URL do webhook que recebe as notificações de resolução.
        #[arg(long, default_value = "http://localhost:3000/notify")]
        notify_url: String,
    },

    /// Executa uma única varredura sobre chamadas semeadas e mostra o resumo.
    Sweep {
        /// Quantidade de chamadas de demonstração a semear.
        #[arg(long, default_value_t = 5)]
        calls: u32,

        /// URL do webhook que recebe as notificações de resolução.
        #[arg(long, default_value = "http://localhost:3000/notify")]
        notify_url: String,
    },

    /// Mostra a configuração carregada e a distribuição de resultados.
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_subcommand() {
        let cli = Cli::parse_from(["blastsim", "run", "--calls", "12"]);
        match cli.command {
            Command::Run { calls, notify_url } => {
                assert_eq!(calls, 12);
                assert_eq!(notify_url, "http://localhost:3000/notify");
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["blastsim", "--interval", "3", "--verbose", "status"]);
        assert!(cli.verbose);
        assert_eq!(cli.interval, Some(3));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn cli_parses_sweep_with_notify_url() {
        let cli = Cli::parse_from([
            "blastsim",
            "sweep",
            "--notify-url",
            "http://hooks.test/blast",
        ]);
        match cli.command {
            Command::Sweep { calls, notify_url } => {
                assert_eq!(calls, 5);
                assert_eq!(notify_url, "http://hooks.test/blast");
            }
            _ => panic!("expected Sweep command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
