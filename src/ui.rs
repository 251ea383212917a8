//! Interface de terminal do BLASTSIM — spinners e saída colorida.
//!
//! Usa as crates `indicatif` para spinners de progresso e `console` para
//! estilização com cores. O [`SweepProgress`] acompanha visualmente uma
//! varredura única disparada pela CLI.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::BlastConfig;
use crate::engine::SweepReport;

/// Indicador visual de progresso para uma varredura de resolução no terminal.
///
/// Exibe um spinner animado enquanto as chamadas são resolvidas e um resumo
/// colorido ao final: verde para entregas confirmadas, amarelo para registros
/// que continuam aguardando, vermelho para falhas de persistência.
pub struct SweepProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Estilo verde para resoluções confirmadas.
    green: Style,
    // Estilo vermelho para falhas.
    red: Style,
    // Estilo amarelo para registros ainda aguardando.
    yellow: Style,
}

impl SweepProgress {
    /// Inicia o spinner para uma varredura sobre `calls` chamadas semeadas.
    pub fn start(calls: u32) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("Resolving {calls} waiting calls"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Finaliza o spinner e exibe o resumo da varredura.
    pub fn complete(&self, report: &SweepReport) {
        self.pb.finish_and_clear();
        println!(
            "  {} {} resolved and persisted",
            self.green.apply_to("✓"),
            report.resolved
        );
        if report.delivery_failed > 0 {
            println!(
                "  {} {} delivery failures (still waiting)",
                self.yellow.apply_to("↻"),
                report.delivery_failed
            );
        }
        if report.skipped > 0 {
            println!(
                "  {} {} skipped (no outcome distribution)",
                self.yellow.apply_to("–"),
                report.skipped
            );
        }
        if report.persist_failed > 0 {
            println!(
                "  {} {} delivered but not persisted",
                self.red.apply_to("✗"),
                report.persist_failed
            );
        }
    }
}

/// Imprime a configuração carregada e a distribuição de resultados.
pub fn print_status(config: &BlastConfig) {
    let bold = Style::new().bold();
    println!("{}", bold.apply_to("─── blastsim status ───"));
    println!("sweep interval    : {}s", config.interval_secs);
    println!("request timeout   : {}s", config.request_timeout_secs);

    let total: f64 = config.outcomes.iter().map(|o| o.weight).sum();
    if total <= 0.0 {
        println!(
            "{}",
            Style::new()
                .red()
                .apply_to("outcomes          : none configured — sweeps will skip every record")
        );
        return;
    }

    println!("outcomes:");
    for outcome in &config.outcomes {
        println!(
            "  {:<12} weight {:>6.1}  ({:>5.1}%)",
            outcome.label,
            outcome.weight,
            100.0 * outcome.weight / total
        );
    }
}
