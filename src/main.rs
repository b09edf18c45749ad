//src/main.rs

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use arbitrage_dashboard::{
    api::HttpDashboardApi,
    config::DashboardConfig,
    handlers::commands::{run_command, Command, HELP},
    services::DashboardController,
    ui::{ConsoleChart, ConsoleLayer, ConsoleView},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG sobrescreve o nível padrão)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, o painel não deve abrir.
    let config = DashboardConfig::from_env()?;
    tracing::info!("🔌 Backend: {} (atualização a cada {:?})", config.api_base, config.poll_interval);

    let api = HttpDashboardApi::new(&config)?;
    let view = ConsoleView::new();
    let form = view.memory();

    let controller = DashboardController::new(config, Arc::new(api), Box::new(view));
    controller.mount(
        Box::new(ConsoleLayer::default()),
        Box::new(ConsoleChart::new("Revenue")),
        Box::new(ConsoleChart::new("Efficiency (high/medium/low)")),
    );

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if !run_command(&controller, &form, command).await {
                            break;
                        }
                    }
                    Err(message) => println!("{} ({})", message, HELP),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl-C recebido, encerrando");
                break;
            }
        }
    }

    controller.dispose();
    Ok(())
}
