//! portfolio-qa HTTP server

use clap::Parser;
use portfolio_qa::{
    cli::{Cli, Command, DEFAULT_CONFIG_PATH, generate_config_template},
    config::Config,
    handlers::{self, AppState},
    telemetry,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal outside local development
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Some(Command::Config { output }) = &cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(path, template)?;
                println!("Configuration template written to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref(), DEFAULT_CONFIG_PATH)?;
    config.apply_process_env()?;

    telemetry::init(&config.observability.log_level);

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.provider.model(),
        knowledge_path = %config.knowledge.path,
        api_key_configured = config.provider.api_key().is_some(),
        "Starting portfolio-qa server"
    );

    let addr = config.server.socket_addr()?;

    let state = AppState::new(Arc::new(config))?;
    let app = handlers::app(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
