use anyhow::Result;
use clap::Parser;
use flexible_calc::config::{Config, Transport};
use flexible_calc::service::CalculatorService;
use flexible_calc::{http, Calculator};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // stdout は MCP の通信に使うのでログは stderr へ
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let calculator = Calculator::new();
    match config.transport {
        Transport::Stdio => {
            tracing::info!("stdio で MCP サーバを起動");
            let service = CalculatorService::new(calculator).serve(stdio()).await?;
            service.waiting().await?;
        }
        Transport::Http => http::serve(config.bind, calculator).await?,
    }
    Ok(())
}
