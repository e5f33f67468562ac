use anyhow::{Context, Result};
use clap::Parser;
use hostmcp_core::HttpHostingApi;
use hostmcp_mcp::{Dispatcher, McpServer};
use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod config;

use config::{AppState, Overrides, ServerConfig, Transport};

#[derive(Parser, Debug)]
#[command(name = "hostmcp")]
#[command(about = "MCP server exposing a hosting provider API as tools", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "hostmcp.toml")]
    config: PathBuf,

    /// Transport to serve
    #[arg(short, long, env = "MCP_TRANSPORT", value_enum)]
    transport: Option<Transport>,

    /// Host to bind to (http transport)
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on (http transport)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Base URL of the hosting API
    #[arg(long, env = "HOSTING_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Bearer token for the hosting API
    #[arg(long, env = "HOSTING_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            transport: self.transport,
            host: self.host.clone(),
            port: self.port,
            api_base_url: self.api_base_url.clone(),
            api_token: self.api_token.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout carries the stdio transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(&args.config, args.overrides())?;

    tracing::info!(
        "Starting hostmcp {} ({:?} transport, API {})",
        env!("CARGO_PKG_VERSION"),
        config.transport,
        config.api.base_url
    );

    let client = HttpHostingApi::new(Arc::new(config.api.clone()))
        .context("Failed to build hosting API client")?;
    let dispatcher =
        Arc::new(Dispatcher::new(Arc::new(client)).context("Tool catalog is inconsistent")?);
    tracing::info!("Registered {} tools", dispatcher.catalog().len());

    match config.transport {
        Transport::Stdio => McpServer::new(dispatcher).serve_stdio().await?,
        Transport::Http => api::serve(&config.bind_addr(), AppState::new(dispatcher)).await?,
    }

    Ok(())
}
