use crate::api::sse::SessionRegistry;
use anyhow::{anyhow, Context, Result};
use hostmcp_core::{ApiConfig, DEFAULT_BASE_URL};
use hostmcp_mcp::{Dispatcher, McpServer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Transport the process serves for its whole lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    #[default]
    Stdio,
    /// HTTP POST endpoint plus SSE sessions
    Http,
}

/// Values from flags or the environment, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub transport: Option<Transport>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_base_url: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    transport: Option<Transport>,
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
    token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
    pub api: ApiConfig,
}

impl ServerConfig {
    /// Load the config file if it exists and apply `overrides` on top.
    ///
    /// Fails when no API token is configured anywhere.
    pub fn load(config_path: &Path, overrides: Overrides) -> Result<Self> {
        let file: FileConfig = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            FileConfig::default()
        };

        Self::resolve(file, overrides)
    }

    fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let token = overrides
            .api_token
            .or(file.api.token)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("HOSTING_API_TOKEN is not set; an API token is required"))?;

        let base_url = overrides
            .api_base_url
            .or(file.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api = ApiConfig::new(&base_url, token).context("Invalid API configuration")?;

        Ok(Self {
            transport: overrides
                .transport
                .or(file.server.transport)
                .unwrap_or_default(),
            host: overrides.host.or(file.server.host).unwrap_or_else(default_host),
            port: overrides.port.or(file.server.port).unwrap_or_else(default_port),
            api,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: McpServer,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            mcp: McpServer::new(dispatcher),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
