// MCP session protocol shared by the stdio and SSE transports

use crate::dispatcher::{Dispatcher, ToolMethod};
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ServerCapabilities, ServerInfo, ToolsCapability, PROTOCOL_VERSION,
};
use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handles complete MCP sessions: the `initialize` handshake, `ping`,
/// notifications, and the tool methods served by the [`Dispatcher`].
///
/// Cheap to clone; every clone shares the same dispatcher.
#[derive(Clone)]
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    info: Arc<ServerInfo>,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            info: Arc::new(ServerInfo {
                name: "hostmcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one raw JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error().with_data(e.to_string()),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request().with_data(e.to_string()),
            )),
        }
    }

    /// Handle one decoded request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if !request.has_valid_version() {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(),
            ));
        }

        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        if method.starts_with("notifications/") {
            debug!(method = %method, "Received notification");
            return None;
        }

        let result = match method.as_str() {
            "initialize" => self.initialize(params.as_ref()),
            "ping" => Ok(json!({})),
            other => match ToolMethod::parse(other) {
                Some(tool_method) => self.dispatcher.dispatch(tool_method, params).await,
                None => Err(JsonRpcError::method_not_found(other)),
            },
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        match params.map(|p| serde_json::from_value::<InitializeParams>(p.clone())) {
            Some(Ok(params)) => info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Client initialized"
            ),
            Some(Err(e)) => debug!(error = %e, "Unrecognized initialize params"),
            None => debug!("Initialize without params"),
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: (*self.info).clone(),
        };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    /// Serve this session over the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(self) -> Result<()> {
        info!("MCP server listening on stdio");
        crate::stdio::serve(self, tokio::io::stdin(), tokio::io::stdout()).await
    }
}
