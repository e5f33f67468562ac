//! Resolves tool calls against the catalog and normalizes their outcome.
//!
//! Tool-execution failures (unknown tool, bad arguments, API errors) come
//! back as successful results whose text starts with `"Error: "`. Only a
//! structurally invalid request yields a [`JsonRpcError`].

use crate::error::{CatalogError, ToolError};
use crate::protocol::{CallToolParams, CallToolResult, JsonRpcError, ListToolsResult};
use crate::tools::{self, Catalog, ResolvedTool, ToolArgs};
use hostmcp_core::HostingApi;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// JSON-RPC methods served by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMethod {
    List,
    Call,
}

impl ToolMethod {
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "tools/list" => Some(Self::List),
            "tools/call" => Some(Self::Call),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "tools/list",
            Self::Call => "tools/call",
        }
    }
}

/// Stateless router from tool calls to handlers. Safe to share across
/// transports and concurrent calls.
pub struct Dispatcher {
    catalog: Catalog,
    api: Arc<dyn HostingApi>,
}

impl Dispatcher {
    /// Build the dispatcher, failing if the catalog and handlers disagree.
    pub fn new(api: Arc<dyn HostingApi>) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::new()?,
            api,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.catalog.list(),
        }
    }

    /// Run one tool call. Never fails: errors become an `"Error: ..."` result.
    pub async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        match self.execute(&params).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                CallToolResult::error(e)
            }
        }
    }

    async fn execute(&self, params: &CallToolParams) -> Result<CallToolResult, ToolError> {
        let id = match ResolvedTool::resolve(&params.name) {
            ResolvedTool::Known(id) => id,
            ResolvedTool::Unknown(name) => return Err(ToolError::UnknownTool(name)),
        };
        let descriptor = self
            .catalog
            .get(id)
            .ok_or_else(|| ToolError::UnknownTool(params.name.clone()))?;

        let values = descriptor.validate(&params.arguments)?;
        info!(tool = descriptor.name(), "Calling tool");

        tools::invoke(id, self.api.as_ref(), &ToolArgs::new(&values, descriptor.params)).await
    }

    /// Serve a `tools/list` or `tools/call` request body.
    pub async fn dispatch(&self, method: ToolMethod, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            ToolMethod::List => to_result(self.list_tools()),
            ToolMethod::Call => {
                let params = params
                    .ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))?;
                let params: CallToolParams = serde_json::from_value(params).map_err(|e| {
                    JsonRpcError::invalid_params(format!("Invalid params for tools/call: {}", e))
                })?;
                to_result(self.call_tool(params).await)
            }
        }
    }
}

fn to_result(value: impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingApi;
    use crate::tools::ToolId;
    use serde_json::json;

    fn dispatcher(api: RecordingApi) -> Dispatcher {
        Dispatcher::new(Arc::new(api)).unwrap()
    }

    fn call(name: &str, arguments: Value) -> CallToolParams {
        CallToolParams {
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_list_tools_is_stable() {
        let dispatcher = dispatcher(RecordingApi::returning(json!(null)));

        let first = dispatcher.list_tools();
        let second = dispatcher.list_tools();

        assert_eq!(first, second);
        assert_eq!(first.tools.len(), ToolId::ALL.len());
        assert_eq!(first.tools[0].name, "list_domains");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_successful_result() {
        let dispatcher = dispatcher(RecordingApi::returning(json!(null)));

        for name in ["format_disk", "", "LIST_DOMAINS"] {
            let result = dispatcher.call_tool(call(name, json!({}))).await;
            assert_eq!(
                result.content[0].as_text(),
                format!("Error: Unknown tool: {}", name)
            );
        }
    }

    #[tokio::test]
    async fn test_list_domains_round_trip() {
        let payload = json!({"data": [{"domain": "example.com", "status": "active"}]});
        let dispatcher = dispatcher(RecordingApi::returning(payload.clone()));

        let result = dispatcher.call_tool(call("list_domains", json!({}))).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"content": [{
                "type": "text",
                "text": format!("Domains: {}", serde_json::to_string_pretty(&payload).unwrap())
            }]})
        );
    }

    #[tokio::test]
    async fn test_handler_failure_is_rendered() {
        let dispatcher = dispatcher(RecordingApi::failing(401, "Unauthenticated"));

        let result = dispatcher
            .call_tool(call("get_vps", json!({"vps_id": "1"})))
            .await;

        assert_eq!(
            result.content[0].as_text(),
            "Error: API request failed with status 401: Unauthenticated"
        );
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_missing_argument_skips_api() {
        let api = Arc::new(RecordingApi::returning(json!(null)));
        let dispatcher = Dispatcher::new(api.clone()).unwrap();

        let result = dispatcher.call_tool(call("get_domain", Value::Null)).await;

        assert_eq!(
            result.content[0].as_text(),
            "Error: Missing required argument: domain"
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_call_is_result_shaped_on_failure() {
        let dispatcher = dispatcher(RecordingApi::failing(500, "boom"));

        let value = dispatcher
            .dispatch(
                ToolMethod::Call,
                Some(json!({"name": "list_invoices", "arguments": {}})),
            )
            .await
            .unwrap();

        assert_eq!(value["content"][0]["text"], "Error: API request failed with status 500: boom");
    }

    #[tokio::test]
    async fn test_dispatch_call_without_params_is_invalid() {
        let dispatcher = dispatcher(RecordingApi::returning(json!(null)));

        let err = dispatcher.dispatch(ToolMethod::Call, None).await.unwrap_err();
        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);

        let err = dispatcher
            .dispatch(ToolMethod::Call, Some(json!({"arguments": {}})))
            .await
            .unwrap_err();
        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_dispatch_list() {
        let dispatcher = dispatcher(RecordingApi::returning(json!(null)));

        let value = dispatcher.dispatch(ToolMethod::List, None).await.unwrap();

        assert_eq!(value["tools"].as_array().unwrap().len(), ToolId::ALL.len());
        assert_eq!(value["tools"][0]["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_tool_method_parse() {
        assert_eq!(ToolMethod::parse("tools/list"), Some(ToolMethod::List));
        assert_eq!(ToolMethod::parse("tools/call"), Some(ToolMethod::Call));
        assert_eq!(ToolMethod::parse("initialize"), None);
        assert_eq!(ToolMethod::Call.as_str(), "tools/call");
    }
}
