//! One-shot JSON-RPC over HTTP POST.
//!
//! Only `tools/list` and `tools/call` are served here; session methods such
//! as `initialize` belong to the SSE and stdio transports.

use crate::config::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use hostmcp_mcp::protocol::{JsonRpcError, JsonRpcResponse, JSONRPC_VERSION};
use hostmcp_mcp::ToolMethod;
use serde_json::Value;
use std::sync::Arc;

type RpcReply = (StatusCode, Json<JsonRpcResponse>);

/// `POST /mcp`
///
/// The envelope is checked on the raw JSON so that a mistyped `jsonrpc` or
/// `method` is reported as a client error rather than a decode failure.
pub async fn handle_rpc(State(state): State<Arc<AppState>>, body: Bytes) -> RpcReply {
    let mut value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => return internal_error(Value::Null, e.to_string()),
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);

    if value.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return reply(
            StatusCode::BAD_REQUEST,
            JsonRpcResponse::error(id, JsonRpcError::invalid_request()),
        );
    }

    let method_name = value.get("method").and_then(Value::as_str);
    let Some(method) = method_name.and_then(ToolMethod::parse) else {
        let shown = method_name
            .map(str::to_string)
            .or_else(|| value.get("method").map(Value::to_string))
            .unwrap_or_default();
        return reply(
            StatusCode::BAD_REQUEST,
            JsonRpcResponse::error(id, JsonRpcError::method_not_found(&shown)),
        );
    };

    let params = value
        .get_mut("params")
        .map(Value::take)
        .filter(|params| !params.is_null());

    match state.mcp.dispatcher().dispatch(method, params).await {
        Ok(result) => reply(StatusCode::OK, JsonRpcResponse::success(id, result)),
        Err(e) => internal_error(id, e.message),
    }
}

fn reply(status: StatusCode, response: JsonRpcResponse) -> RpcReply {
    (status, Json(response))
}

fn internal_error(id: Value, message: String) -> RpcReply {
    tracing::warn!(error = %message, "JSON-RPC request failed");
    reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        JsonRpcResponse::error(
            id,
            JsonRpcError::internal_error("Internal error").with_data(message),
        ),
    )
}
