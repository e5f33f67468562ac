//! Error types for tool dispatch.

use hostmcp_core::ApiError;

/// A failure while executing a tool call.
///
/// These never become JSON-RPC errors: the dispatcher renders them as
/// `"Error: <message>"` inside a successful tool result.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// `arguments` was present but not a JSON object.
    #[error("Tool arguments must be an object")]
    InvalidArguments,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The catalog and the handler set disagree. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate tool name in catalog: {0}")]
    DuplicateTool(&'static str),

    #[error("No descriptor registered for tool {0:?}")]
    MissingDescriptor(crate::tools::ToolId),
}
