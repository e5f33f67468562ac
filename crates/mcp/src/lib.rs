// MCP (Model Context Protocol) server exposing the hosting API as tools

pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod server;
pub mod stdio;
pub mod tools;

pub use dispatcher::{Dispatcher, ToolMethod};
pub use error::{CatalogError, ToolError};
pub use server::McpServer;
