//! MCP server and tools module

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
