// MCP (Model Context Protocol) server exposing the ExpenseLM API as agent tools

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
