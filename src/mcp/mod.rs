//! MCP (Model Context Protocol) server for the catalog tools.
//!
//! Protocol: JSON-RPC 2.0 over HTTP POST (no stdio transport).
//! Protocol revision: <https://spec.modelcontextprotocol.io/2024-11-05/>

pub mod server;
