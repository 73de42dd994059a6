//! MCP (Model Context Protocol) service surface.
//!
//! Exposes the query agent as an MCP server, so external agents can ask
//! design-standards questions as tool calls. The process is then an MCP
//! server on one side and an MCP client (toward LeanIX) on the other.
//!
//! # Architecture
//!
//! ```text
//! MCP Client (external agent)
//!   ↓ search_design_standards(topic) | get_architecture_patterns(...) | ...
//! DesignAgentServer
//!   ↓ query template
//! QueryAgent::answer()
//!   ├── remote tool listing + selection
//!   └── LLM tool-calling loop → LeanIX MCP endpoint
//!   ↓
//! final text → MCP Client
//! ```

pub mod params;
pub mod server;
pub mod transport;

pub use server::DesignAgentServer;
pub use transport::{serve_http, serve_stdio};
