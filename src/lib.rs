//! leanix-design-agent: a natural-language facade over the LeanIX MCP
//! endpoint.
//!
//! The crate accepts a free-text topic, discovers which tools the remote
//! endpoint exposes, narrows the listing to retrieval operations through a
//! fixed relevance vocabulary, and drives an LLM tool-calling loop over
//! the survivors until it emits one synthesized text answer.
//!
//! # Components
//!
//! - [`config`] - environment-sourced configuration, loaded once at
//!   startup and passed into every constructor.
//! - [`directory`] - MCP client for the remote tool directory, plus the
//!   relevance selector.
//! - [`agent`] - provider-agnostic LLM layer and the query agent driving
//!   the tool-calling loop.
//! - [`mcp`] - the MCP service surface exposing the agent's four
//!   operations to external callers.
//! - [`cli`] - single-shot and service entry points.

pub mod agent;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod mcp;

pub use agent::{QueryAgent, QueryResult};
pub use config::{AppConfig, TransportKind};
pub use directory::{McpDirectory, ToolDescriptor, ToolDirectory};
pub use error::{AgentError, ConfigError, DirectoryError, Error, Result};
