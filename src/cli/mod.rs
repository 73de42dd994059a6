//! CLI layer for the design agent.
//!
//! Provides the command-line interface using clap: single-shot queries,
//! remote tool inspection, and the MCP service entry points.

pub mod commands;
pub mod parser;

pub use commands::execute;
pub use parser::{Cli, Commands, ServeCommands};
