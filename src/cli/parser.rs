//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};

/// LeanIX Design Agent: natural-language answers over LeanIX design
/// standards.
///
/// Discovers the tools the LeanIX MCP endpoint exposes, filters them to
/// retrieval operations, and lets an LLM tool-calling loop synthesize an
/// answer for a free-text topic.
#[derive(Parser, Debug)]
#[command(name = "leanix-design-agent")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one design-standards question and print the answer.
    ///
    /// Reads the topic interactively from stdin when no argument is given.
    #[command(after_help = r#"Examples:
  leanix-design-agent query "event driven architecture"
  leanix-design-agent query "API security best practices"
  leanix-design-agent query          # prompts for a topic
"#)]
    Query {
        /// The topic to ask about.
        topic: Option<String>,
    },

    /// List the tools the remote endpoint exposes.
    ///
    /// Selected (relevance-matching) tools are marked with `*`.
    Tools,

    /// Start the MCP service surface.
    #[command(subcommand)]
    Serve(ServeCommands),
}

/// MCP server transports.
#[derive(Subcommand, Debug)]
pub enum ServeCommands {
    /// Serve MCP over stdio (for agent-host integration).
    Stdio,

    /// Serve MCP over streamable HTTP.
    Http {
        /// Listen host. Defaults to MCP_SERVER_HOST or 0.0.0.0.
        #[arg(long)]
        host: Option<String>,

        /// Listen port. Defaults to MCP_SERVER_PORT or 8000.
        #[arg(short, long)]
        port: Option<u16>,
    },
}
