//! Error types for leanix-design-agent.
//!
//! One enum per failure domain: configuration, the remote tool directory,
//! and the agent layer. Nothing in the core retries; every error propagates
//! to the request surface, which presents it (nonzero exit for the CLI,
//! an MCP error for service mode).

use thiserror::Error;

/// Configuration errors, fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("required setting {name} is not set")]
    MissingVar {
        /// Environment variable name.
        name: &'static str,
    },

    /// A setting is present but cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Errors from the remote tool directory (the LeanIX MCP endpoint).
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The endpoint is unreachable, rejected authentication, or the
    /// transport closed mid-session.
    #[error("MCP endpoint connection failed: {message}")]
    Connection {
        /// Underlying transport error description.
        message: String,
    },

    /// The endpoint responded but the listing or invocation response
    /// could not be interpreted.
    #[error("MCP protocol error: {message}")]
    Protocol {
        /// Underlying protocol error description.
        message: String,
    },
}

/// Errors from the query agent and the LLM tool-calling loop.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The topic was empty or whitespace-only. Rejected before any
    /// remote call.
    #[error("topic must not be empty")]
    EmptyTopic,

    /// The LLM provider request failed.
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Error description from the provider SDK.
        message: String,
        /// HTTP status, when the provider reported one.
        status: Option<u16>,
    },

    /// A remote tool invocation inside the loop failed.
    #[error("tool invocation failed for {name}: {message}")]
    ToolInvocation {
        /// Name of the tool being invoked.
        name: String,
        /// Failure description.
        message: String,
    },

    /// The reasoning loop exceeded the configured wall-clock bound.
    #[error("query timed out after {seconds}s")]
    Timeout {
        /// The configured bound in seconds.
        seconds: u64,
    },

    /// The model kept requesting tools beyond the iteration limit.
    #[error("tool-calling loop exceeded {max_iterations} iterations")]
    ToolLoopExceeded {
        /// The configured iteration limit.
        max_iterations: usize,
    },

    /// The tool directory failed while the agent was listing or
    /// invoking tools.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Top-level error type uniting all failure domains.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Tool directory failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Agent failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// I/O failure (interactive prompt, server bind).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// MCP service runtime failure.
    #[error("server error: {0}")]
    Server(#[from] anyhow::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
