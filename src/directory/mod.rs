//! Remote tool directory for the LeanIX MCP endpoint.
//!
//! The directory is the discovery half of the system: it connects to the
//! remote MCP server, lists the tool descriptors it advertises, and invokes
//! tools by name on behalf of the agent loop. Discovery is a pure read on
//! the remote side; a single listing attempt per call, no internal retry.

pub mod client;
pub mod selector;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;

pub use client::McpDirectory;
pub use selector::{DEFAULT_VOCABULARY, select_relevant};

/// Metadata advertised by the remote endpoint for one callable operation.
///
/// Immutable once retrieved. Identity is the name, assumed unique within
/// one listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// Output of one remote tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Text content returned by the tool.
    pub content: String,
    /// Whether the remote side flagged the result as an error.
    pub is_error: bool,
}

/// Interface to a remote tool directory.
///
/// The production implementation is [`McpDirectory`]; tests substitute
/// stubs to verify call ordering and failure propagation without a live
/// endpoint.
#[async_trait]
pub trait ToolDirectory: Send + Sync {
    /// Lists all tool descriptors the endpoint currently exposes.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Connection`] if the endpoint is
    /// unreachable and [`DirectoryError::Protocol`] if the listing cannot
    /// be parsed into descriptors.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, DirectoryError>;

    /// Invokes a tool by name with JSON object arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the invocation cannot be delivered or
    /// the response cannot be interpreted. A tool-level failure reported by
    /// the remote side is NOT an error here; it comes back as
    /// [`ToolOutput`] with `is_error` set so the model can observe it.
    async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolOutput, DirectoryError>;
}
