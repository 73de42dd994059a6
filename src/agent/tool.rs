//! Tool types for the LLM function-calling interface.
//!
//! Provider-agnostic definitions, calls, and results. Unlike a local tool
//! table, every definition here is derived from a [`ToolDescriptor`]
//! advertised by the remote directory; the executor routes calls back to
//! the remote endpoint by name.

use serde::{Deserialize, Serialize};

use crate::directory::ToolDescriptor;

/// A tool definition sent to the LLM for function-calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (matches the remote descriptor's name).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

impl From<&ToolDescriptor> for ToolDefinition {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: descriptor.parameters.clone(),
        }
    }
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// The result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_call_id: String,
    /// Result content (tool output on success, error message on failure).
    pub content: String,
    /// Whether this result represents an error.
    pub is_error: bool,
}

/// Converts a selected descriptor slice into definitions for the model.
#[must_use]
pub fn bind_definitions(selected: &[ToolDescriptor]) -> Vec<ToolDefinition> {
    selected.iter().map(ToolDefinition::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            description: format!("{name} description"),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }),
        }
    }

    #[test]
    fn test_bind_definitions_preserves_order_and_schema() {
        let descriptors = vec![descriptor("search_fact_sheets"), descriptor("get_overview")];
        let defs = bind_definitions(&descriptors);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "search_fact_sheets");
        assert_eq!(defs[1].name, "get_overview");
        assert_eq!(defs[0].parameters["type"], "object");
    }

    #[test]
    fn test_bind_definitions_empty() {
        assert!(bind_definitions(&[]).is_empty());
    }

    #[test]
    fn test_tool_call_serialization() {
        let call = ToolCall {
            id: "call_123".to_string(),
            name: "search_fact_sheets".to_string(),
            arguments: r#"{"query":"event driven"}"#.to_string(),
        };
        let json = serde_json::to_string(&call).unwrap_or_default();
        assert!(json.contains("call_123"));
        assert!(json.contains("search_fact_sheets"));
    }

    #[test]
    fn test_tool_result_serialization() {
        let result = ToolResult {
            tool_call_id: "call_123".to_string(),
            content: "fact sheet content".to_string(),
            is_error: false,
        };
        let json = serde_json::to_string(&result).unwrap_or_default();
        assert!(json.contains("call_123"));
        assert!(!result.is_error);
    }
}
