//! Executor that routes model-chosen tool calls to the remote directory.
//!
//! Holds a flat name table built from the selected descriptors; the model
//! dispatches by name at runtime. Recoverable problems (unknown name,
//! malformed arguments, a tool-level failure reported by the remote side)
//! come back as error-flagged [`ToolResult`]s so the model can observe and
//! correct. Directory failures abort the query.

use std::collections::HashSet;

use tracing::warn;

use crate::directory::{ToolDescriptor, ToolDirectory};
use crate::error::AgentError;

use super::tool::{ToolCall, ToolResult};

/// Maximum raw byte length of tool argument JSON from the LLM.
const MAX_TOOL_ARGS_LEN: usize = 100_000;

/// Dispatches tool calls to the remote MCP endpoint.
pub struct RemoteToolExecutor<'a> {
    directory: &'a dyn ToolDirectory,
    bound: HashSet<String>,
}

impl<'a> RemoteToolExecutor<'a> {
    /// Creates an executor bound to the given selected descriptors.
    ///
    /// Only bound names are dispatchable; the model cannot reach remote
    /// operations that the selector excluded.
    #[must_use]
    pub fn new(directory: &'a dyn ToolDirectory, selected: &[ToolDescriptor]) -> Self {
        Self {
            directory,
            bound: selected.iter().map(|d| d.name.clone()).collect(),
        }
    }

    /// Executes one tool call against the remote endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ToolInvocation`] if the directory fails to
    /// deliver the invocation or interpret its response. Model-recoverable
    /// problems are returned as `Ok` results with `is_error` set.
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult, AgentError> {
        if call.arguments.len() > MAX_TOOL_ARGS_LEN {
            return Ok(error_result(
                call,
                &format!(
                    "tool arguments too large ({} bytes, max {MAX_TOOL_ARGS_LEN})",
                    call.arguments.len()
                ),
            ));
        }

        if !self.bound.contains(&call.name) {
            warn!(tool = %call.name, "model requested an unbound tool");
            return Ok(error_result(call, "unknown tool"));
        }

        let arguments = if call.arguments.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            match serde_json::from_str(&call.arguments) {
                Ok(value) => value,
                Err(e) => {
                    return Ok(error_result(call, &format!("invalid argument JSON: {e}")));
                }
            }
        };

        let output = self
            .directory
            .invoke(&call.name, arguments)
            .await
            .map_err(|e| AgentError::ToolInvocation {
                name: call.name.clone(),
                message: e.to_string(),
            })?;

        Ok(ToolResult {
            tool_call_id: call.id.clone(),
            content: output.content,
            is_error: output.is_error,
        })
    }
}

fn error_result(call: &ToolCall, message: &str) -> ToolResult {
    ToolResult {
        tool_call_id: call.id.clone(),
        content: message.to_string(),
        is_error: true,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::directory::ToolOutput;
    use crate::error::DirectoryError;

    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Directory stub recording invocations and replaying canned outputs.
    struct StubDirectory {
        invocations: Mutex<Vec<(String, serde_json::Value)>>,
        fail_connection: bool,
    }

    impl StubDirectory {
        fn new() -> Self {
            Self {
                invocations: Mutex::new(Vec::new()),
                fail_connection: false,
            }
        }

        fn failing() -> Self {
            Self {
                invocations: Mutex::new(Vec::new()),
                fail_connection: true,
            }
        }
    }

    #[async_trait]
    impl ToolDirectory for StubDirectory {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, DirectoryError> {
            Ok(Vec::new())
        }

        async fn invoke(
            &self,
            name: &str,
            arguments: serde_json::Value,
        ) -> Result<ToolOutput, DirectoryError> {
            if self.fail_connection {
                return Err(DirectoryError::Connection {
                    message: "endpoint gone".to_string(),
                });
            }
            self.invocations
                .lock()
                .unwrap_or_else(|e| panic!("lock poisoned: {e}"))
                .push((name.to_string(), arguments));
            Ok(ToolOutput {
                content: format!("{name} output"),
                is_error: false,
            })
        }
    }

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            description: String::new(),
            parameters: serde_json::json!({"type": "object"}),
        }
    }

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    #[tokio::test]
    async fn test_execute_dispatches_bound_tool() {
        let directory = StubDirectory::new();
        let selected = vec![descriptor("search_fact_sheets")];
        let executor = RemoteToolExecutor::new(&directory, &selected);

        let result = executor
            .execute(&call("search_fact_sheets", r#"{"query":"soa"}"#))
            .await
            .unwrap_or_else(|e| panic!("execute failed: {e}"));

        assert!(!result.is_error);
        assert_eq!(result.content, "search_fact_sheets output");
        let invocations = directory
            .invocations
            .lock()
            .unwrap_or_else(|e| panic!("lock poisoned: {e}"));
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].0, "search_fact_sheets");
        assert_eq!(invocations[0].1["query"], "soa");
    }

    #[tokio::test]
    async fn test_execute_rejects_unbound_tool() {
        let directory = StubDirectory::new();
        let selected = vec![descriptor("search_fact_sheets")];
        let executor = RemoteToolExecutor::new(&directory, &selected);

        let result = executor
            .execute(&call("create_fact_sheet", "{}"))
            .await
            .unwrap_or_else(|e| panic!("execute failed: {e}"));

        assert!(result.is_error);
        assert_eq!(result.content, "unknown tool");
        assert!(
            directory
                .invocations
                .lock()
                .unwrap_or_else(|e| panic!("lock poisoned: {e}"))
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_malformed_arguments() {
        let directory = StubDirectory::new();
        let selected = vec![descriptor("search_fact_sheets")];
        let executor = RemoteToolExecutor::new(&directory, &selected);

        let result = executor
            .execute(&call("search_fact_sheets", "{not json"))
            .await
            .unwrap_or_else(|e| panic!("execute failed: {e}"));

        assert!(result.is_error);
        assert!(result.content.contains("invalid argument JSON"));
    }

    #[tokio::test]
    async fn test_execute_empty_arguments_become_empty_object() {
        let directory = StubDirectory::new();
        let selected = vec![descriptor("search_fact_sheets")];
        let executor = RemoteToolExecutor::new(&directory, &selected);

        let result = executor
            .execute(&call("search_fact_sheets", ""))
            .await
            .unwrap_or_else(|e| panic!("execute failed: {e}"));

        assert!(!result.is_error);
        let invocations = directory
            .invocations
            .lock()
            .unwrap_or_else(|e| panic!("lock poisoned: {e}"));
        assert!(invocations[0].1.is_object());
    }

    #[tokio::test]
    async fn test_execute_propagates_directory_failure() {
        let directory = StubDirectory::failing();
        let selected = vec![descriptor("search_fact_sheets")];
        let executor = RemoteToolExecutor::new(&directory, &selected);

        let result = executor.execute(&call("search_fact_sheets", "{}")).await;

        assert!(matches!(
            result,
            Err(AgentError::ToolInvocation { ref name, .. }) if name == "search_fact_sheets"
        ));
    }

    #[tokio::test]
    async fn test_execute_oversized_arguments() {
        let directory = StubDirectory::new();
        let selected = vec![descriptor("search_fact_sheets")];
        let executor = RemoteToolExecutor::new(&directory, &selected);

        let big = "x".repeat(MAX_TOOL_ARGS_LEN + 1);
        let result = executor
            .execute(&call("search_fact_sheets", &big))
            .await
            .unwrap_or_else(|e| panic!("execute failed: {e}"));

        assert!(result.is_error);
        assert!(result.content.contains("too large"));
    }
}
