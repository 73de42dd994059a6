//! Agentic tool-calling loop.
//!
//! Drives the LLM ↔ remote-tool round-trip: sends a request to the model,
//! invokes any requested tools against the remote endpoint, appends the
//! observed results, and repeats until the model produces a final text
//! response or the iteration limit is reached. The model chooses which
//! bound tool to call, in what order, and when to stop.

use tracing::debug;

use super::executor::RemoteToolExecutor;
use super::message::{
    ChatRequest, ChatResponse, TokenUsage, assistant_tool_calls_message, tool_message,
};
use super::provider::LlmProvider;
use crate::error::AgentError;

/// Runs the loop: model → tool calls → tool results → model → …
///
/// Continues until the model responds without tool calls (a final text
/// answer) or `max_iterations` is reached. An empty tool binding is valid;
/// the model then answers from its own knowledge on the first round.
///
/// Returns the final [`ChatResponse`] with its `usage` replaced by the
/// cumulative usage across all rounds.
///
/// # Errors
///
/// Returns [`AgentError::ToolLoopExceeded`] if the model keeps requesting
/// tools beyond `max_iterations`. Propagates provider and directory
/// failures.
pub async fn agentic_loop(
    provider: &dyn LlmProvider,
    request: &mut ChatRequest,
    executor: &RemoteToolExecutor<'_>,
    max_iterations: usize,
) -> Result<ChatResponse, AgentError> {
    let mut total_usage = TokenUsage::default();

    for iteration in 0..max_iterations {
        let mut response = provider.chat(request).await?;
        total_usage.accumulate(&response.usage);

        // No tool calls means a final answer
        if response.tool_calls.is_empty() {
            debug!(iteration, "loop completed with final text response");
            response.usage = total_usage;
            return Ok(response);
        }

        debug!(
            iteration,
            tool_count = response.tool_calls.len(),
            "executing tool calls"
        );

        request
            .messages
            .push(assistant_tool_calls_message(response.tool_calls.clone()));

        for call in &response.tool_calls {
            let result = executor.execute(call).await?;
            debug!(
                tool = call.name,
                call_id = call.id,
                is_error = result.is_error,
                "tool invocation complete"
            );
            request
                .messages
                .push(tool_message(&result.tool_call_id, &result.content));
        }
    }

    Err(AgentError::ToolLoopExceeded { max_iterations })
}
