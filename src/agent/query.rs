//! The query agent: one topic in, one synthesized answer out.
//!
//! Each call refreshes the remote tool listing, narrows it through the
//! selector, binds the survivors into a session (system prompt + tool
//! definitions + model handle), and drives the tool-calling loop to a
//! final answer. Because the listing is refreshed per call, a long-lived
//! agent never binds a stale tool list.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::directory::{ToolDirectory, select_relevant};
use crate::error::AgentError;

use super::agentic_loop::agentic_loop;
use super::executor::RemoteToolExecutor;
use super::message::{ChatRequest, TokenUsage, system_message, user_message};
use super::prompt::{DESIGN_AGENT_SYSTEM_PROMPT, query_prompt};
use super::provider::LlmProvider;
use super::tool::bind_definitions;

/// Sampling temperature for the query agent. Low but nonzero: answers
/// should be stable without being fully greedy.
const TEMPERATURE: f32 = 0.1;

/// The synthesized answer for one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// The final answer text.
    pub final_text: String,
    /// Cumulative token usage across all loop rounds.
    pub usage: TokenUsage,
    /// How many remote tools were bound for this query.
    pub tools_bound: usize,
}

/// LLM-powered agent answering design-standards queries over remote tools.
pub struct QueryAgent {
    provider: Box<dyn LlmProvider>,
    directory: Arc<dyn ToolDirectory>,
    model: String,
    max_tokens: u32,
    max_tool_iterations: usize,
    timeout: Duration,
    vocabulary: Vec<String>,
}

impl QueryAgent {
    /// Creates a query agent from configuration, a provider, and a
    /// directory handle.
    #[must_use]
    pub fn new(
        config: &AppConfig,
        provider: Box<dyn LlmProvider>,
        directory: Arc<dyn ToolDirectory>,
    ) -> Self {
        Self {
            provider,
            directory,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            max_tool_iterations: config.max_tool_iterations,
            timeout: config.timeout,
            vocabulary: crate::directory::DEFAULT_VOCABULARY
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Overrides the relevance vocabulary. Exists for tests; the default
    /// is a fixed policy constant.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: &[&str]) -> Self {
        self.vocabulary = vocabulary.iter().map(ToString::to_string).collect();
        self
    }

    /// Answers one topic.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyTopic`] for a blank topic before any
    /// remote call, [`AgentError::Directory`] if discovery fails, and any
    /// loop failure ([`AgentError::ApiRequest`], [`AgentError::ToolInvocation`],
    /// [`AgentError::ToolLoopExceeded`], [`AgentError::Timeout`]) otherwise.
    pub async fn answer(&self, topic: &str) -> Result<QueryResult, AgentError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AgentError::EmptyTopic);
        }

        let listing = self.directory.list_tools().await?;
        let vocabulary: Vec<&str> = self.vocabulary.iter().map(String::as_str).collect();
        let selected = select_relevant(&listing, &vocabulary);

        info!(
            topic,
            listed = listing.len(),
            selected = selected.len(),
            model = %self.model,
            "answering query"
        );

        let executor = RemoteToolExecutor::new(self.directory.as_ref(), &selected);

        let mut request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                system_message(DESIGN_AGENT_SYSTEM_PROMPT),
                user_message(&query_prompt(topic)),
            ],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(self.max_tokens),
            tools: bind_definitions(&selected),
        };

        let response = tokio::time::timeout(
            self.timeout,
            agentic_loop(
                self.provider.as_ref(),
                &mut request,
                &executor,
                self.max_tool_iterations,
            ),
        )
        .await
        .map_err(|_| AgentError::Timeout {
            seconds: self.timeout.as_secs(),
        })??;

        info!(
            total_tokens = response.usage.total_tokens,
            "query completed"
        );

        Ok(QueryResult {
            final_text: response.content,
            usage: response.usage,
            tools_bound: selected.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::agent::message::ChatResponse;
    use crate::directory::{ToolDescriptor, ToolOutput};
    use crate::error::DirectoryError;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    /// Directory stub with a call counter and swappable listings.
    struct StubDirectory {
        listings: Mutex<Vec<Vec<ToolDescriptor>>>,
        list_calls: AtomicUsize,
        fail_connection: bool,
    }

    impl StubDirectory {
        fn with_listing(listing: Vec<ToolDescriptor>) -> Self {
            Self {
                listings: Mutex::new(vec![listing]),
                list_calls: AtomicUsize::new(0),
                fail_connection: false,
            }
        }

        fn with_listings(listings: Vec<Vec<ToolDescriptor>>) -> Self {
            Self {
                listings: Mutex::new(listings),
                list_calls: AtomicUsize::new(0),
                fail_connection: false,
            }
        }

        fn failing() -> Self {
            Self {
                listings: Mutex::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
                fail_connection: true,
            }
        }
    }

    #[async_trait]
    impl ToolDirectory for StubDirectory {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, DirectoryError> {
            let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_connection {
                return Err(DirectoryError::Connection {
                    message: "connection refused".to_string(),
                });
            }
            let listings = self
                .listings
                .lock()
                .unwrap_or_else(|e| panic!("lock poisoned: {e}"));
            // Replay the last listing once the sequence is exhausted
            let idx = call.min(listings.len() - 1);
            Ok(listings[idx].clone())
        }

        async fn invoke(
            &self,
            name: &str,
            _arguments: serde_json::Value,
        ) -> Result<ToolOutput, DirectoryError> {
            Ok(ToolOutput {
                content: format!("{name} output"),
                is_error: false,
            })
        }
    }

    /// Provider stub recording the tool names bound in each request.
    struct RecordingProvider {
        seen_tools: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            Self {
                seen_tools: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            self.seen_tools
                .lock()
                .unwrap_or_else(|e| panic!("lock poisoned: {e}"))
                .push(request.tools.iter().map(|t| t.name.clone()).collect());
            Ok(ChatResponse {
                content: "Model-only answer.".to_string(),
                usage: TokenUsage::default(),
                tool_calls: Vec::new(),
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    fn descriptor(name: &str, description: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            description: description.to_string(),
            parameters: serde_json::json!({"type": "object"}),
        }
    }

    fn config() -> AppConfig {
        AppConfig::builder()
            .api_key("test")
            .url("https://leanix.example/mcp")
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    fn agent_with(directory: StubDirectory, provider: RecordingProvider) -> QueryAgent {
        QueryAgent::new(&config(), Box::new(provider), Arc::new(directory))
    }

    #[tokio::test]
    async fn test_blank_topic_fails_before_any_remote_call() {
        let directory = Arc::new(StubDirectory::with_listing(Vec::new()));
        let agent = QueryAgent::new(
            &config(),
            Box::new(RecordingProvider::new()),
            Arc::clone(&directory) as Arc<dyn ToolDirectory>,
        );

        for topic in ["", "   ", "\t\n"] {
            let result = agent.answer(topic).await;
            assert!(matches!(result, Err(AgentError::EmptyTopic)));
        }
        assert_eq!(directory.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_selected_tools_still_answers() {
        // Nothing in this listing matches the vocabulary
        let directory = StubDirectory::with_listing(vec![descriptor(
            "create_application",
            "Create an application",
        )]);
        let agent = agent_with(directory, RecordingProvider::new());

        let result = agent
            .answer("event driven architecture")
            .await
            .unwrap_or_else(|e| panic!("answer failed: {e}"));

        assert_eq!(result.final_text, "Model-only answer.");
        assert_eq!(result.tools_bound, 0);
    }

    #[tokio::test]
    async fn test_connection_failure_propagates_without_model_call() {
        let directory = StubDirectory::failing();
        let provider = RecordingProvider::new();
        let agent = QueryAgent::new(&config(), Box::new(provider), Arc::new(directory));

        let result = agent.answer("microservices").await;

        assert!(matches!(
            result,
            Err(AgentError::Directory(DirectoryError::Connection { .. }))
        ));
    }

    #[tokio::test]
    async fn test_rebinding_reflects_fresh_listing() {
        let first = vec![descriptor("search_fact_sheets", "Search fact sheets")];
        let second = vec![
            descriptor("search_fact_sheets", "Search fact sheets"),
            descriptor("get_overview", "Fetch an overview"),
        ];
        let directory = StubDirectory::with_listings(vec![first, second]);
        let directory = Arc::new(directory);
        let provider = RecordingProvider::new();
        let agent = QueryAgent::new(
            &config(),
            Box::new(provider),
            Arc::clone(&directory) as Arc<dyn ToolDirectory>,
        );

        let a = agent
            .answer("topic one")
            .await
            .unwrap_or_else(|e| panic!("answer failed: {e}"));
        let b = agent
            .answer("topic two")
            .await
            .unwrap_or_else(|e| panic!("answer failed: {e}"));

        assert_eq!(a.tools_bound, 1);
        assert_eq!(b.tools_bound, 2);
    }

    #[tokio::test]
    async fn test_identical_listing_selects_identically() {
        let listing = vec![
            descriptor("search_fact_sheets", "Search fact sheets"),
            descriptor("create_fact_sheet", "Create a factSheet record"),
            descriptor("list_roles", "Enumerate workspace roles"),
        ];
        let directory = StubDirectory::with_listing(listing);
        let provider = RecordingProvider::new();
        let agent = QueryAgent::new(
            &config(),
            Box::new(provider),
            Arc::new(directory) as Arc<dyn ToolDirectory>,
        );

        let a = agent
            .answer("event driven")
            .await
            .unwrap_or_else(|e| panic!("answer failed: {e}"));
        let b = agent
            .answer("event driven")
            .await
            .unwrap_or_else(|e| panic!("answer failed: {e}"));

        assert_eq!(a.tools_bound, b.tools_bound);
    }

    #[tokio::test]
    async fn test_vocabulary_override() {
        let listing = vec![
            descriptor("list_roles", "Enumerate workspace roles"),
            descriptor("search_fact_sheets", "Search fact sheets"),
        ];
        let directory = StubDirectory::with_listing(listing);
        let agent =
            agent_with(directory, RecordingProvider::new()).with_vocabulary(&["roles"]);

        let result = agent
            .answer("who can edit")
            .await
            .unwrap_or_else(|e| panic!("answer failed: {e}"));

        assert_eq!(result.tools_bound, 1);
    }
}
