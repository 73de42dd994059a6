//! LLM query agent for design-standards retrieval.
//!
//! One query flows through a single async chain:
//!
//! ```text
//! topic → QueryAgent
//!   ├── ToolDirectory::list_tools (remote MCP listing)
//!   ├── selector (vocabulary filter)
//!   ├── session: system prompt + bound tools + model
//!   └── agentic_loop
//!         ├── LlmProvider::chat
//!         └── RemoteToolExecutor → ToolDirectory::invoke
//!   → QueryResult
//! ```

pub mod agentic_loop;
pub mod executor;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod query;
pub mod tool;

pub use executor::RemoteToolExecutor;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use provider::LlmProvider;
pub use providers::OpenAiProvider;
pub use query::{QueryAgent, QueryResult};
pub use tool::{ToolCall, ToolDefinition, ToolResult};
