//! MCP server implementation for the design-standards agent.
//!
//! Each MCP tool applies its query template and delegates to the shared
//! [`QueryAgent`]. Failures surface as MCP errors; a failed query never
//! returns an error-text answer body.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use tracing::info;

use crate::agent::QueryAgent;
use crate::agent::prompt::{
    architecture_patterns_topic, search_standards_topic, security_guidelines_topic,
    technology_standards_topic,
};
use crate::error::AgentError;

/// Maps an agent failure onto the MCP error taxonomy.
fn map_agent_error(e: AgentError) -> McpError {
    match e {
        AgentError::EmptyTopic => McpError::invalid_params(e.to_string(), None),
        other => McpError::internal_error(format!("query failed: {other}"), None),
    }
}

/// Design-standards MCP server.
///
/// Provides four tools, each one string parameter in and one synthesized
/// answer out. The underlying [`QueryAgent`] and its directory connection
/// are shared read-only across concurrent requests.
#[derive(Clone)]
pub struct DesignAgentServer {
    tool_router: ToolRouter<Self>,
    agent: Arc<QueryAgent>,
}

#[tool_router]
impl DesignAgentServer {
    /// Creates a new MCP server around a shared query agent.
    #[must_use]
    pub fn new(agent: Arc<QueryAgent>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            agent,
        }
    }

    /// Runs one templated query through the agent.
    async fn run_query(&self, topic: String) -> Result<CallToolResult, McpError> {
        let result = self.agent.answer(&topic).await.map_err(map_agent_error)?;
        info!(tools_bound = result.tools_bound, "MCP query completed");
        Ok(CallToolResult::success(vec![Content::text(
            result.final_text,
        )]))
    }

    /// Search design standards by free-text topic.
    #[tool(
        name = "search_design_standards",
        description = "Search for design standards, best practices, and architectural guidelines from LeanIX. Takes a free-text topic and returns a synthesized answer."
    )]
    async fn search_design_standards(
        &self,
        Parameters(params): Parameters<super::params::SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_query(search_standards_topic(&params.topic)).await
    }

    /// Get patterns and guidelines for an architecture style.
    #[tool(
        name = "get_architecture_patterns",
        description = "Get architectural patterns and design guidelines for a specific architecture style (e.g. microservices, event-driven, serverless)."
    )]
    async fn get_architecture_patterns(
        &self,
        Parameters(params): Parameters<super::params::ArchitectureParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_query(architecture_patterns_topic(&params.architecture_type))
            .await
    }

    /// Get standards and guidelines for a technology.
    #[tool(
        name = "get_technology_standards",
        description = "Get technology standards and guidelines for a specific technology or framework (e.g. Kafka, React, Kubernetes)."
    )]
    async fn get_technology_standards(
        &self,
        Parameters(params): Parameters<super::params::TechnologyParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_query(technology_standards_topic(&params.technology))
            .await
    }

    /// Get security guidelines for an area.
    #[tool(
        name = "get_security_guidelines",
        description = "Get security guidelines, best practices, and standards for a security area (e.g. API security, authentication, data encryption)."
    )]
    async fn get_security_guidelines(
        &self,
        Parameters(params): Parameters<super::params::SecurityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_query(security_guidelines_topic(&params.security_area))
            .await
    }
}

#[tool_handler]
impl ServerHandler for DesignAgentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "leanix-design-agent".to_string(),
                title: Some("LeanIX Design Agent MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "LeanIX Design Agent: answers design-standards questions by querying the \
                 LeanIX workspace through an LLM tool-calling loop. Use \
                 `search_design_standards` for free-text topics, or the dedicated tools for \
                 architecture patterns, technology standards, and security guidelines."
                    .to_string(),
            ),
        }
    }
}
