//! MCP tool parameter types.
//!
//! Input schemas for the four service operations, using `schemars` for the
//! automatic JSON Schema generation required by the MCP protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_design_standards` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The topic to search for (e.g., "event driven architecture",
    /// "microservices", "API security").
    pub topic: String,
}

/// Parameters for the `get_architecture_patterns` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArchitectureParams {
    /// Architecture style (e.g., "microservices", "event-driven",
    /// "serverless").
    pub architecture_type: String,
}

/// Parameters for the `get_technology_standards` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TechnologyParams {
    /// Technology or framework name (e.g., "Kafka", "React", "Kubernetes").
    pub technology: String,
}

/// Parameters for the `get_security_guidelines` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SecurityParams {
    /// Security area (e.g., "API security", "authentication",
    /// "data encryption").
    pub security_area: String,
}
