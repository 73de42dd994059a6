//! System prompt and query templates for the design-standards agent.

/// System prompt for the query agent.
///
/// Fixed for every session; the per-query topic arrives as the user
/// message built by [`query_prompt`].
pub const DESIGN_AGENT_SYSTEM_PROMPT: &str = "You fetch Design Standards from LeanIX using the \
provided tools. Retrieve and synthesize design-standards information: call tools as needed to \
gather fact sheets and related records, then produce one coherent final answer. Be concise and \
focus on the most relevant information. If no tool yields useful data, answer from your own \
knowledge and say so.";

/// Builds the user message for a plain topic query.
#[must_use]
pub fn query_prompt(topic: &str) -> String {
    format!("Fetch design standards for: {topic}")
}

/// Builds the topic for the search-design-standards operation.
#[must_use]
pub fn search_standards_topic(topic: &str) -> String {
    format!("Search for design standards about: {topic}")
}

/// Builds the topic for the architecture-patterns operation.
#[must_use]
pub fn architecture_patterns_topic(architecture_type: &str) -> String {
    format!("Get architectural patterns and guidelines for: {architecture_type}")
}

/// Builds the topic for the technology-standards operation.
#[must_use]
pub fn technology_standards_topic(technology: &str) -> String {
    format!("Get technology standards and guidelines for: {technology}")
}

/// Builds the topic for the security-guidelines operation.
#[must_use]
pub fn security_guidelines_topic(security_area: &str) -> String {
    format!("Get security guidelines and best practices for: {security_area}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_prompt_embeds_topic() {
        let prompt = query_prompt("event driven architecture");
        assert_eq!(
            prompt,
            "Fetch design standards for: event driven architecture"
        );
    }

    #[test]
    fn test_operation_templates_embed_parameter() {
        assert!(search_standards_topic("API security").contains("API security"));
        assert!(architecture_patterns_topic("microservices").contains("microservices"));
        assert!(technology_standards_topic("Kafka").contains("Kafka"));
        assert!(security_guidelines_topic("data encryption").contains("data encryption"));
    }
}
