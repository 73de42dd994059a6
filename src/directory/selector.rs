//! Relevance filtering for remote tool descriptors.
//!
//! The remote endpoint advertises every operation it has, including
//! mutating ones (create, archive, role administration). The agent only
//! needs read-oriented retrieval tools, so the listing is narrowed by a
//! fixed vocabulary before binding. The vocabulary is a policy constant;
//! callers may override it, which exists for testability rather than
//! end-user configuration.

use super::ToolDescriptor;

/// Vocabulary of terms marking a tool as relevant for design-standards
/// retrieval. Matched as lowercase substrings against both the tool name
/// and its description.
pub const DEFAULT_VOCABULARY: &[&str] = &["search", "find", "get", "overview", "fact", "sheet"];

/// Returns the descriptors whose name or description contains any
/// vocabulary term.
///
/// Matching is case-insensitive substring containment. The relative order
/// of the input is preserved, and the output is always a subset of the
/// input. Zero matches yield an empty selection rather than a fallback to
/// the full list; the agent runs with zero tools and answers from model
/// knowledge alone.
#[must_use]
pub fn select_relevant(tools: &[ToolDescriptor], vocabulary: &[&str]) -> Vec<ToolDescriptor> {
    tools
        .iter()
        .filter(|tool| {
            let name = tool.name.to_lowercase();
            let description = tool.description.to_lowercase();
            vocabulary
                .iter()
                .any(|term| name.contains(term) || description.contains(term))
        })
        .cloned()
        .collect()
}
